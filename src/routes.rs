//! Route rules: path prefix to required role and upstream.
//!
//! The table is built once at startup and never changes. A path matches a
//! rule when the rule's prefix equals the path or is followed in the path by
//! `/`, so `/coach` covers `/coach` and `/coach/roster` but not `/coaches`.
//! When several rules match, the longest prefix wins regardless of the order
//! the rules were given in. Paths carrying `.` or `..` segments, plain or
//! percent-encoded, match nothing, so a request cannot climb out of the
//! prefix its rule was chosen for.
//!
//! | Prefix    | Required role | Upstream       |
//! |-----------|---------------|----------------|
//! | `/reg`    | none          | registration   |
//! | `/auth`   | none          | authentication |
//! | `/coach`  | coach         | coach          |
//! | `/player` | player        | player         |
//! | `/admin`  | admin         | coach          |

use std::collections::HashSet;

use squadgate_auth::Role;
use squadgate_config::{ConfigError, UpstreamService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: String,
    /// `None` marks a public route.
    pub required_role: Option<Role>,
    pub upstream: UpstreamService,
}

impl RouteRule {
    pub fn public(prefix: &str, upstream: UpstreamService) -> Self {
        Self {
            prefix: prefix.to_string(),
            required_role: None,
            upstream,
        }
    }

    pub fn protected(prefix: &str, role: Role, upstream: UpstreamService) -> Self {
        Self {
            prefix: prefix.to_string(),
            required_role: Some(role),
            upstream,
        }
    }

    /// The part of `path` left after this rule's prefix, always starting with
    /// `/`, or `None` when the prefix does not cover `path` on a segment
    /// boundary.
    fn remainder<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.prefix == "/" {
            return Some(path);
        }
        match path.strip_prefix(self.prefix.as_str())? {
            "" => Some("/"),
            rest if rest.starts_with('/') => Some(rest),
            _ => None,
        }
    }
}

/// A resolved request: the rule that applies and the path to send upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub rule: &'a RouteRule,
    pub forward_path: &'a str,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    // Longest prefix first
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub fn new(mut rules: Vec<RouteRule>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            let valid = rule.prefix == "/"
                || (rule.prefix.starts_with('/') && !rule.prefix.ends_with('/'));
            if !valid {
                return Err(ConfigError::Invalid {
                    key: "routes",
                    reason: format!(
                        "prefix '{}' must start with '/' and not end with '/'",
                        rule.prefix
                    ),
                });
            }
            if !seen.insert(rule.prefix.as_str()) {
                return Err(ConfigError::Invalid {
                    key: "routes",
                    reason: format!("duplicate prefix '{}'", rule.prefix),
                });
            }
        }

        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Ok(Self { rules })
    }

    /// The gateway's routing policy.
    pub fn gateway_default() -> Result<Self, ConfigError> {
        Self::new(vec![
            RouteRule::public("/reg", UpstreamService::Registration),
            RouteRule::public("/auth", UpstreamService::Authentication),
            RouteRule::protected("/coach", Role::Coach, UpstreamService::Coach),
            RouteRule::protected("/player", Role::Player, UpstreamService::Player),
            RouteRule::protected("/admin", Role::Admin, UpstreamService::Coach),
        ])
    }

    pub fn resolve<'a>(&'a self, path: &'a str) -> Option<RouteMatch<'a>> {
        if has_dot_segment(path) {
            return None;
        }
        self.rules.iter().find_map(|rule| {
            rule.remainder(path)
                .map(|forward_path| RouteMatch { rule, forward_path })
        })
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }
}

fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        decoded == "." || decoded == ".."
    })
}
