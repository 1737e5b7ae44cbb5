use std::fmt;

use crate::{ConfigError, parsed_or, required};

/// Default token validity window: 24 hours.
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 86_400;

/// Longest accepted token lifetime: 365 days.
pub const MAX_TOKEN_EXPIRY_SECS: i64 = 365 * 86_400;

/// Token signing configuration.
///
/// The secret is shared by every service that issues or verifies tokens. It is
/// never logged: the `Debug` implementation redacts it.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    /// Loads `JWT_SECRET` (required) and `JWT_TOKEN_EXPIRY` (seconds, default
    /// 86400, at most [`MAX_TOKEN_EXPIRY_SECS`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = required(&lookup, "JWT_SECRET")?;
        let token_expiry = parsed_or(&lookup, "JWT_TOKEN_EXPIRY", DEFAULT_TOKEN_EXPIRY_SECS)?;

        if token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_TOKEN_EXPIRY",
                reason: "must be a positive number of seconds".to_string(),
            });
        }
        if token_expiry > MAX_TOKEN_EXPIRY_SECS {
            return Err(ConfigError::Invalid {
                key: "JWT_TOKEN_EXPIRY",
                reason: format!("must be at most {} seconds", MAX_TOKEN_EXPIRY_SECS),
            });
        }

        Ok(Self {
            secret,
            token_expiry,
        })
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_expiry", &self.token_expiry)
            .finish()
    }
}
