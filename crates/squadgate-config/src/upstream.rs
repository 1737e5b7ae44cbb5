//! Upstream service locations and forwarding limits.
//!
//! # Environment Variables
//!
//! - `REGISTRATION_SERVICE_URL`: registration service base `http://` URL (required)
//! - `AUTH_SERVICE_URL`: authentication service base URL (required)
//! - `COACH_SERVICE_URL`: coach service base URL, also serves admin routes (required)
//! - `PLAYER_SERVICE_URL`: player service base URL (required)
//! - `UPSTREAM_TIMEOUT_SECS`: total per-request upstream timeout (default: 30)
//! - `UPSTREAM_CONNECT_TIMEOUT_SECS`: connect timeout (default: 5)
//! - `MAX_BODY_BYTES`: largest request body the gateway buffers (default: 10 MiB)

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::{ConfigError, parsed_or, required};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// The backend services the gateway forwards to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpstreamService {
    Registration,
    Authentication,
    Coach,
    Player,
}

impl UpstreamService {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamService::Registration => "registration",
            UpstreamService::Authentication => "authentication",
            UpstreamService::Coach => "coach",
            UpstreamService::Player => "player",
        }
    }

    fn env_key(&self) -> &'static str {
        match self {
            UpstreamService::Registration => "REGISTRATION_SERVICE_URL",
            UpstreamService::Authentication => "AUTH_SERVICE_URL",
            UpstreamService::Coach => "COACH_SERVICE_URL",
            UpstreamService::Player => "PLAYER_SERVICE_URL",
        }
    }
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub registration: Url,
    pub authentication: Url,
    pub coach: Url,
    pub player: Url,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_body_bytes: usize,
}

impl UpstreamConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: u64 = parsed_or(&lookup, "UPSTREAM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let connect_timeout_secs: u64 = parsed_or(
            &lookup,
            "UPSTREAM_CONNECT_TIMEOUT_SECS",
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;

        for (key, secs) in [
            ("UPSTREAM_TIMEOUT_SECS", timeout_secs),
            ("UPSTREAM_CONNECT_TIMEOUT_SECS", connect_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(Self {
            registration: base_url(&lookup, UpstreamService::Registration)?,
            authentication: base_url(&lookup, UpstreamService::Authentication)?,
            coach: base_url(&lookup, UpstreamService::Coach)?,
            player: base_url(&lookup, UpstreamService::Player)?,
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            max_body_bytes: parsed_or(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }

    pub fn url_for(&self, service: UpstreamService) -> &Url {
        match service {
            UpstreamService::Registration => &self.registration,
            UpstreamService::Authentication => &self.authentication,
            UpstreamService::Coach => &self.coach,
            UpstreamService::Player => &self.player,
        }
    }
}

fn base_url<F>(lookup: &F, service: UpstreamService) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let key = service.env_key();
    let raw = required(lookup, key)?;
    let url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })?;

    // Upstreams sit on the internal network and speak plain HTTP
    if url.scheme() != "http" {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("unsupported scheme '{}', expected http", url.scheme()),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::Invalid {
            key,
            reason: "base URL must not carry a query or fragment".to_string(),
        });
    }

    Ok(url)
}
