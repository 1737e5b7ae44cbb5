//! # SquadGate Config
//!
//! Configuration types loaded once at process start from environment
//! variables:
//!
//! - [`jwt`]: token signing secret and validity window
//! - [`upstream`]: upstream service base URLs and forwarding limits
//! - [`cors`]: CORS allowed origins
//! - [`gateway`]: the gateway's complete startup configuration
//! - [`auth_service`]: the authentication service's startup configuration
//!
//! Every `from_env` constructor has a `from_lookup` twin that reads keys
//! through a closure instead of the process environment.
//!
//! # Example
//!
//! ```ignore
//! use squadgate_config::GatewayConfig;
//!
//! // Fails before any port is opened if JWT_SECRET or an upstream URL is missing
//! let config = GatewayConfig::from_env()?;
//! ```

pub mod auth_service;
pub mod cors;
pub mod gateway;
pub mod jwt;
pub mod upstream;

pub use auth_service::AuthServiceConfig;
pub use cors::CorsConfig;
pub use gateway::GatewayConfig;
pub use jwt::JwtConfig;
pub use upstream::{UpstreamConfig, UpstreamService};

use std::str::FromStr;

/// Startup-fatal configuration problems.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required configuration variable {0} is not set")]
    Missing(&'static str),

    #[error("configuration variable {key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Reads a required, non-blank variable.
pub(crate) fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(key))
}

/// Reads an optional variable, falling back to `default` when unset and
/// failing when set to something unparsable.
pub(crate) fn parsed_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}
