use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::{ConfigError, JwtConfig, parsed_or, required};

pub const DEFAULT_AUTH_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5002);

/// Startup configuration of the authentication service.
#[derive(Clone, Debug)]
pub struct AuthServiceConfig {
    pub listen_addr: SocketAddr,
    pub jwt: JwtConfig,
    /// JSON array of `{email, password_hash, role}` records.
    pub users_file: PathBuf,
}

impl AuthServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            listen_addr: parsed_or(&lookup, "AUTH_ADDR", DEFAULT_AUTH_ADDR)?,
            jwt: JwtConfig::from_lookup(&lookup)?,
            users_file: PathBuf::from(required(&lookup, "USERS_FILE")?),
        })
    }
}
