use std::net::SocketAddr;

use crate::{ConfigError, CorsConfig, JwtConfig, UpstreamConfig, parsed_or};

pub const DEFAULT_GATEWAY_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
    4000,
);

/// Everything the gateway needs before it may open its listener.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
    pub jwt: JwtConfig,
    pub upstreams: UpstreamConfig,
    pub cors: CorsConfig,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            listen_addr: parsed_or(&lookup, "GATEWAY_ADDR", DEFAULT_GATEWAY_ADDR)?,
            jwt: JwtConfig::from_lookup(&lookup)?,
            upstreams: UpstreamConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lookup_from;

    fn complete() -> Vec<(&'static str, &'static str)> {
        vec![
            ("JWT_SECRET", "347186591486"),
            ("REGISTRATION_SERVICE_URL", "http://localhost:5001"),
            ("AUTH_SERVICE_URL", "http://localhost:5002"),
            ("COACH_SERVICE_URL", "http://localhost:5003"),
            ("PLAYER_SERVICE_URL", "http://localhost:5004"),
        ]
    }

    #[test]
    fn test_complete_configuration() {
        let config = GatewayConfig::from_lookup(lookup_from(&complete())).unwrap();
        assert_eq!(config.listen_addr.port(), 4000);
        assert_eq!(config.jwt.token_expiry, 86_400);
    }

    #[test]
    fn test_missing_secret_prevents_startup() {
        let pairs: Vec<_> = complete()
            .into_iter()
            .filter(|(k, _)| *k != "JWT_SECRET")
            .collect();
        assert_eq!(
            GatewayConfig::from_lookup(lookup_from(&pairs)).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn test_custom_listen_addr() {
        let mut pairs = complete();
        pairs.push(("GATEWAY_ADDR", "127.0.0.1:8080"));
        let config = GatewayConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:8080");
    }
}
