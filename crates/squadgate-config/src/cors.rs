use crate::ConfigError;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self { allowed_origins })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lookup_from;

    #[test]
    fn test_splits_and_trims_origins() {
        let config = CorsConfig::from_lookup(lookup_from(&[(
            "ALLOWED_ORIGINS",
            "https://squad.gg , ,http://localhost:8080",
        )]))
        .unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["https://squad.gg", "http://localhost:8080"]
        );
    }

    #[test]
    fn test_default_origins() {
        let config = CorsConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.allowed_origins.len(), 2);
    }
}
