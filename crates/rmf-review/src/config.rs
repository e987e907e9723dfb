use serde::Deserialize;
use thiserror::Error;

const ENV_PREFIX: &str = "RMF_";

/// Errors raised while loading [`ReviewConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime environment, drives the logging setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewConfig {
    /// `RMF_ENVIRONMENT`
    #[serde(default)]
    pub environment: Environment,
    /// `RMF_DUE_BATCH_LIMIT`: maximum number of due cards returned per query
    #[serde(default = "default_due_batch_limit")]
    pub due_batch_limit: usize,
}

const fn default_due_batch_limit() -> usize {
    100
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            due_batch_limit: default_due_batch_limit(),
        }
    }
}

impl ReviewConfig {
    /// Load the configuration from `RMF_*` environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load the configuration from an explicit set of `(key, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;

        if config.due_batch_limit == 0 {
            return Err(ConfigError::Invalid(
                "RMF_DUE_BATCH_LIMIT must be greater than 0".to_string(),
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ReviewConfig::from_vars(vars(&[("PATH", "/usr/bin")])).unwrap();
        assert_eq!(config, ReviewConfig::default());
        assert!(config.environment.is_development());
        assert_eq!(config.due_batch_limit, 100);
    }

    #[test]
    fn test_overrides() {
        let config = ReviewConfig::from_vars(vars(&[
            ("RMF_ENVIRONMENT", "production"),
            ("RMF_DUE_BATCH_LIMIT", "25"),
        ]))
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.due_batch_limit, 25);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ReviewConfig::from_vars(vars(&[("RMF_DUE_BATCH_LIMIT", "lots")])),
            Err(ConfigError::Env(_))
        ));
        assert!(matches!(
            ReviewConfig::from_vars(vars(&[("RMF_DUE_BATCH_LIMIT", "0")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(ReviewConfig::from_vars(vars(&[("RMF_ENVIRONMENT", "staging")])).is_err());
    }
}
