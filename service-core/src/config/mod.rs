use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Reads `key` from the environment, falling back to `default`.
///
/// Returns a configuration error when the variable is unset and no default exists.
pub fn env_or(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_uses_default_when_unset() {
        let value = env_or("SERVICE_CORE_TEST_UNSET_VARIABLE", Some("fallback"))
            .expect("default should apply");
        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_env_or_without_default_is_config_error() {
        let err = env_or("SERVICE_CORE_TEST_UNSET_VARIABLE", None).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_env_or_reads_environment() {
        // PATH is always present in the test environment
        let value = env_or("PATH", Some("fallback")).expect("PATH should be set");
        assert_ne!(value, "fallback");
    }
}
