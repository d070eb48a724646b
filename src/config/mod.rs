//! Configuration module for Cashcast.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Model, Forecast and Observability.

mod forecast_config;
mod model_config;
mod observability_config;

pub use forecast_config::ForecastEnvConfig;
pub use model_config::{DEFAULT_MODEL_PATH, ModelEnvConfig};
pub use observability_config::{DEFAULT_LOG_DIRECTIVES, log_filter, log_filter_from_env};

use anyhow::Result;
use std::env;

/// Variable lookup used by the `from_lookup` constructors
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub model: ModelEnvConfig,
    pub forecast: ForecastEnvConfig,
}

impl Config {
    /// Reads configuration from the process environment (call `dotenvy::dotenv()` first).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self> {
        Ok(Self {
            model: ModelEnvConfig::from_lookup(lookup),
            forecast: ForecastEnvConfig::from_lookup(lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_composes_sub_configs() {
        let vars = HashMap::from([("ALLOW_FALLBACK_MODEL", "true"), ("FORECAST_SEED", "7")]);
        let config = Config::from_lookup(&|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert!(config.model.allow_fallback_model);
        assert_eq!(config.forecast.seed, Some(7));
    }

    #[test]
    fn test_config_propagates_sub_config_errors() {
        let result = Config::from_lookup(&|k| (k == "STAT_ROUNDING").then(|| "up".to_string()));
        assert!(result.is_err());
    }
}
