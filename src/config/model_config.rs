//! Model configuration parsing from environment variables.
//!
//! This module handles locating the model artifact and the fallback policy.

use super::EnvLookup;
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "data/model/atm_model.json";

/// Model environment configuration
#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    pub model_path: PathBuf,
    /// Substitute the stand-in generator when the artifact cannot be loaded
    pub allow_fallback_model: bool,
}

impl Default for ModelEnvConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            allow_fallback_model: false,
        }
    }
}

impl ModelEnvConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Self {
        Self {
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            allow_fallback_model: lookup("ALLOW_FALLBACK_MODEL")
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_model_config_defaults() {
        let config = ModelEnvConfig::from_lookup(&|_| None);
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert!(!config.allow_fallback_model);
    }

    #[test]
    fn test_model_config_overrides() {
        let vars = HashMap::from([
            ("MODEL_PATH", "/opt/models/atm.json"),
            ("ALLOW_FALLBACK_MODEL", "true"),
        ]);
        let config = ModelEnvConfig::from_lookup(&|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.model_path, PathBuf::from("/opt/models/atm.json"));
        assert!(config.allow_fallback_model);
    }

    #[test]
    fn test_unparsable_flag_keeps_fallback_disabled() {
        let config = ModelEnvConfig::from_lookup(&|k| {
            (k == "ALLOW_FALLBACK_MODEL").then(|| "yes please".to_string())
        });
        assert!(!config.allow_fallback_model);
    }
}
