//! Forecast run configuration parsing from environment variables.

use super::EnvLookup;
use crate::domain::forecast::RoundingPolicy;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Forecast environment configuration
#[derive(Debug, Clone)]
pub struct ForecastEnvConfig {
    pub default_atm_count: usize,
    pub seed: Option<u64>,
    pub parallel_regions: bool,
    pub rounding: RoundingPolicy,
    pub export_dir: PathBuf,
}

impl Default for ForecastEnvConfig {
    fn default() -> Self {
        Self {
            default_atm_count: 10,
            seed: None,
            parallel_regions: false,
            rounding: RoundingPolicy::Nearest,
            export_dir: PathBuf::from("exports"),
        }
    }
}

impl ForecastEnvConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self> {
        let defaults = Self::default();

        let rounding = match lookup("STAT_ROUNDING") {
            Some(raw) => raw
                .parse::<RoundingPolicy>()
                .context("Invalid STAT_ROUNDING")?,
            None => defaults.rounding,
        };

        Ok(Self {
            default_atm_count: lookup("DEFAULT_ATM_COUNT")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.default_atm_count),
            seed: lookup("FORECAST_SEED").and_then(|v| v.parse::<u64>().ok()),
            parallel_regions: lookup("PARALLEL_REGIONS")
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(defaults.parallel_regions),
            rounding,
            export_dir: lookup("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
        })
    }
}
