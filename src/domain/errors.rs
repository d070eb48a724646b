use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the forecast pipeline, its predictors and the exporter
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Model unavailable at {path:?}: {reason}")]
    ModelUnavailable { path: PathBuf, reason: String },

    #[error("Length mismatch: {rows} feature rows vs {predictions} predictions")]
    LengthMismatch { rows: usize, predictions: usize },

    #[error("No forecast results to export")]
    EmptyStore,

    #[error("I/O failure on {path:?}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Region not found: {region}")]
    RegionNotFound { region: String },

    #[error("Prediction failed: {reason}")]
    PredictionFailed { reason: String },

    #[error("Training failed: {reason}")]
    TrainingFailed { reason: String },
}

impl ForecastError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Errors the user can fix by changing the request and retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::EmptyStore
                | Self::IoFailure { .. }
                | Self::RegionNotFound { .. }
        )
    }
}

pub type ForecastResult<T> = Result<T, ForecastError>;
