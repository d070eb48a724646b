use crate::domain::errors::ForecastResult;
use crate::domain::forecast::{FeatureRow, PredictionBatch};

/// Interface for cash-demand regression models
pub trait CashPredictor: Send + Sync {
    /// Predict cash to load for each row.
    /// Output has the same length and order as `rows`; values are not range-checked.
    fn predict(&self, rows: &[FeatureRow]) -> ForecastResult<PredictionBatch>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}
