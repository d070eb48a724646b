use crate::domain::errors::{ForecastError, ForecastResult};
use crate::domain::forecast::{
    FeatureRow, LocationDistribution, PredictionBatch, RegionSummary, RoundingPolicy,
};
use statrs::statistics::Statistics;

/// Reduces one region's predictions to summary statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    rounding: RoundingPolicy,
}

impl Aggregator {
    pub fn new(rounding: RoundingPolicy) -> Self {
        Self { rounding }
    }

    /// Summarizes `predictions` for the ATMs described by `rows`.
    ///
    /// Std dev is the population form (denominator = count). The location
    /// distribution is counted from the rows, not from the predictions.
    /// NaN or infinite predictions fail with `PredictionFailed`.
    pub fn aggregate(
        &self,
        rows: &[FeatureRow],
        predictions: PredictionBatch,
    ) -> ForecastResult<RegionSummary> {
        if rows.len() != predictions.len() {
            return Err(ForecastError::LengthMismatch {
                rows: rows.len(),
                predictions: predictions.len(),
            });
        }
        if predictions.is_empty() {
            return Err(ForecastError::invalid_input("no predictions to aggregate"));
        }
        if let Some(pos) = predictions.iter().position(|p| !p.is_finite()) {
            return Err(ForecastError::PredictionFailed {
                reason: format!("non-finite prediction {} for ATM {}", predictions[pos], pos),
            });
        }

        let sum: f64 = predictions.iter().sum();
        let mean = sum / predictions.len() as f64;
        let std = Statistics::population_std_dev(predictions.iter());
        let max = Statistics::max(predictions.iter());
        let min = Statistics::min(predictions.iter());

        Ok(RegionSummary {
            total: self.rounding.apply(sum),
            avg: self.rounding.apply(mean),
            std: self.rounding.apply(std),
            max: self.rounding.apply(max),
            min: self.rounding.apply(min),
            location_distribution: LocationDistribution::from_rows(rows),
            raw_predictions: predictions,
        })
    }
}
