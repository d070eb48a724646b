use super::predictor::CashPredictor;
use crate::domain::errors::{ForecastError, ForecastResult};
use crate::domain::forecast::types::{MAX_WITHDRAWAL, MIN_WITHDRAWAL};
use crate::domain::forecast::{FeatureRow, PredictionBatch};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use std::sync::Mutex;

const FALLBACK_MEAN: f64 = 70_000.0;
const FALLBACK_STD_DEV: f64 = 15_000.0;

/// Stand-in model used only when explicitly allowed by configuration.
/// Ignores its input and returns clipped normal draws.
pub struct FallbackPredictor {
    distribution: Normal<f64>,
    rng: Mutex<StdRng>,
}

impl FallbackPredictor {
    pub fn new(seed: Option<u64>) -> ForecastResult<Self> {
        let distribution = Normal::new(FALLBACK_MEAN, FALLBACK_STD_DEV).map_err(|e| {
            ForecastError::PredictionFailed {
                reason: format!("invalid fallback distribution: {}", e),
            }
        })?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            distribution,
            rng: Mutex::new(rng),
        })
    }
}

impl CashPredictor for FallbackPredictor {
    fn predict(&self, rows: &[FeatureRow]) -> ForecastResult<PredictionBatch> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| ForecastError::PredictionFailed {
                reason: format!("fallback rng lock poisoned: {}", e),
            })?;

        Ok(rows
            .iter()
            .map(|_| {
                self.distribution
                    .sample(&mut *rng)
                    .clamp(MIN_WITHDRAWAL, MAX_WITHDRAWAL)
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Fallback Normal Generator"
    }

    fn version(&self) -> &str {
        "stand-in"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::LocationType;

    fn rows(n: usize) -> Vec<FeatureRow> {
        (0..n)
            .map(|_| FeatureRow {
                day_of_week: 3,
                is_holiday: false,
                avg_withdrawal: 60_000.0,
                location: LocationType::Suburban,
            })
            .collect()
    }

    #[test]
    fn test_one_clamped_value_per_row() {
        let predictor = FallbackPredictor::new(Some(7)).unwrap();
        let out = predictor.predict(&rows(500)).unwrap();

        assert_eq!(out.len(), 500);
        for v in &out {
            assert!(
                (MIN_WITHDRAWAL..=MAX_WITHDRAWAL).contains(v),
                "Prediction {} out of bounds",
                v
            );
        }
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let a = FallbackPredictor::new(Some(99)).unwrap();
        let b = FallbackPredictor::new(Some(99)).unwrap();
        assert_eq!(a.predict(&rows(10)).unwrap(), b.predict(&rows(10)).unwrap());
    }
}
