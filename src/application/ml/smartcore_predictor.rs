use super::predictor::CashPredictor;
use crate::domain::errors::{ForecastError, ForecastResult};
use crate::domain::forecast::{FeatureRow, PredictionBatch};
use crate::domain::ml::feature_registry::rows_to_2d_vec;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

pub type ForestModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Random forest loaded once from a JSON artifact and shared read-only
pub struct SmartCorePredictor {
    model: ForestModel,
    model_path: PathBuf,
}

impl SmartCorePredictor {
    pub fn load(model_path: impl Into<PathBuf>) -> ForecastResult<Self> {
        let model_path = model_path.into();
        let unavailable = |reason: String| ForecastError::ModelUnavailable {
            path: model_path.clone(),
            reason,
        };

        if !model_path.exists() {
            return Err(unavailable("model file not found".to_string()));
        }

        let file = File::open(&model_path)
            .map_err(|e| unavailable(format!("failed to open model file: {}", e)))?;

        // Smartcore deserialization (serde_json)
        let model: ForestModel = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| unavailable(format!("failed to deserialize model: {}", e)))?;

        info!("Successfully loaded ML model from {:?}", model_path);
        Ok(Self { model, model_path })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl CashPredictor for SmartCorePredictor {
    fn predict(&self, rows: &[FeatureRow]) -> ForecastResult<PredictionBatch> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let input_matrix = DenseMatrix::from_2d_vec(&rows_to_2d_vec(rows)).map_err(|e| {
            ForecastError::PredictionFailed {
                reason: format!("matrix creation failed: {}", e),
            }
        })?;

        let predictions = self
            .model
            .predict(&input_matrix)
            .map_err(|e| ForecastError::PredictionFailed {
                reason: e.to_string(),
            })?;

        if predictions.len() != rows.len() {
            return Err(ForecastError::LengthMismatch {
                rows: rows.len(),
                predictions: predictions.len(),
            });
        }
        Ok(predictions)
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_is_unavailable() {
        let result = SmartCorePredictor::load("non_existent_model.json");
        assert!(matches!(
            result,
            Err(ForecastError::ModelUnavailable { .. })
        ));
    }

    #[test]
    fn test_corrupt_model_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"{ not a forest").unwrap();

        match SmartCorePredictor::load(&path) {
            Err(ForecastError::ModelUnavailable { path: p, reason }) => {
                assert_eq!(p, path);
                assert!(reason.contains("deserialize"));
            }
            other => panic!("expected ModelUnavailable, got {:?}", other.err()),
        }
    }
}
