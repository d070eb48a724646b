//! Random forest training for the cash-demand model.
//!
//! Reads the tabular dataset (`day_of_week, is_holiday, avg_withdrawal,
//! location_type, cash_to_load`), fits a smartcore forest and writes the
//! JSON artifact consumed by [`SmartCorePredictor`](super::smartcore_predictor::SmartCorePredictor).

use super::smartcore_predictor::ForestModel;
use crate::domain::errors::{ForecastError, ForecastResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Seed for the train/test shuffle, fixed so reruns split identically
pub const SPLIT_SEED: u64 = 42;

#[derive(Debug, Deserialize)]
struct TrainingRecord {
    day_of_week: f64,
    is_holiday: f64,
    avg_withdrawal: f64,
    location_type: f64,
    cash_to_load: f64,
}

/// Feature matrix rows and targets, index-aligned
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn push(&mut self, features: Vec<f64>, target: f64) {
        self.features.push(features);
        self.targets.push(target);
    }
}

#[derive(Debug, Clone)]
pub struct TrainingParams {
    pub n_trees: usize,
    pub max_depth: Option<u16>,
    pub min_split: usize,
    /// Fraction held out for evaluation; ignored when `no_split` is set
    pub test_fraction: f64,
    pub no_split: bool,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_split: 2,
            test_fraction: 0.2,
            no_split: false,
        }
    }
}

/// Held-out error metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub samples: usize,
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}

pub struct TrainingOutcome {
    pub model: ForestModel,
    pub train_samples: usize,
    pub evaluation: Option<Evaluation>,
}

fn training_failed(reason: impl Into<String>) -> ForecastError {
    ForecastError::TrainingFailed {
        reason: reason.into(),
    }
}

pub fn load_training_data(path: &Path) -> ForecastResult<TrainingSet> {
    let file = File::open(path).map_err(|source| ForecastError::IoFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut set = TrainingSet::default();
    for (line, result) in rdr.deserialize().enumerate() {
        let record: TrainingRecord = result
            .map_err(|e| training_failed(format!("bad record at row {}: {}", line + 1, e)))?;

        // Column order must match feature_registry::FEATURE_NAMES
        set.push(
            vec![
                record.day_of_week,
                record.is_holiday,
                record.avg_withdrawal,
                record.location_type,
            ],
            record.cash_to_load,
        );
    }

    info!("Loaded {} training rows from {:?}", set.len(), path);
    Ok(set)
}

/// Shuffles with [`SPLIT_SEED`] and splits into (train, test). The test part
/// holds `ceil(n * test_fraction)` rows, leaving at least one for training.
pub fn split_train_test(set: &TrainingSet, test_fraction: f64) -> (TrainingSet, TrainingSet) {
    let mut indices: Vec<usize> = (0..set.len()).collect();
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    indices.shuffle(&mut rng);

    let test_len = ((set.len() as f64) * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
    let test_len = test_len.min(set.len().saturating_sub(1));

    let mut train = TrainingSet::default();
    let mut test = TrainingSet::default();
    for (pos, &i) in indices.iter().enumerate() {
        let target = if pos < test_len { &mut test } else { &mut train };
        target.push(set.features[i].clone(), set.targets[i]);
    }
    (train, test)
}

pub fn evaluate(predictions: &[f64], actuals: &[f64]) -> Option<Evaluation> {
    let n = predictions.len().min(actuals.len());
    if n == 0 {
        return None;
    }

    let sq_err: f64 = predictions
        .iter()
        .zip(actuals)
        .map(|(p, t)| (p - t).powi(2))
        .sum();
    let abs_err: f64 = predictions.iter().zip(actuals).map(|(p, t)| (p - t).abs()).sum();
    let mean_y = actuals[..n].iter().sum::<f64>() / n as f64;
    let var_y = actuals[..n].iter().map(|t| (t - mean_y).powi(2)).sum::<f64>() / n as f64;
    let mse = sq_err / n as f64;

    Some(Evaluation {
        samples: n,
        rmse: mse.sqrt(),
        mae: abs_err / n as f64,
        r2: if var_y > 0.0 { 1.0 - mse / var_y } else { 0.0 },
    })
}

fn fit(set: &TrainingSet, params: &TrainingParams) -> ForecastResult<ForestModel> {
    let x = DenseMatrix::from_2d_vec(&set.features)
        .map_err(|e| training_failed(format!("matrix error: {}", e)))?;

    let mut forest_params = RandomForestRegressorParameters::default()
        .with_n_trees(params.n_trees)
        .with_min_samples_split(params.min_split);
    if let Some(depth) = params.max_depth {
        forest_params = forest_params.with_max_depth(depth);
    }

    RandomForestRegressor::fit(&x, &set.targets, forest_params)
        .map_err(|e| training_failed(format!("fit error: {}", e)))
}

pub fn train(set: &TrainingSet, params: &TrainingParams) -> ForecastResult<TrainingOutcome> {
    if set.is_empty() {
        return Err(training_failed("no labeled rows in training data"));
    }
    if params.n_trees == 0 {
        return Err(training_failed("n_trees must be at least 1"));
    }

    let (train_set, test_set) = if params.no_split || set.len() < 2 {
        (set.clone(), TrainingSet::default())
    } else {
        split_train_test(set, params.test_fraction)
    };

    info!(
        "Training Random Forest Regressor (Trees: {}, Depth: {:?}, MinSplit: {}) on {} samples...",
        params.n_trees,
        params.max_depth,
        params.min_split,
        train_set.len()
    );
    let model = fit(&train_set, params)?;

    let evaluation = if test_set.is_empty() {
        None
    } else {
        let x_test = DenseMatrix::from_2d_vec(&test_set.features)
            .map_err(|e| training_failed(format!("matrix error: {}", e)))?;
        let pred: Vec<f64> = model
            .predict(&x_test)
            .map_err(|e| training_failed(format!("predict error: {}", e)))?;
        evaluate(&pred, &test_set.targets)
    };

    if let Some(eval) = &evaluation {
        info!(
            "OOS Test (n={}): RMSE={:.2}, MAE={:.2}, R²={:.4}",
            eval.samples, eval.rmse, eval.mae, eval.r2
        );
    }

    Ok(TrainingOutcome {
        model,
        train_samples: train_set.len(),
        evaluation,
    })
}

pub fn save_model(model: &ForestModel, path: &Path) -> ForecastResult<()> {
    let io_failure = |source| ForecastError::IoFailure {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_failure)?;
    }

    let file = File::create(path).map_err(io_failure)?;
    serde_json::to_writer(BufWriter::new(file), model)
        .map_err(|e| training_failed(format!("failed to serialize model: {}", e)))?;

    info!("Model saved to {:?}", path);
    Ok(())
}
