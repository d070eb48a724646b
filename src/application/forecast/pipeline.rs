//! Forecast pipeline orchestrator
//!
//! Synthesizer → Predictor → Aggregator → Result Store.
//!
//! A run validates its request, forecasts every selected region into a
//! local buffer and only then swaps the buffer into the store. Any failure
//! leaves the store at its previous snapshot. Taking the store by `&mut`
//! means at most one run can commit into a given store at a time.

use super::aggregator::Aggregator;
use super::request::ForecastRequest;
use super::synthesizer::FeatureSynthesizer;
use crate::application::ml::CashPredictor;
use crate::config::ForecastEnvConfig;
use crate::domain::errors::{ForecastError, ForecastResult};
use crate::domain::forecast::{RegionSummary, ResultStore, RoundingPolicy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

// Spreads per-region seeds apart
const REGION_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Outcome of a committed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub regions: usize,
    pub atms: usize,
    pub elapsed: Duration,
}

pub struct ForecastPipeline {
    predictor: Arc<dyn CashPredictor>,
    synthesizer: FeatureSynthesizer,
    aggregator: Aggregator,
    seed: Option<u64>,
    parallel_regions: bool,
}

impl ForecastPipeline {
    pub fn new(predictor: Arc<dyn CashPredictor>) -> Self {
        Self {
            predictor,
            synthesizer: FeatureSynthesizer::default(),
            aggregator: Aggregator::default(),
            seed: None,
            parallel_regions: false,
        }
    }

    pub fn from_config(predictor: Arc<dyn CashPredictor>, config: &ForecastEnvConfig) -> Self {
        Self::new(predictor)
            .with_seed(config.seed)
            .with_parallel_regions(config.parallel_regions)
            .with_rounding(config.rounding)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel_regions(mut self, parallel: bool) -> Self {
        self.parallel_regions = parallel;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.aggregator = Aggregator::new(rounding);
        self
    }

    pub fn predictor(&self) -> &dyn CashPredictor {
        self.predictor.as_ref()
    }

    fn region_rng(&self, position: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(
                seed ^ (position as u64 + 1).wrapping_mul(REGION_SEED_STRIDE),
            ),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Forecasts one region. `position` is the region's index in the run and
    /// selects its RNG stream.
    pub fn forecast_region(
        &self,
        region: &str,
        position: usize,
        request: &ForecastRequest,
    ) -> ForecastResult<RegionSummary> {
        let mut rng = self.region_rng(position);
        let rows = self.synthesizer.synthesize(
            &mut rng,
            request.atms_per_region,
            request.day_of_week,
            request.is_holiday,
            request.location_filter,
        )?;

        let predictions = self.predictor.predict(&rows)?;
        let summary = self.aggregator.aggregate(&rows, predictions)?;

        debug!(
            "{}: total={} avg={} std={} (n={})",
            region, summary.total, summary.avg, summary.std, rows.len()
        );
        Ok(summary)
    }

    /// Runs the full pipeline and commits the results into `store`.
    pub fn run(
        &self,
        request: &ForecastRequest,
        store: &mut ResultStore,
    ) -> ForecastResult<RunReport> {
        let start = Instant::now();
        let regions = request.validate()?;

        let forecast = |(position, region): (usize, &&'static str)| {
            self.forecast_region(region, position, request)
                .map(|summary| (region.to_string(), summary))
        };

        let buffered: ForecastResult<Vec<(String, RegionSummary)>> = if self.parallel_regions {
            regions.par_iter().enumerate().map(forecast).collect()
        } else {
            regions.iter().enumerate().map(forecast).collect()
        };

        let summaries = buffered.inspect_err(|e| {
            if matches!(e, ForecastError::LengthMismatch { .. }) {
                error!("Predictor broke its output contract: {}", e);
            } else {
                error!("Forecast run aborted, previous results kept: {}", e);
            }
        })?;

        store.replace(summaries);

        let report = RunReport {
            regions: store.len(),
            atms: store.len() * request.atms_per_region,
            elapsed: start.elapsed(),
        };
        info!(
            "Forecast for {} region(s) x {} ATMs using {} in {:?}",
            report.regions,
            request.atms_per_region,
            self.predictor.name(),
            report.elapsed
        );
        Ok(report)
    }
}
