use cashcast::application::forecast::{FeatureSynthesizer, ForecastPipeline, ForecastRequest};
use cashcast::application::ml::{CashPredictor, FallbackPredictor};
use cashcast::domain::errors::{ForecastError, ForecastResult};
use cashcast::domain::forecast::{
    FeatureRow, LocationFilter, LocationType, PredictionBatch, REGIONS, ResultStore,
};
use cashcast::infrastructure::CsvExporter;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

/// Deterministic model: cash to load grows with withdrawal and holidays
struct LinearPredictor;

impl CashPredictor for LinearPredictor {
    fn predict(&self, rows: &[FeatureRow]) -> ForecastResult<PredictionBatch> {
        Ok(rows
            .iter()
            .map(|r| r.avg_withdrawal * if r.is_holiday { 1.3 } else { 1.0 })
            .collect())
    }

    fn name(&self) -> &str {
        "linear"
    }

    fn version(&self) -> &str {
        "test"
    }
}

fn pipeline() -> ForecastPipeline {
    ForecastPipeline::new(Arc::new(LinearPredictor)).with_seed(Some(2024))
}

#[test]
fn test_two_region_run_fills_store() {
    let mut store = ResultStore::new();
    let request = ForecastRequest::new(["Delhi", "Bihar"], 5);

    pipeline().run(&request, &mut store).unwrap();

    assert_eq!(store.len(), 2);
    for region in ["Delhi", "Bihar"] {
        let summary = store.get(region).unwrap();
        assert_eq!(summary.location_distribution.total(), 5);
    }
}

#[test]
fn test_summary_invariants_hold_for_every_region() {
    let mut store = ResultStore::new();
    for count in [1, 2, 7, 64] {
        let request = ForecastRequest::new(REGIONS.iter().copied(), count)
            .with_day(5)
            .with_holiday(true);
        pipeline().run(&request, &mut store).unwrap();

        assert_eq!(store.len(), REGIONS.len());
        for (region, s) in store.all() {
            let sum: f64 = s.raw_predictions.iter().sum();
            assert_eq!(s.total, sum.round() as i64, "{}", region);
            assert!(s.min <= s.avg && s.avg <= s.max, "{}", region);
            assert_eq!(s.location_distribution.total(), count, "{}", region);
            assert!(s.std >= 0);
        }
    }
}

#[test]
fn test_synthesizer_scenario() {
    let mut rng = StdRng::seed_from_u64(8);
    let rows = FeatureSynthesizer::default()
        .synthesize(&mut rng, 3, 2, true, LocationFilter::Only(LocationType::Urban))
        .unwrap();

    assert_eq!(rows.len(), 3);
    for row in rows {
        assert_eq!(row.location.code(), 0);
        assert!(row.avg_withdrawal >= 20_000.0 && row.avg_withdrawal <= 120_000.0);
    }
}

#[test]
fn test_rerun_replaces_snapshot() {
    let mut store = ResultStore::new();
    let p = pipeline();

    p.run(&ForecastRequest::new(["Delhi", "Bihar"], 5), &mut store)
        .unwrap();
    p.run(&ForecastRequest::new(["Gujarat"], 3), &mut store)
        .unwrap();

    assert_eq!(store.regions().collect::<Vec<_>>(), vec!["Gujarat"]);
}

#[test]
fn test_export_after_run_and_empty_export() {
    let exporter = CsvExporter::new();
    let mut store = ResultStore::new();

    assert!(matches!(
        exporter.export_to_string(&store),
        Err(ForecastError::EmptyStore)
    ));

    let request = ForecastRequest::new(["Rajasthan", "Delhi"], 4)
        .with_location_filter(LocationFilter::Only(LocationType::Suburban));
    pipeline().run(&request, &mut store).unwrap();

    let csv = exporter.export_to_string(&store).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    // Rows follow processing order; all ATMs are suburban
    assert!(lines[1].starts_with("Rajasthan,"));
    assert!(lines[1].ends_with(",0,4,0"));
    assert!(lines[2].starts_with("Delhi,"));
}

#[test]
fn test_fallback_pipeline_parallel_regions() {
    let predictor = Arc::new(FallbackPredictor::new(Some(5)).unwrap());
    let p = ForecastPipeline::new(predictor)
        .with_seed(Some(5))
        .with_parallel_regions(true);
    let mut store = ResultStore::new();

    p.run(&ForecastRequest::new(REGIONS.iter().copied(), 25), &mut store)
        .unwrap();

    // Order follows the request even when regions run on the pool
    assert_eq!(store.regions().collect::<Vec<_>>(), REGIONS.to_vec());
}

/// Model that emits NaN for holiday rows
struct HolidayNanPredictor;

impl CashPredictor for HolidayNanPredictor {
    fn predict(&self, rows: &[FeatureRow]) -> ForecastResult<PredictionBatch> {
        Ok(rows
            .iter()
            .map(|r| if r.is_holiday { f64::NAN } else { r.avg_withdrawal })
            .collect())
    }

    fn name(&self) -> &str {
        "holiday-nan"
    }

    fn version(&self) -> &str {
        "test"
    }
}

#[test]
fn test_nan_prediction_aborts_run_and_keeps_snapshot() {
    let pipeline = ForecastPipeline::new(Arc::new(HolidayNanPredictor)).with_seed(Some(9));
    let mut store = ResultStore::new();

    pipeline
        .run(&ForecastRequest::new(["Gujarat"], 4), &mut store)
        .unwrap();
    let before = store.get("Gujarat").unwrap().clone();

    let err = pipeline
        .run(
            &ForecastRequest::new(["Gujarat", "Delhi"], 4).with_holiday(true),
            &mut store,
        )
        .unwrap_err();

    assert!(matches!(err, ForecastError::PredictionFailed { .. }));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("Gujarat").unwrap(), &before);
}
