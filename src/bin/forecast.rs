use anyhow::Context;
use cashcast::application::forecast::{ForecastPipeline, ForecastRequest};
use cashcast::application::ml::load_predictor;
use cashcast::config::{Config, log_filter_from_env};
use cashcast::domain::forecast::{LocationFilter, REGIONS, ResultStore};
use cashcast::infrastructure::CsvExporter;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run one ATM cash forecast without the dashboard", long_about = None)]
struct Args {
    /// Comma-separated regions, or "all"
    #[arg(long, default_value = "all")]
    regions: String,

    /// ATMs per region (defaults to DEFAULT_ATM_COUNT)
    #[arg(long)]
    atms: Option<usize>,

    /// Day of week, 0-6
    #[arg(long, default_value_t = 0)]
    day: u8,

    /// Forecast for a holiday
    #[arg(long)]
    holiday: bool,

    /// Urban, Suburban, Rural or All
    #[arg(long, default_value = "All")]
    location: LocationFilter,

    /// Seed for reproducible output (overrides FORECAST_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Model artifact (overrides MODEL_PATH)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Use the stand-in generator if the model cannot be loaded
    #[arg(long)]
    allow_fallback: bool,

    /// Write results as CSV to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_regions(raw: &str) -> Vec<String> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return REGIONS.iter().map(|r| r.to_string()).collect();
    }
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(log_filter_from_env())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env().context("Failed to load config")?;
    if let Some(model) = args.model {
        config.model.model_path = model;
    }
    if args.allow_fallback {
        config.model.allow_fallback_model = true;
    }
    if args.seed.is_some() {
        config.forecast.seed = args.seed;
    }

    let predictor = load_predictor(&config.model, config.forecast.seed)
        .context("Cannot start without a model")?;
    let pipeline = ForecastPipeline::from_config(predictor, &config.forecast);

    let request = ForecastRequest::new(
        parse_regions(&args.regions),
        args.atms.unwrap_or(config.forecast.default_atm_count),
    )
    .with_day(args.day)
    .with_holiday(args.holiday)
    .with_location_filter(args.location);

    let mut store = ResultStore::new();
    pipeline.run(&request, &mut store)?;

    println!(
        "{:<16} {:>12} {:>10} {:>10} {:>10} {:>9}",
        "State", "Total", "Avg/ATM", "Max", "Min", "Std Dev"
    );
    for (region, s) in store.all() {
        println!(
            "{:<16} {:>12} {:>10} {:>10} {:>10} {:>9}",
            region, s.total, s.avg, s.max, s.min, s.std
        );
    }
    if let Some(overview) = store.overview() {
        println!(
            "\nTotal Cash: {}  |  Max: {}  |  Min: {}",
            overview.grand_total, overview.max_region_total, overview.min_region_total
        );
    }

    if let Some(path) = args.output {
        CsvExporter::new().export_to_path(&store, &path)?;
        info!("Data exported to {:?}", path);
    }
    Ok(())
}
