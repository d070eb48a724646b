use cashcast::application::ml::training::{
    TrainingParams, load_training_data, save_model, train,
};
use cashcast::config::{DEFAULT_MODEL_PATH, log_filter_from_env};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Train the ATM cash-demand random forest", long_about = None)]
struct Args {
    /// Path to training data CSV
    /// (columns: day_of_week, is_holiday, avg_withdrawal, location_type, cash_to_load)
    #[arg(long, default_value = "data/atm_cash_data.csv")]
    input: PathBuf,

    /// Path to output model file
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    output: PathBuf,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 100)]
    n_trees: usize,

    /// Maximum depth of trees (unlimited when omitted)
    #[arg(long)]
    max_depth: Option<u16>,

    /// Minimum samples required to split an internal node
    #[arg(long, default_value_t = 2)]
    min_split: usize,

    /// Disable train/test split (train on 100% of data). Use after validation.
    #[arg(long)]
    no_split: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(log_filter_from_env())
        .init();

    let args = Args::parse();

    if !args.input.exists() {
        anyhow::bail!("Training data not found at {:?}", args.input);
    }

    let data = load_training_data(&args.input)?;
    let params = TrainingParams {
        n_trees: args.n_trees,
        max_depth: args.max_depth,
        min_split: args.min_split,
        no_split: args.no_split,
        ..Default::default()
    };

    let outcome = train(&data, &params)?;

    println!("\n══════════════════════════════════════════════════════");
    println!("  RANDOM FOREST TRAINING");
    println!("══════════════════════════════════════════════════════");
    println!("  Rows loaded:      {}", data.len());
    println!("  Trained on:       {}", outcome.train_samples);
    match &outcome.evaluation {
        Some(eval) => {
            println!("  Held-out rows:    {}", eval.samples);
            println!("  RMSE:             {:.2}", eval.rmse);
            println!("  MAE:              {:.2}", eval.mae);
            println!("  R²:               {:.4}", eval.r2);
        }
        None => println!("  Held-out rows:    0 (no split)"),
    }
    println!("══════════════════════════════════════════════════════\n");

    save_model(&outcome.model, &args.output)?;
    println!("Random Forest model trained and saved to {:?}.", args.output);
    Ok(())
}
