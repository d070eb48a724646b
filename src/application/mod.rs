// Forecast pipeline: synthesis, prediction, aggregation
pub mod forecast;

// Model adapters and training
pub mod ml;
