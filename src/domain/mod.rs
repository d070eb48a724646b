// Forecast domain: feature rows, summaries, result store
pub mod forecast;

// Model feature layout
pub mod ml;

// Domain-specific error types
pub mod errors;
