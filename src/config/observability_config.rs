//! Log filtering configuration.
//!
//! Environment Variables:
//! - `RUST_LOG`: tracing directives (default: `info`)

use super::{EnvLookup, process_env};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_DIRECTIVES: &str = "info";

/// Builds the subscriber filter from `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_DIRECTIVES`] when unset or unparseable.
pub fn log_filter(lookup: EnvLookup<'_>) -> EnvFilter {
    lookup("RUST_LOG")
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

pub fn log_filter_from_env() -> EnvFilter {
    log_filter(&process_env)
}
