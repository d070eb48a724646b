pub mod aggregator;
pub mod pipeline;
pub mod request;
pub mod synthesizer;

pub use aggregator::Aggregator;
pub use pipeline::{ForecastPipeline, RunReport};
pub use request::{ForecastRequest, parse_atm_count};
pub use synthesizer::FeatureSynthesizer;
