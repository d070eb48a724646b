pub mod fallback_predictor;
pub mod predictor;
pub mod smartcore_predictor;
pub mod training;

pub use fallback_predictor::FallbackPredictor;
pub use predictor::CashPredictor;
pub use smartcore_predictor::SmartCorePredictor;

use crate::config::ModelEnvConfig;
use crate::domain::errors::ForecastResult;
use std::sync::Arc;
use tracing::{info, warn};

/// Loads the model artifact once at startup.
///
/// When the artifact is unavailable the stand-in generator is used only if
/// `allow_fallback_model` is set; otherwise the load error is returned.
pub fn load_predictor(
    config: &ModelEnvConfig,
    seed: Option<u64>,
) -> ForecastResult<Arc<dyn CashPredictor>> {
    match SmartCorePredictor::load(&config.model_path) {
        Ok(predictor) => {
            info!(
                "Using {} ({}) from {:?}",
                predictor.name(),
                predictor.version(),
                predictor.model_path()
            );
            Ok(Arc::new(predictor))
        }
        Err(e) if config.allow_fallback_model => {
            warn!(
                "{}. ALLOW_FALLBACK_MODEL is set: predictions come from the stand-in generator, not a trained model.",
                e
            );
            Ok(Arc::new(FallbackPredictor::new(seed)?))
        }
        Err(e) => Err(e),
    }
}
