pub mod histogram;
pub mod regions;
pub mod store;
pub mod types;

pub use histogram::{HistogramBin, histogram};
pub use regions::REGIONS;
pub use store::{ResultStore, StoreOverview};
pub use types::{
    FeatureRow, LocationDistribution, LocationFilter, LocationType, PredictionBatch,
    RegionSummary, RoundingPolicy,
};
