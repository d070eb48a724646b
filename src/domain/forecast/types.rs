use crate::domain::errors::ForecastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound of a plausible per-ATM withdrawal average (INR)
pub const MIN_WITHDRAWAL: f64 = 20_000.0;
/// Upper bound of a plausible per-ATM withdrawal average (INR)
pub const MAX_WITHDRAWAL: f64 = 120_000.0;

/// Where an ATM is sited. The discriminant is the model's feature code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    Urban = 0,
    Suburban = 1,
    Rural = 2,
}

impl LocationType {
    pub const ALL: [LocationType; 3] = [
        LocationType::Urban,
        LocationType::Suburban,
        LocationType::Rural,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LocationType::Urban => "Urban",
            LocationType::Suburban => "Suburban",
            LocationType::Rural => "Rural",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "urban" => Ok(LocationType::Urban),
            "suburban" => Ok(LocationType::Suburban),
            "rural" => Ok(LocationType::Rural),
            _ => Err(ForecastError::invalid_input(format!(
                "unknown location type '{}': must be Urban, Suburban or Rural",
                s
            ))),
        }
    }
}

/// Location selection applied while synthesizing feature rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationFilter {
    Only(LocationType),
    #[default]
    All,
}

impl LocationFilter {
    pub const CHOICES: [LocationFilter; 4] = [
        LocationFilter::Only(LocationType::Urban),
        LocationFilter::Only(LocationType::Suburban),
        LocationFilter::Only(LocationType::Rural),
        LocationFilter::All,
    ];
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationFilter::Only(location) => location.fmt(f),
            LocationFilter::All => f.write_str("All"),
        }
    }
}

impl FromStr for LocationFilter {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(LocationFilter::All);
        }
        s.parse::<LocationType>()
            .map(LocationFilter::Only)
            .map_err(|_| {
                ForecastError::invalid_input(format!(
                    "unknown location filter '{}': must be Urban, Suburban, Rural or All",
                    s
                ))
            })
    }
}

/// Synthetic per-ATM model input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub day_of_week: u8,
    pub is_holiday: bool,
    pub avg_withdrawal: f64,
    pub location: LocationType,
}

/// One prediction per feature row, in row order
pub type PredictionBatch = Vec<f64>;

/// ATM counts per location type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationDistribution {
    pub urban: usize,
    pub suburban: usize,
    pub rural: usize,
}

impl LocationDistribution {
    pub fn from_rows(rows: &[FeatureRow]) -> Self {
        let mut dist = Self::default();
        for row in rows {
            dist.increment(row.location, 1);
        }
        dist
    }

    pub fn get(&self, location: LocationType) -> usize {
        match location {
            LocationType::Urban => self.urban,
            LocationType::Suburban => self.suburban,
            LocationType::Rural => self.rural,
        }
    }

    pub fn increment(&mut self, location: LocationType, by: usize) {
        match location {
            LocationType::Urban => self.urban += by,
            LocationType::Suburban => self.suburban += by,
            LocationType::Rural => self.rural += by,
        }
    }

    pub fn total(&self) -> usize {
        self.urban + self.suburban + self.rural
    }
}

/// Aggregated forecast for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub total: i64,
    pub avg: i64,
    pub std: i64,
    pub max: i64,
    pub min: i64,
    pub location_distribution: LocationDistribution,
    pub raw_predictions: PredictionBatch,
}

/// How float statistics are reduced to whole rupees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingPolicy {
    #[default]
    Nearest,
    Truncate,
}

impl RoundingPolicy {
    pub fn apply(self, value: f64) -> i64 {
        match self {
            RoundingPolicy::Nearest => value.round() as i64,
            RoundingPolicy::Truncate => value.trunc() as i64,
        }
    }
}

impl FromStr for RoundingPolicy {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest" | "round" => Ok(RoundingPolicy::Nearest),
            "truncate" | "trunc" => Ok(RoundingPolicy::Truncate),
            _ => Err(ForecastError::invalid_input(format!(
                "unknown rounding policy '{}': must be 'nearest' or 'truncate'",
                s
            ))),
        }
    }
}
