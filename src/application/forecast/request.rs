use crate::domain::errors::{ForecastError, ForecastResult};
use crate::domain::forecast::LocationFilter;
use crate::domain::forecast::regions::canonical_region;

/// Parameters of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub regions: Vec<String>,
    pub atms_per_region: usize,
    pub day_of_week: u8,
    pub is_holiday: bool,
    pub location_filter: LocationFilter,
}

impl ForecastRequest {
    pub fn new(regions: impl IntoIterator<Item = impl Into<String>>, atms_per_region: usize) -> Self {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            atms_per_region,
            day_of_week: 0,
            is_holiday: false,
            location_filter: LocationFilter::All,
        }
    }

    pub fn with_day(mut self, day_of_week: u8) -> Self {
        self.day_of_week = day_of_week;
        self
    }

    pub fn with_holiday(mut self, is_holiday: bool) -> Self {
        self.is_holiday = is_holiday;
        self
    }

    pub fn with_location_filter(mut self, filter: LocationFilter) -> Self {
        self.location_filter = filter;
        self
    }

    /// Checks the request and returns the catalog names of the selected
    /// regions, duplicates collapsed (first occurrence wins).
    pub fn validate(&self) -> ForecastResult<Vec<&'static str>> {
        if self.regions.is_empty() {
            return Err(ForecastError::invalid_input(
                "no region selected: select one or more regions",
            ));
        }
        if self.atms_per_region == 0 {
            return Err(ForecastError::invalid_input(
                "ATMs per region must be a positive integer",
            ));
        }
        if self.day_of_week > 6 {
            return Err(ForecastError::invalid_input(format!(
                "day of week must be 0-6, got {}",
                self.day_of_week
            )));
        }

        let mut selected: Vec<&'static str> = Vec::with_capacity(self.regions.len());
        for name in &self.regions {
            let region = canonical_region(name).ok_or_else(|| {
                ForecastError::invalid_input(format!("unknown region '{}'", name))
            })?;
            if !selected.contains(&region) {
                selected.push(region);
            }
        }
        Ok(selected)
    }
}

/// Parses the free-text ATM count entered by a user.
pub fn parse_atm_count(text: &str) -> ForecastResult<usize> {
    let invalid = || {
        ForecastError::invalid_input(format!(
            "'{}' is not a positive integer for ATMs per region",
            text.trim()
        ))
    };
    match text.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(n) => Ok(n),
    }
}
