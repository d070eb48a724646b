use crate::domain::errors::{ForecastError, ForecastResult};
use crate::domain::forecast::types::{MAX_WITHDRAWAL, MIN_WITHDRAWAL};
use crate::domain::forecast::{FeatureRow, LocationFilter, LocationType};
use rand::Rng;
use rand_distr::StandardNormal;

/// Generates synthetic per-ATM feature rows.
///
/// `avg_withdrawal` models an ATM's historical withdrawal average, drawn from
/// Normal(mean, std_dev) and clamped to the plausible range.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSynthesizer {
    pub withdrawal_mean: f64,
    pub withdrawal_std_dev: f64,
}

impl Default for FeatureSynthesizer {
    fn default() -> Self {
        Self {
            withdrawal_mean: 70_000.0,
            withdrawal_std_dev: 15_000.0,
        }
    }
}

impl FeatureSynthesizer {
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        day_of_week: u8,
        is_holiday: bool,
        filter: LocationFilter,
    ) -> ForecastResult<Vec<FeatureRow>> {
        if count == 0 {
            return Err(ForecastError::invalid_input("ATM count must be positive"));
        }
        if day_of_week > 6 {
            return Err(ForecastError::invalid_input(format!(
                "day of week must be 0-6, got {}",
                day_of_week
            )));
        }

        let rows = (0..count)
            .map(|_| {
                let z: f64 = rng.sample(StandardNormal);
                let avg_withdrawal = (self.withdrawal_mean + self.withdrawal_std_dev * z)
                    .clamp(MIN_WITHDRAWAL, MAX_WITHDRAWAL);
                let location = match filter {
                    LocationFilter::Only(location) => location,
                    LocationFilter::All => LocationType::ALL[rng.random_range(0..3)],
                };
                FeatureRow {
                    day_of_week,
                    is_holiday,
                    avg_withdrawal,
                    location,
                }
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_specific_filter_pins_location() {
        let mut rng = StdRng::seed_from_u64(3);
        let rows = FeatureSynthesizer::default()
            .synthesize(&mut rng, 3, 2, true, LocationFilter::Only(LocationType::Urban))
            .unwrap();

        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.location.code(), 0);
            assert_eq!(row.day_of_week, 2);
            assert!(row.is_holiday);
            assert!((MIN_WITHDRAWAL..=MAX_WITHDRAWAL).contains(&row.avg_withdrawal));
        }
    }

    #[test]
    fn test_all_filter_draws_every_location() {
        let mut rng = StdRng::seed_from_u64(11);
        let rows = FeatureSynthesizer::default()
            .synthesize(&mut rng, 300, 0, false, LocationFilter::All)
            .unwrap();

        assert_eq!(rows.len(), 300);
        for location in LocationType::ALL {
            assert!(rows.iter().any(|r| r.location == location));
        }
    }

    #[test]
    fn test_withdrawals_are_clamped() {
        // A huge spread forces both bounds to be hit
        let synth = FeatureSynthesizer {
            withdrawal_mean: 70_000.0,
            withdrawal_std_dev: 1_000_000.0,
        };
        let mut rng = StdRng::seed_from_u64(5);
        let rows = synth
            .synthesize(&mut rng, 200, 4, false, LocationFilter::All)
            .unwrap();

        assert!(rows.iter().any(|r| r.avg_withdrawal == MIN_WITHDRAWAL));
        assert!(rows.iter().any(|r| r.avg_withdrawal == MAX_WITHDRAWAL));
    }

    #[test]
    fn test_invalid_count_and_day() {
        let synth = FeatureSynthesizer::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            synth.synthesize(&mut rng, 0, 1, false, LocationFilter::All),
            Err(ForecastError::InvalidInput { .. })
        ));
        assert!(matches!(
            synth.synthesize(&mut rng, 5, 7, false, LocationFilter::All),
            Err(ForecastError::InvalidInput { .. })
        ));
    }
}
