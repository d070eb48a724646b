use crate::domain::forecast::{
    HistogramBin, LocationDistribution, LocationType, ResultStore, histogram,
};

/// Number of buckets in the prediction histogram
pub const HISTOGRAM_BINS: usize = 15;

/// Formats whole rupees as `₹1,234,567`.
pub fn format_inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}₹{}", sign, grouped)
}

/// One formatted line of the results grid
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub region: String,
    pub total: String,
    pub avg: String,
    pub max: String,
    pub min: String,
    pub std: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationShare {
    pub location: LocationType,
    pub count: usize,
    pub fraction: f32,
}

pub struct ForecastViewModel;

impl ForecastViewModel {
    pub fn result_rows(store: &ResultStore) -> Vec<ResultRow> {
        store
            .all()
            .iter()
            .map(|(region, s)| ResultRow {
                region: region.clone(),
                total: format_inr(s.total),
                avg: format_inr(s.avg),
                max: format_inr(s.max),
                min: format_inr(s.min),
                std: format_inr(s.std),
            })
            .collect()
    }

    /// Summary line under the grid, `None` before the first run
    pub fn summary_line(store: &ResultStore) -> Option<String> {
        store.overview().map(|o| {
            format!(
                "Total Cash: {}   |   Max: {}   |   Min: {}",
                format_inr(o.grand_total),
                format_inr(o.max_region_total),
                format_inr(o.min_region_total)
            )
        })
    }

    pub fn location_shares(totals: &LocationDistribution) -> Vec<LocationShare> {
        let all = totals.total();
        LocationType::ALL
            .iter()
            .map(|&location| {
                let count = totals.get(location);
                LocationShare {
                    location,
                    count,
                    fraction: if all == 0 {
                        0.0
                    } else {
                        count as f32 / all as f32
                    },
                }
            })
            .collect()
    }

    /// Bar heights for the per-region totals chart, x = region position
    pub fn total_points(store: &ResultStore) -> Vec<[f64; 2]> {
        store
            .all()
            .iter()
            .enumerate()
            .map(|(i, (_, s))| [i as f64, s.total as f64])
            .collect()
    }

    pub fn prediction_histogram(store: &ResultStore) -> Vec<HistogramBin> {
        histogram(&store.all_predictions(), HISTOGRAM_BINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::RegionSummary;

    fn store() -> ResultStore {
        let mut store = ResultStore::new();
        store.replace(vec![
            (
                "Delhi".to_string(),
                RegionSummary {
                    total: 1_234_567,
                    avg: 61_728,
                    std: 8_165,
                    max: 99_000,
                    min: 21_000,
                    location_distribution: LocationDistribution {
                        urban: 3,
                        suburban: 1,
                        rural: 0,
                    },
                    raw_predictions: vec![21_000.0, 99_000.0, 60_000.0, 61_000.0],
                },
            ),
            (
                "Bihar".to_string(),
                RegionSummary {
                    total: 500,
                    avg: 500,
                    std: 0,
                    max: 500,
                    min: 500,
                    location_distribution: LocationDistribution {
                        urban: 0,
                        suburban: 0,
                        rural: 4,
                    },
                    raw_predictions: vec![500.0],
                },
            ),
        ]);
        store
    }

    #[test]
    fn test_format_inr_groups_thousands() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
        assert_eq!(format_inr(1_000), "₹1,000");
        assert_eq!(format_inr(1_234_567), "₹1,234,567");
        assert_eq!(format_inr(-70_000), "-₹70,000");
    }

    #[test]
    fn test_result_rows_and_summary() {
        let store = store();
        let rows = ForecastViewModel::result_rows(&store);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].region, "Delhi");
        assert_eq!(rows[0].total, "₹1,234,567");
        assert_eq!(rows[0].std, "₹8,165");

        let line = ForecastViewModel::summary_line(&store).unwrap();
        assert!(line.contains("Total Cash: ₹1,235,067"));
        assert!(line.contains("Min: ₹500"));
        assert!(ForecastViewModel::summary_line(&ResultStore::new()).is_none());
    }

    #[test]
    fn test_location_shares_sum_to_one() {
        let shares = ForecastViewModel::location_shares(&store().location_totals());
        let sum: f32 = shares.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert_eq!(shares[2].count, 4);

        let empty = ForecastViewModel::location_shares(&LocationDistribution::default());
        assert!(empty.iter().all(|s| s.fraction == 0.0));
    }

    #[test]
    fn test_histogram_covers_all_predictions() {
        let bins = ForecastViewModel::prediction_histogram(&store());
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert!(ForecastViewModel::prediction_histogram(&ResultStore::new()).is_empty());
    }
}
