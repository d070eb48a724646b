//! Latest-snapshot result store
//!
//! Holds the region summaries produced by the most recent pipeline run.
//! There is no update-in-place API: every run hands over a complete set of
//! summaries which replaces whatever was there before.
//!
//! Entries keep the order in which regions were processed, which is also
//! the row order of the export file.

use super::types::{LocationDistribution, RegionSummary};
use crate::domain::errors::{ForecastError, ForecastResult};

/// Cross-region figures shown on the dashboard summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOverview {
    pub grand_total: i64,
    pub max_region_total: i64,
    pub min_region_total: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    entries: Vec<(String, RegionSummary)>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all previous entries and installs `summaries`.
    ///
    /// A region listed twice keeps its first position and its last summary.
    pub fn replace(&mut self, summaries: Vec<(String, RegionSummary)>) {
        let mut entries: Vec<(String, RegionSummary)> = Vec::with_capacity(summaries.len());
        for (region, summary) in summaries {
            match entries.iter_mut().find(|(name, _)| *name == region) {
                Some(existing) => existing.1 = summary,
                None => entries.push((region, summary)),
            }
        }
        self.entries = entries;
    }

    pub fn get(&self, region: &str) -> ForecastResult<&RegionSummary> {
        self.entries
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, summary)| summary)
            .ok_or_else(|| ForecastError::RegionNotFound {
                region: region.to_string(),
            })
    }

    /// Read-only view of the current snapshot in processing order
    pub fn all(&self) -> &[(String, RegionSummary)] {
        &self.entries
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn overview(&self) -> Option<StoreOverview> {
        let totals: Vec<i64> = self.entries.iter().map(|(_, s)| s.total).collect();
        Some(StoreOverview {
            grand_total: totals.iter().sum(),
            max_region_total: *totals.iter().max()?,
            min_region_total: *totals.iter().min()?,
        })
    }

    /// Location counts summed over every region
    pub fn location_totals(&self) -> LocationDistribution {
        let mut totals = LocationDistribution::default();
        for (_, summary) in &self.entries {
            let dist = &summary.location_distribution;
            totals.urban += dist.urban;
            totals.suburban += dist.suburban;
            totals.rural += dist.rural;
        }
        totals
    }

    /// Raw predictions of all regions, concatenated in region order
    pub fn all_predictions(&self) -> Vec<f64> {
        self.entries
            .iter()
            .flat_map(|(_, s)| s.raw_predictions.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: i64, urban: usize) -> RegionSummary {
        RegionSummary {
            total,
            avg: total,
            std: 0,
            max: total,
            min: total,
            location_distribution: LocationDistribution {
                urban,
                suburban: 1,
                rural: 0,
            },
            raw_predictions: vec![total as f64],
        }
    }

    #[test]
    fn test_replace_then_all_returns_supplied_snapshot() {
        let mut store = ResultStore::new();
        let snapshot = vec![
            ("Delhi".to_string(), summary(100, 1)),
            ("Bihar".to_string(), summary(50, 2)),
        ];

        store.replace(snapshot.clone());
        assert_eq!(store.all(), snapshot.as_slice());
        assert_eq!(store.regions().collect::<Vec<_>>(), vec!["Delhi", "Bihar"]);
    }

    #[test]
    fn test_replace_discards_previous_entries() {
        let mut store = ResultStore::new();
        store.replace(vec![("Delhi".to_string(), summary(100, 1))]);
        store.replace(vec![("Gujarat".to_string(), summary(70, 1))]);

        assert_eq!(store.len(), 1);
        assert!(matches!(
            store.get("Delhi"),
            Err(ForecastError::RegionNotFound { .. })
        ));
        assert_eq!(store.get("Gujarat").unwrap().total, 70);
    }

    #[test]
    fn test_duplicate_region_keeps_first_position() {
        let mut store = ResultStore::new();
        store.replace(vec![
            ("Delhi".to_string(), summary(1, 1)),
            ("Bihar".to_string(), summary(2, 1)),
            ("Delhi".to_string(), summary(3, 1)),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[0].0, "Delhi");
        assert_eq!(store.get("Delhi").unwrap().total, 3);
    }

    #[test]
    fn test_overview_and_location_totals() {
        let mut store = ResultStore::new();
        assert!(store.overview().is_none());

        store.replace(vec![
            ("Delhi".to_string(), summary(100, 1)),
            ("Bihar".to_string(), summary(50, 2)),
        ]);

        let overview = store.overview().unwrap();
        assert_eq!(overview.grand_total, 150);
        assert_eq!(overview.max_region_total, 100);
        assert_eq!(overview.min_region_total, 50);

        let totals = store.location_totals();
        assert_eq!(totals.urban, 3);
        assert_eq!(totals.suburban, 2);
        assert_eq!(store.all_predictions(), vec![100.0, 50.0]);
    }
}
