use crate::domain::forecast::FeatureRow;

/// Ordered list of feature names.
/// This order MUST match the column order used when the model was trained.
/// Any change here is a breaking change for saved model artifacts.
pub const FEATURE_NAMES: &[&str] = &[
    "day_of_week",
    "is_holiday",
    "avg_withdrawal",
    "location_type",
];

/// Converts a feature row into the model's f64 input vector.
pub fn features_to_f64_vector(row: &FeatureRow) -> Vec<f64> {
    vec![
        row.day_of_week as f64,
        if row.is_holiday { 1.0 } else { 0.0 },
        row.avg_withdrawal,
        row.location.code() as f64,
    ]
}

/// Converts a batch of rows into a row-major 2D vector for matrix construction.
pub fn rows_to_2d_vec(rows: &[FeatureRow]) -> Vec<Vec<f64>> {
    rows.iter().map(features_to_f64_vector).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::LocationType;

    #[test]
    fn test_feature_vector_length() {
        let row = FeatureRow {
            day_of_week: 0,
            is_holiday: false,
            avg_withdrawal: 70_000.0,
            location: LocationType::Urban,
        };
        assert_eq!(features_to_f64_vector(&row).len(), FEATURE_NAMES.len());
    }

    #[test]
    fn test_feature_consistency() {
        let row = FeatureRow {
            day_of_week: 5,
            is_holiday: true,
            avg_withdrawal: 42_000.0,
            location: LocationType::Rural,
        };

        let vec = features_to_f64_vector(&row);
        // day_of_week is index 0
        assert_eq!(vec[0], 5.0);
        assert_eq!(vec[1], 1.0);
        assert_eq!(vec[2], 42_000.0);
        // location_type is last index (3)
        assert_eq!(vec[3], 2.0);
    }
}
