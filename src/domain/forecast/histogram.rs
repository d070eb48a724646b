/// One equal-width histogram bucket covering `[start, end)`; the last bucket
/// also includes its upper edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Buckets `values` into `bins` equal-width bins spanning their range.
///
/// Returns an empty vector for empty input or zero bins. A degenerate range
/// (all values equal) yields a single unit-wide bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;

    if range <= 0.0 {
        return vec![HistogramBin {
            start: lo - 0.5,
            end: lo + 0.5,
            count: finite.len(),
        }];
    }

    let width = range / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_has_no_bins() {
        assert!(histogram(&[], 15).is_empty());
        assert!(histogram(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_counts_cover_every_value() {
        let values = [20_000.0, 35_000.0, 70_000.0, 70_500.0, 120_000.0];
        let bins = histogram(&values, 15);

        assert_eq!(bins.len(), 15);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        // Max value lands in the last bucket
        assert_eq!(bins[14].count, 1);
        assert!((bins[0].start - 20_000.0).abs() < 1e-9);
        assert!((bins[14].end - 120_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_constant_values_single_bin() {
        let bins = histogram(&[5.0, 5.0, 5.0], 10);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[0].center(), 5.0);
    }
}
