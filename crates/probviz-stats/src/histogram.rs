use std::ops::Range;

use serde::Serialize;

/// A histogram of a sample's distribution.
///
/// The range `[min, max]` of the sample is divided into equal-width bins. Every bin
/// is half-open except the last, which also holds values equal to `max`, so each
/// value lands in exactly one bin.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// The bins in ascending order of their range.
    pub bins: Vec<HistogramBin>,
    total: u64,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl HistogramBin {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.range.end - self.range.start
    }
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to bin. Will be sorted internally.
    /// * `num_bins` - The number of equal-width bins.
    ///
    /// # Examples
    ///
    /// ```
    /// # use probviz_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values, 3);
    /// let counts = histogram.bins.iter().map(|bin| bin.count).collect::<Vec<_>>();
    /// assert_eq!(counts, vec![3, 3, 4]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, num_bins)
    }

    /// Creates a histogram from pre-sorted values.
    ///
    /// An empty sample or `num_bins == 0` produces a histogram with no bins. When all
    /// values are equal the range is widened to `[v - 0.5, v + 0.5]`.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], num_bins: usize) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&first), Some(&last)) = (sorted_values.first(), sorted_values.last()) else {
            return Self {
                bins: vec![],
                total: 0,
            };
        };
        if num_bins == 0 {
            return Self {
                bins: vec![],
                total: 0,
            };
        }

        let (min, max) = if last - first > 0.0 {
            (first, last)
        } else {
            (first - 0.5, last + 0.5)
        };
        let range = max - min;

        // Edges are computed from the index rather than accumulated to avoid drift
        let edge = |i: usize| {
            if i == num_bins {
                max
            } else {
                min + range * (i as f64) / (num_bins as f64)
            }
        };
        let mut bins = (0..num_bins)
            .map(|i| HistogramBin {
                range: edge(i)..edge(i + 1),
                count: 0,
            })
            .collect::<Vec<_>>();

        for &val in sorted_values {
            let position = (val - min) / range * num_bins as f64;
            let mut idx = (position.floor() as usize).min(num_bins - 1);
            // Rounding in `position` can disagree with the stored edges by one bin
            if val < bins[idx].range.start && idx > 0 {
                idx -= 1;
            } else if val >= bins[idx].range.end && idx + 1 < num_bins {
                idx += 1;
            }
            bins[idx].count += 1;
        }

        Self {
            bins,
            total: sorted_values.len() as u64,
        }
    }

    /// Number of values binned.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.total
    }

    /// Probability density of each bin: `count / (total * width)`.
    ///
    /// The densities integrate to one over the histogram range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use probviz_stats::histogram::Histogram;
    /// let histogram = Histogram::new([0.0, 1.0, 1.0, 2.0], 2);
    /// assert_eq!(histogram.densities(), vec![0.25, 0.75]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn densities(&self) -> Vec<f64> {
        if self.total == 0 {
            return vec![0.0; self.bins.len()];
        }
        let total = self.total as f64;
        self.bins
            .iter()
            .map(|bin| bin.count as f64 / (total * bin.width()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        let histogram = Histogram::new([], 30);
        assert!(histogram.bins.is_empty());
        assert!(histogram.densities().is_empty());
    }

    #[test]
    fn test_zero_bins() {
        assert!(Histogram::new([1.0, 2.0], 0).bins.is_empty());
    }

    #[test]
    fn test_constant_values() {
        let histogram = Histogram::new([3.0; 7], 4);
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(histogram.bins[0].range.start, 2.5);
        assert_eq!(histogram.bins[3].range.end, 3.5);
        assert_eq!(histogram.bins.iter().map(|b| b.count).sum::<u64>(), 7);
    }

    #[test]
    fn test_every_value_counted_once() {
        let values = (0..1000).map(|i| f64::from(i) * 0.137 - 40.0).collect::<Vec<_>>();
        let histogram = Histogram::new(values.iter().copied(), 30);
        assert_eq!(histogram.bins.len(), 30);
        assert_eq!(histogram.total_count(), 1000);
        assert_eq!(histogram.bins.iter().map(|b| b.count).sum::<u64>(), 1000);
        // Max lands in the closed last bin
        assert!(histogram.bins[29].count > 0);
    }

    #[test]
    fn test_densities_integrate_to_one() {
        let values = (0..500).map(|i| (f64::from(i) * 0.71).sin() * 3.0);
        let histogram = Histogram::new(values, 30);
        let area = histogram
            .bins
            .iter()
            .zip(histogram.densities())
            .map(|(bin, density)| bin.width() * density)
            .sum::<f64>();
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bins_are_contiguous() {
        let histogram = Histogram::new([0.0, 10.0], 7);
        for pair in histogram.bins.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
    }
}
