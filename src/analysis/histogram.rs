//! Equal-width histogram binning.

use crate::errors::HistogramError;

/// Default number of bins, matching the usual plotting default.
pub const DEFAULT_BINS: usize = 10;

/// Distribution of one metric over equal-width bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
    min: f64,
    max: f64,
}

/// One bin with its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width buckets spanning `[min, max]`.
    ///
    /// All bins are half-open except the last, which includes `max`. A
    /// sample with a single distinct value is centered in a range of
    /// width one.
    pub fn from_values(values: &[f64], bins: usize) -> Result<Self, HistogramError> {
        if bins == 0 {
            return Err(HistogramError::ZeroBins);
        }
        if values.is_empty() {
            return Err(HistogramError::Empty);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(HistogramError::NonFinite);
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let n = bins as f64;
        let span = hi - lo;
        // A range wider than f64::MAX is measured in units of the bin width.
        let overflows = !span.is_finite();
        let width = if overflows { hi / n - lo / n } else { span / n };

        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for &value in values {
            let offset = if overflows {
                value / width - lo / width
            } else {
                (value - lo) / width
            };
            let index = (offset.floor() as usize).min(bins - 1);
            counts[index] += 1;
        }

        Ok(Self {
            edges,
            counts,
            min,
            max,
        })
    }

    /// Bin edges, `bins + 1` values.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of values binned.
    pub fn total(&self) -> usize {
        self.counts().iter().sum()
    }

    /// Smallest observed value.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest observed value.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Height of the tallest bin.
    pub fn peak(&self) -> usize {
        self.counts().iter().copied().max().unwrap_or(0)
    }

    /// Iterate over bins in ascending order.
    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        self.counts.iter().enumerate().map(move |(i, &count)| Bin {
            lower: self.edges[i],
            upper: self.edges[i + 1],
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_sample_size() {
        let values = [1.0, 2.0, 2.5, 3.0, 7.0, 9.0, 10.0];
        let hist = Histogram::from_values(&values, 3).unwrap();

        assert_eq!(hist.counts().len(), 3);
        assert_eq!(hist.edges().len(), 4);
        assert_eq!(hist.total(), values.len());
        assert_eq!(hist.edges()[0], 1.0);
        assert_eq!(hist.edges()[3], 10.0);
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let hist = Histogram::from_values(&[0.0, 5.0, 10.0], 2).unwrap();
        assert_eq!(hist.counts(), &[1, 2]);
    }

    #[test]
    fn test_lower_edge_is_inclusive() {
        let hist = Histogram::from_values(&[0.0, 2.0, 4.0], 2).unwrap();
        // 2.0 sits exactly on the shared edge and belongs to the upper bin.
        assert_eq!(hist.counts(), &[1, 2]);
    }

    #[test]
    fn test_single_distinct_value_is_centered() {
        let hist = Histogram::from_values(&[4.0, 4.0], 10).unwrap();

        assert_eq!(hist.edges()[0], 3.5);
        assert_eq!(hist.edges()[10], 4.5);
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.counts()[5], 2);
        assert_eq!(hist.min(), 4.0);
        assert_eq!(hist.max(), 4.0);
    }

    #[test]
    fn test_peak_and_bins() {
        let hist = Histogram::from_values(&[1.0, 1.0, 1.0, 2.0], 2).unwrap();
        assert_eq!(hist.peak(), 3);

        let bins: Vec<Bin> = hist.bins().collect();
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].lower, 1.0);
        assert_eq!(bins[0].upper, 1.5);
        assert_eq!(bins[1].count, 1);
    }

    #[test]
    fn test_range_wider_than_f64_max() {
        let hist = Histogram::from_values(&[-1e308, 1e308], 2).unwrap();

        assert!(hist.edges().iter().all(|e| e.is_finite()));
        assert_eq!(hist.edges(), &[-1e308, 0.0, 1e308]);
        assert_eq!(hist.counts(), &[1, 1]);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Histogram::from_values(&[], DEFAULT_BINS),
            Err(HistogramError::Empty)
        );
        assert_eq!(
            Histogram::from_values(&[1.0], 0),
            Err(HistogramError::ZeroBins)
        );
        assert_eq!(
            Histogram::from_values(&[1.0, f64::NAN], 2),
            Err(HistogramError::NonFinite)
        );
    }
}
