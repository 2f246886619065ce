//! Log2-domain luminance histogram with per-bin maxima.

/// Bin count for percentile searches.
pub(crate) const BINS: usize = 4096;

/// Histogram over `log2(L)` in `[min, max]`.
///
/// Alongside the count, each bin remembers the largest linear value that
/// fell into it, so a percentile read back from the histogram is an upper
/// bound on the true order statistic rather than a bin-centre estimate.
#[derive(Debug, Clone)]
pub(crate) struct LogHistogram {
    counts: Vec<u64>,
    peaks: Vec<f64>,
    min: f64,
    max: f64,
}

impl LogHistogram {
    pub(crate) fn new(min: f64, max: f64) -> Self {
        Self {
            counts: vec![0; BINS],
            peaks: vec![0.0; BINS],
            min,
            max,
        }
    }

    fn bin_for(&self, log_v: f64) -> usize {
        let range = self.max - self.min;
        if range <= 0.0 || log_v <= self.min {
            return 0;
        }
        let t = (log_v - self.min) / range;
        ((t * BINS as f64) as usize).min(BINS - 1)
    }

    /// Adds a linear value (must be positive).
    pub(crate) fn add(&mut self, v: f64) {
        let bin = self.bin_for(v.log2());
        self.counts[bin] += 1;
        if v > self.peaks[bin] {
            self.peaks[bin] = v;
        }
    }

    pub(crate) fn merge(mut self, other: Self) -> Self {
        for i in 0..BINS {
            self.counts[i] += other.counts[i];
            self.peaks[i] = self.peaks[i].max(other.peaks[i]);
        }
        self
    }

    pub(crate) fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Upper bound on the `p`-th percentile (0-100) of the added values.
    ///
    /// The rank is `ceil(n * p / 100)`, clamped to `[1, n]`; the result is the
    /// largest value in the bin holding that rank. `None` when empty.
    pub(crate) fn percentile_upper(&self, p: f64) -> Option<f64> {
        let n = self.total();
        if n == 0 {
            return None;
        }
        // n * 99.9 / 100 can land a hair above an integer
        let rank = ((n as f64 * p / 100.0 - 1e-9).ceil() as u64).clamp(1, n);
        let mut cumulative = 0u64;
        for (count, peak) in self.counts.iter().zip(&self.peaks) {
            cumulative += count;
            if cumulative >= rank {
                return Some(*peak);
            }
        }
        self.peaks.iter().copied().reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_bounds_order_statistic() {
        let values: Vec<f64> = (1..=1000).map(|i| i as f64 * 1e-3).collect();
        let mut h = LogHistogram::new(values[0].log2(), values[999].log2());
        values.iter().for_each(|&v| h.add(v));

        let p = h.percentile_upper(99.9).unwrap();
        assert!(p >= 0.999);
        assert!(p <= 1.0);
        assert_eq!(h.percentile_upper(100.0), Some(1.0));
    }

    #[test]
    fn degenerate_range_uses_single_bin() {
        let mut h = LogHistogram::new(-2.0, -2.0);
        (0..10).for_each(|_| h.add(0.25));
        assert_eq!(h.percentile_upper(50.0), Some(0.25));
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = LogHistogram::new(-4.0, 0.0);
        let mut b = LogHistogram::new(-4.0, 0.0);
        a.add(0.5);
        b.add(0.5);
        b.add(0.9);
        let m = a.merge(b);
        assert_eq!(m.total(), 3);
        assert_eq!(m.percentile_upper(100.0), Some(0.9));
    }

    #[test]
    fn empty_has_no_percentile() {
        assert_eq!(LogHistogram::new(0.0, 1.0).percentile_upper(50.0), None);
    }
}
