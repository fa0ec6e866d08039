//! Percentile ranking against a reference sample.
//!
//! The rank is the standard mid-rank empirical percentile: values below count
//! fully, ties count half. It is symmetric under negation and lands on
//! exactly 50 when the value is the sample median.

/// Mid-rank percentile (0-100) of `value` within `sample`.
///
/// `None` when the sample is empty.
pub fn percentile_rank(value: f64, sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }

    let mut below = 0usize;
    let mut equal = 0usize;
    for &r in sample {
        if r < value {
            below += 1;
        } else if r == value {
            equal += 1;
        }
    }

    Some(100.0 * (below as f64 + 0.5 * equal as f64) / sample.len() as f64)
}

/// Linear-interpolated order statistic at quantile `q` in [0, 1].
///
/// `None` when the sample is empty. The sample does not need to be sorted.
pub fn quantile(sample: &[f64], q: f64) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(quantile_sorted(&sorted, q))
}

/// Quantile of an already ascending-sorted, non-empty sample.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let q = q.clamp(0.0, 1.0);
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = q * (n - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// The interquartile "normal band" (p25, p75) of a sample.
pub fn normal_band(sample: &[f64]) -> Option<(f64, f64)> {
    if sample.is_empty() {
        return None;
    }
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some((quantile_sorted(&sorted, 0.25), quantile_sorted(&sorted, 0.75)))
}
