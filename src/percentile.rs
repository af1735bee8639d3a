//! Percentiles with linear interpolation between closest ranks.
//!
//! For sorted values `v[0..n]` and percentile `p`:
//!
//! ```text
//! rank = p / 100 * (n - 1)
//! lo   = floor(rank), hi = ceil(rank)
//! q    = v[lo] + (rank - lo) * (v[hi] - v[lo])
//! ```
//!
//! This is the "linear" method (Hyndman & Fan type 7), the usual default in
//! numerical libraries.

use crate::error::{Error, Result};

/// Check that `p` is a usable percentile.
///
/// # Errors
///
/// [`Error::PercentileOutOfRange`] if `p` is NaN or outside `[0, 100]`.
#[inline]
pub fn validate_percentile(p: f64) -> Result<()> {
    if (0.0..=100.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::PercentileOutOfRange(p))
    }
}

/// The `p`-th percentile of `values`.
///
/// Copies and sorts the input; O(n log n).
///
/// # Errors
///
/// [`Error::EmptySample`] for no values, [`Error::NonFiniteSample`] if a
/// value is NaN or infinite, [`Error::PercentileOutOfRange`] for a bad `p`.
///
/// # Example
///
/// ```rust
/// use proxima::percentile;
///
/// let v = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&v, 0.0).unwrap(), 1.0);
/// assert_eq!(percentile(&v, 50.0).unwrap(), 2.5);
/// assert_eq!(percentile(&v, 100.0).unwrap(), 4.0);
/// ```
pub fn percentile(values: &[f64], p: f64) -> Result<f64> {
    validate_percentile(p)?;
    if values.is_empty() {
        return Err(Error::EmptySample);
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(Error::NonFiniteSample { index });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(percentile_sorted(&sorted, p))
}

/// Percentile of already-sorted, non-empty values. No validation.
///
/// Infinite entries are tolerated; they only arise from distances between
/// finite points that overflow.
pub(crate) fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    let (a, b) = (sorted[lo], sorted[hi]);
    if frac > 0.0 && a < b {
        // Clamp so rounding never steps past a neighbour; keeps the result
        // non-decreasing in `p`. `a < b` keeps NaN out of the bounds.
        (a + frac * (b - a)).clamp(a, b)
    } else {
        a
    }
}
