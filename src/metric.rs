//! Metric trait surface.
//!
//! The graph builder is written against [`SymmetricMetric`] so other
//! distances can be plugged in; [`Euclidean`] is the default.

use crate::dense::l2_distance;

/// A symmetric distance metric.
///
/// Implementations must satisfy `distance(a, b) == distance(b, a)` and
/// `distance(a, a) == 0`; the distance matrix only evaluates the upper
/// triangle and mirrors it.
pub trait SymmetricMetric<T> {
    /// Compute the (symmetric) distance between `a` and `b`.
    fn distance(&self, a: &[T], b: &[T]) -> T;
}

/// Euclidean (L2) distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl SymmetricMetric<f64> for Euclidean {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        l2_distance(a, b)
    }
}

/// Manhattan (L1) distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl SymmetricMetric<f64> for Manhattan {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "manhattan: dimension mismatch");
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }
}
