//! Dense coordinate-vector kernels.
//!
//! Core operations: L2 distance, squared L2 distance.
//!
//! Point clouds here are low-dimensional (3D by default), so these are plain
//! iterator loops; LLVM auto-vectorizes them well enough at that size.

/// L2 (Euclidean) distance: `sqrt(Σ(a[i] - b[i])²)`.
///
/// # Example
///
/// ```rust
/// use proxima::l2_distance;
///
/// let a = [0.0, 0.0, 0.0];
/// let b = [0.0, 3.0, 4.0];
/// assert!((l2_distance(&a, &b) - 5.0).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
    l2_distance_squared(a, b).sqrt()
}

/// Squared L2 distance: `Σ(a[i] - b[i])²`.
///
/// Cheaper than [`l2_distance`] when only comparing distances.
///
/// # Example
///
/// ```rust
/// use proxima::l2_distance_squared;
///
/// let a = [0.0, 0.0];
/// let b = [3.0, 4.0];
/// assert!((l2_distance_squared(&a, &b) - 25.0).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn l2_distance_squared(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "l2_distance_squared: dimension mismatch");

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}
