//! Dense pairwise distance matrices.
//!
//! # Layout
//!
//! ```text
//! data[i * n + j] = distance(point i, point j)
//! ```
//!
//! The full square is stored (not just the condensed upper triangle) because
//! the percentile threshold is taken over every entry, diagonal included.
//!
//! # Symmetry
//!
//! Entry `(i, j)` is always computed as `metric(p_min, p_max)` with
//! `min = min(i, j)`, so `(i, j)` and `(j, i)` are bit-identical even for
//! metrics whose floating-point evaluation is order-sensitive. The sequential
//! and parallel paths therefore agree exactly.

use crate::metric::SymmetricMetric;
use crate::points::PointSet;

/// Symmetric N x N distance matrix with a zero diagonal.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    n: usize,
}

impl DistanceMatrix {
    /// Compute all pairwise distances sequentially.
    ///
    /// Evaluates the metric once per unordered pair and mirrors it.
    ///
    /// # Complexity
    ///
    /// - Time: O(N² · D)
    /// - Space: O(N²)
    ///
    /// # Example
    ///
    /// ```rust
    /// use proxima::{DistanceMatrix, Euclidean, PointSet};
    ///
    /// let points = PointSet::from_rows(&[[0.0, 0.0], [3.0, 4.0]]).unwrap();
    /// let m = DistanceMatrix::compute(&points, &Euclidean);
    /// assert_eq!(m.get(0, 1), 5.0);
    /// assert_eq!(m.get(1, 0), 5.0);
    /// assert_eq!(m.get(1, 1), 0.0);
    /// ```
    pub fn compute<M: SymmetricMetric<f64>>(points: &PointSet, metric: &M) -> Self {
        let n = points.len();
        let mut data = vec![0.0f64; n * n];

        for i in 0..n {
            let pi = points.point(i);
            for j in (i + 1)..n {
                let d = metric.distance(pi, points.point(j));
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        Self { data, n }
    }

    /// Compute all pairwise distances with one rayon task per row.
    ///
    /// Each row is written by exactly one task, so there are no write
    /// conflicts; the result equals [`DistanceMatrix::compute`].
    #[cfg(feature = "parallel")]
    pub fn compute_parallel<M>(points: &PointSet, metric: &M) -> Self
    where
        M: SymmetricMetric<f64> + Sync,
    {
        use rayon::prelude::*;

        let n = points.len();
        let mut data = vec![0.0f64; n * n];

        data.par_chunks_mut(n.max(1))
            .enumerate()
            .for_each(|(i, row)| {
                for (j, slot) in row.iter_mut().enumerate() {
                    *slot = match i.cmp(&j) {
                        std::cmp::Ordering::Equal => 0.0,
                        std::cmp::Ordering::Less => metric.distance(points.point(i), points.point(j)),
                        std::cmp::Ordering::Greater => {
                            metric.distance(points.point(j), points.point(i))
                        }
                    };
                }
            });

        Self { data, n }
    }

    /// Number of points (rows).
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// True for a matrix over zero points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between points `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of range for {}", self.n);
        self.data[i * self.n + j]
    }

    /// All N² entries, row-major.
    #[inline]
    pub fn as_flat(&self) -> &[f64] {
        &self.data
    }

    /// Upper-triangle entries `(i, j, distance)` with `i < j`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.n).flat_map(move |i| ((i + 1)..self.n).map(move |j| (i, j, self.data[i * self.n + j])))
    }

    /// Largest pairwise distance (0.0 for a single point).
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }
}
