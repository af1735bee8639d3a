//! Point sets: validated, row-major storage for N points of dimension D.
//!
//! # Memory Layout
//!
//! ```text
//! data[i * dimension + d] = point i, coordinate d
//! ```
//!
//! One flat buffer rather than `Vec<Vec<f64>>`: the distance matrix walks
//! points pairwise, and contiguous rows keep that walk sequential.

use rand::Rng;

use crate::error::{Error, Result};

/// An ordered, non-empty set of points sharing one dimension.
///
/// Every coordinate is finite; constructors reject anything else, so
/// downstream distance computations never see NaN.
///
/// # Example
///
/// ```rust
/// use proxima::PointSet;
///
/// let points = PointSet::from_rows(&[
///     vec![0.0, 0.0, 0.0],
///     vec![0.0, 0.0, 1.0],
/// ]).unwrap();
///
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.dimension(), 3);
/// assert_eq!(points.point(1), &[0.0, 0.0, 1.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    /// Coordinates in row-major order: data[i * dimension + d]
    data: Vec<f64>,
    /// Number of points
    len: usize,
    /// Coordinates per point
    dimension: usize,
}

impl PointSet {
    /// Create from row-major points.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPointSet`] for no rows, [`Error::ZeroDimension`] for
    /// empty rows, [`Error::DimensionMismatch`] for ragged rows and
    /// [`Error::NonFiniteCoordinate`] for NaN or infinite values.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyPointSet)?;
        let dimension = first.as_ref().len();
        if dimension == 0 {
            return Err(Error::ZeroDimension);
        }

        let mut data = Vec::with_capacity(dimension * rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dimension {
                return Err(Error::DimensionMismatch {
                    index,
                    expected: dimension,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Self::from_flat(data, dimension)
    }

    /// Create from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// As [`PointSet::from_rows`], plus [`Error::FlatLengthMismatch`] when
    /// `data.len()` is not a multiple of `dimension`.
    pub fn from_flat(data: Vec<f64>, dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::ZeroDimension);
        }
        if data.is_empty() {
            return Err(Error::EmptyPointSet);
        }
        if data.len() % dimension != 0 {
            return Err(Error::FlatLengthMismatch {
                len: data.len(),
                dimension,
            });
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFiniteCoordinate {
                index: pos / dimension,
                axis: pos % dimension,
            });
        }

        let len = data.len() / dimension;
        Ok(Self {
            data,
            len,
            dimension,
        })
    }

    /// Draw `n` points uniformly from the unit cube `[0, 1)^dimension`.
    ///
    /// Randomness comes only from `rng`; seed it for reproducible clouds.
    ///
    /// ```rust
    /// use proxima::PointSet;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let a = PointSet::random_unit_cube(100, 3, &mut StdRng::seed_from_u64(7)).unwrap();
    /// let b = PointSet::random_unit_cube(100, 3, &mut StdRng::seed_from_u64(7)).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn random_unit_cube<R: Rng + ?Sized>(
        n: usize,
        dimension: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::ZeroDimension);
        }
        if n == 0 {
            return Err(Error::EmptyPointSet);
        }
        let data: Vec<f64> = (0..n * dimension).map(|_| rng.gen::<f64>()).collect();
        Self::from_flat(data, dimension)
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a `PointSet` cannot be constructed empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Coordinates per point.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Coordinates of point `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn point(&self, i: usize) -> &[f64] {
        let start = i * self.dimension;
        &self.data[start..start + self.dimension]
    }

    #[inline]
    pub(crate) fn point_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.dimension;
        &mut self.data[start..start + self.dimension]
    }

    /// Iterate points in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dimension)
    }

    /// The flat row-major coordinate buffer.
    #[inline]
    pub fn as_flat(&self) -> &[f64] {
        &self.data
    }

    /// Copy out as one `Vec` per point (allocates).
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter().map(<[f64]>::to_vec).collect()
    }

    /// Per-axis mean of all points.
    pub fn centroid(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.dimension];
        for p in self.iter() {
            for (o, &v) in out.iter_mut().zip(p) {
                *o += v;
            }
        }
        let n = self.len as f64;
        for o in &mut out {
            *o /= n;
        }
        out
    }
}
