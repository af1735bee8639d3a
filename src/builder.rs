//! Percentile-threshold proximity graph construction.
//!
//! # Algorithm
//!
//! ```text
//! D         = pairwise distance matrix (N x N, zero diagonal)
//! threshold = percentile(all N² entries of D, p)
//! E         = { (i, j) : i < j, D[i][j] < threshold }
//! ```
//!
//! # Diagonal Included
//!
//! The percentile is taken over every matrix entry, including the N zeros on
//! the diagonal and both mirrored copies of each pair. The zeros pull the
//! threshold down: with N points, any `p <= 100 / N` gives a threshold of 0.
//! Callers wanting "the closest p% of pairs" should pick `p` accordingly.
//!
//! # Coincident Points
//!
//! Pairs at distance exactly 0 are always connected, even when the threshold
//! is itself 0 (e.g. two identical points, where every entry is 0).
//!
//! # Complexity
//!
//! - Time: O(N² · D + N² log N) (matrix, then sorting its entries)
//! - Space: O(N²) for the matrix; the graph is O(N + E)

use tracing::debug;

use crate::error::Result;
use crate::graph::{GraphStats, ProximityGraph};
use crate::matrix::DistanceMatrix;
use crate::metric::{Euclidean, SymmetricMetric};
use crate::percentile::{percentile_sorted, validate_percentile};
use crate::points::PointSet;

/// Percentile used when none is given: connect roughly the closest 5%.
pub const DEFAULT_PERCENTILE: f64 = 5.0;

/// Reusable proximity graph builder.
///
/// Holds the percentile, the metric and whether to compute the distance
/// matrix in parallel. Construction validates the percentile, so building
/// from an already-validated [`PointSet`] cannot fail.
///
/// # Example
///
/// ```rust
/// use proxima::{GraphBuilder, PointSet};
///
/// let points = PointSet::from_rows(&[
///     [0.0, 0.0, 0.0],
///     [0.0, 0.0, 1.0],
///     [10.0, 10.0, 10.0],
/// ]).unwrap();
///
/// let structure = GraphBuilder::new(60.0).unwrap().build(points);
/// let edges: Vec<_> = structure.graph().edges().collect();
/// assert_eq!(edges, vec![(0, 1)]);
/// ```
#[derive(Clone, Debug)]
pub struct GraphBuilder<M = Euclidean> {
    percentile: f64,
    metric: M,
    parallel: bool,
}

impl GraphBuilder<Euclidean> {
    /// Euclidean builder at percentile `p`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::PercentileOutOfRange`] if `p` is NaN or outside `[0, 100]`.
    pub fn new(percentile: f64) -> Result<Self> {
        validate_percentile(percentile)?;
        Ok(Self {
            percentile,
            metric: Euclidean,
            parallel: false,
        })
    }
}

impl Default for GraphBuilder<Euclidean> {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_PERCENTILE,
            metric: Euclidean,
            parallel: false,
        }
    }
}

impl<M: SymmetricMetric<f64> + Sync> GraphBuilder<M> {
    /// Swap the distance metric.
    pub fn with_metric<N: SymmetricMetric<f64> + Sync>(self, metric: N) -> GraphBuilder<N> {
        GraphBuilder {
            percentile: self.percentile,
            metric,
            parallel: self.parallel,
        }
    }

    /// Compute the distance matrix with rayon.
    ///
    /// Only takes effect with the `parallel` feature; results are identical
    /// either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The configured percentile.
    #[inline]
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Pairwise distances under this builder's metric.
    pub fn distance_matrix(&self, points: &PointSet) -> DistanceMatrix {
        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                return DistanceMatrix::compute_parallel(points, &self.metric);
            }
        }
        DistanceMatrix::compute(points, &self.metric)
    }

    /// The distance threshold for `matrix` at this builder's percentile.
    pub fn threshold(&self, matrix: &DistanceMatrix) -> f64 {
        let mut sorted = matrix.as_flat().to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        percentile_sorted(&sorted, self.percentile)
    }

    /// Build the graph for `points` and return it with its threshold.
    pub fn graph(&self, points: &PointSet) -> (ProximityGraph, f64) {
        let matrix = self.distance_matrix(points);
        let threshold = self.threshold(&matrix);
        let graph = connect(&matrix, threshold);

        debug!(
            points = points.len(),
            dimension = points.dimension(),
            percentile = self.percentile,
            threshold,
            edges = graph.edge_count(),
            "built proximity graph"
        );

        (graph, threshold)
    }

    /// Build the graph and keep it together with the points it was built from.
    pub fn build(&self, points: PointSet) -> Structure {
        let (graph, threshold) = self.graph(&points);
        Structure {
            points,
            graph,
            threshold,
            percentile: self.percentile,
        }
    }
}

/// Edges for every pair under `threshold`, plus every coincident pair.
fn connect(matrix: &DistanceMatrix, threshold: f64) -> ProximityGraph {
    let pairs = matrix
        .pairs()
        .filter(|&(_, _, d)| d < threshold || d == 0.0)
        .map(|(i, j, _)| (i, j));
    ProximityGraph::from_pairs(matrix.len(), pairs)
}

/// Build a Euclidean proximity graph from raw point rows.
///
/// Validates the rows into a [`PointSet`] and the percentile, then builds.
///
/// # Errors
///
/// [`crate::Error::EmptyPointSet`], [`crate::Error::ZeroDimension`],
/// [`crate::Error::DimensionMismatch`], [`crate::Error::NonFiniteCoordinate`]
/// or [`crate::Error::PercentileOutOfRange`].
///
/// # Example
///
/// ```rust
/// use proxima::build_graph;
///
/// // Identical points are always connected.
/// let s = build_graph(&[[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]], 50.0).unwrap();
/// assert!(s.graph().has_edge(0, 1));
/// ```
pub fn build_graph<R: AsRef<[f64]>>(points: &[R], percentile: f64) -> Result<Structure> {
    let builder = GraphBuilder::new(percentile)?;
    let points = PointSet::from_rows(points)?;
    Ok(builder.build(points))
}

/// A point set together with the proximity graph built from it.
///
/// The graph always corresponds to the current points: the only way to move
/// points ([`Structure::perturb`]) rebuilds the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Structure {
    points: PointSet,
    graph: ProximityGraph,
    threshold: f64,
    percentile: f64,
}

impl Structure {
    /// The points.
    #[inline]
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// The proximity graph over [`Structure::points`].
    #[inline]
    pub fn graph(&self) -> &ProximityGraph {
        &self.graph
    }

    /// Distance threshold the graph was cut at.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Percentile the threshold was taken at.
    #[inline]
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Structural summary of the graph.
    pub fn stats(&self) -> GraphStats {
        GraphStats::of(&self.graph)
    }

    /// Move points toward `attractors` under `gravity`, then rebuild the
    /// graph with `builder`.
    ///
    /// # Errors
    ///
    /// Whatever [`crate::Gravity::apply`] returns: bad gravity parameters, an
    /// attractor that does not name a point, or moved coordinates that are no
    /// longer finite. The structure is left unchanged.
    pub fn perturb<M: SymmetricMetric<f64> + Sync>(
        &mut self,
        gravity: &crate::gravity::Gravity,
        attractors: &[usize],
        builder: &GraphBuilder<M>,
    ) -> Result<()> {
        gravity.apply(&mut self.points, attractors)?;
        let (graph, threshold) = builder.graph(&self.points);
        self.graph = graph;
        self.threshold = threshold;
        self.percentile = builder.percentile();
        Ok(())
    }
}
