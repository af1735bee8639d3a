//! Percentile-threshold proximity graphs over point clouds.
//!
//! `proxima` connects points that are close relative to the rest of the
//! cloud:
//!
//! - **Points**: [`PointSet`], validated flat storage; [`PointSet::random_unit_cube`]
//! - **Distances**: [`DistanceMatrix`], [`l2_distance`], [`SymmetricMetric`]
//! - **Graphs**: [`build_graph`], [`GraphBuilder`], [`ProximityGraph`], [`GraphStats`]
//! - **Perturbation**: [`Gravity`], [`select_attractors`]
//! - **Runs**: [`simulate_multiverse`], [`SimulationConfig`]
//!
//! # The Threshold
//!
//! Given N points, the builder computes the full N x N distance matrix, takes
//! the `p`-th percentile of all N² entries (the zero diagonal included) as a
//! threshold, and connects every pair strictly closer than that. Lower `p`
//! gives sparser graphs. Coincident points are always connected.
//!
//! # Randomness
//!
//! Nothing in this crate owns an RNG. Point generation and attractor
//! selection take `&mut impl Rng`, so callers decide between seeded and
//! entropy-backed sources.
//!
//! # Parallelism
//!
//! With the `parallel` feature, [`GraphBuilder::parallel`] computes distance
//! matrix rows with rayon. Results are bit-identical to the sequential path.
//!
//! # Example
//!
//! ```rust
//! use proxima::{GraphBuilder, Gravity, PointSet, select_attractors};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let points = PointSet::random_unit_cube(200, 3, &mut rng).unwrap();
//!
//! let builder = GraphBuilder::new(5.0).unwrap();
//! let mut structure = builder.build(points);
//! assert!(structure.graph().edges().all(|(i, j)| i < j));
//!
//! let attractors = select_attractors(200, 5, &mut rng).unwrap();
//! structure.perturb(&Gravity::default(), &attractors, &builder).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod config;
mod dense;
mod error;
mod graph;
mod gravity;
mod matrix;
mod metric;
mod multiverse;
mod percentile;
mod points;

pub use builder::{build_graph, GraphBuilder, Structure, DEFAULT_PERCENTILE};
pub use config::SimulationConfig;
pub use dense::{l2_distance, l2_distance_squared};
pub use error::{Error, Result};
pub use graph::{GraphStats, ProximityGraph};
pub use gravity::{select_attractors, Gravity};
pub use matrix::DistanceMatrix;
pub use metric::{Euclidean, Manhattan, SymmetricMetric};
pub use multiverse::{simulate_multiverse, Universe};
pub use percentile::{percentile, validate_percentile};
pub use points::PointSet;
