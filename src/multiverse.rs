//! Several independently generated structures.
//!
//! Universe `i` draws its points from `StdRng::seed_from_u64(seed + i)`, so a
//! run is reproducible from one seed while universes still differ from each
//! other.

use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::builder::{GraphBuilder, Structure};
use crate::error::Result;
use crate::metric::SymmetricMetric;
use crate::points::PointSet;

/// One generated structure and the seed it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    /// Position in the run, from 0.
    pub index: usize,
    /// Seed of this universe's RNG.
    pub seed: u64,
    /// Points and their proximity graph.
    pub structure: Structure,
}

/// Generate `count` universes of `points` random points each.
///
/// # Errors
///
/// [`crate::Error::EmptyPointSet`] if `points == 0`,
/// [`crate::Error::ZeroDimension`] if `dimension == 0`.
///
/// # Example
///
/// ```rust
/// use proxima::{simulate_multiverse, GraphBuilder};
///
/// let builder = GraphBuilder::new(5.0).unwrap();
/// let universes = simulate_multiverse(3, 100, 3, &builder, 42).unwrap();
/// assert_eq!(universes.len(), 3);
/// assert_ne!(universes[0].structure.points(), universes[1].structure.points());
/// ```
pub fn simulate_multiverse<M: SymmetricMetric<f64> + Sync>(
    count: usize,
    points: usize,
    dimension: usize,
    builder: &GraphBuilder<M>,
    seed: u64,
) -> Result<Vec<Universe>> {
    (0..count)
        .map(|index| {
            let seed = seed.wrapping_add(index as u64);
            let mut rng = StdRng::seed_from_u64(seed);
            let structure = builder.build(PointSet::random_unit_cube(points, dimension, &mut rng)?);

            info!(
                universe = index,
                seed,
                edges = structure.graph().edge_count(),
                threshold = structure.threshold(),
                "generated universe"
            );

            Ok(Universe {
                index,
                seed,
                structure,
            })
        })
        .collect()
}
