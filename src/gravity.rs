//! Toy "gravity" perturbation: attractor points pull every other point.
//!
//! For each attractor `b`, in order, with `c` its position at the start of
//! that attractor's pass:
//!
//! ```text
//! d_i  = ||p_i - c||
//! w_i  = strength / (d_i + softening)
//! p_i += w_i * (c - p_i) * step
//! ```
//!
//! Each point moves a fraction `f = strength * step / (d + softening)` of the
//! way to the attractor. With the defaults, points farther than ~1e-3 move
//! strictly closer; nearer ones overshoot. The attractor itself never moves
//! (its offset to `c` is zero). Later attractors see positions already moved
//! by earlier ones.
//!
//! There is no physical model here; this is a deterministic deformation used
//! to exercise rebuilding a graph over moved points.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dense::l2_distance;
use crate::error::{Error, Result};
use crate::points::PointSet;

/// Parameters of the inverse-distance pull.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gravity {
    /// Numerator of the pull weight.
    #[serde(default = "Gravity::default_strength")]
    pub strength: f64,
    /// Scale applied to each displacement.
    #[serde(default = "Gravity::default_step")]
    pub step: f64,
    /// Added to distances so the weight stays finite at zero.
    #[serde(default = "Gravity::default_softening")]
    pub softening: f64,
}

impl Gravity {
    fn default_strength() -> f64 {
        0.1
    }
    fn default_step() -> f64 {
        0.01
    }
    fn default_softening() -> f64 {
        1e-6
    }

    /// Check that these parameters can only yield finite pull weights.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGravity`] if any parameter is non-finite, `softening`
    /// is not positive, or `strength * step` overflows.
    pub fn validate(&self) -> Result<()> {
        if !(self.strength.is_finite() && self.step.is_finite()) {
            return Err(Error::InvalidGravity("strength and step must be finite"));
        }
        if !(self.softening.is_finite() && self.softening > 0.0) {
            return Err(Error::InvalidGravity("softening must be positive"));
        }
        if !(self.strength * self.step).is_finite() {
            return Err(Error::InvalidGravity("strength * step overflows"));
        }
        Ok(())
    }

    /// Pull every point toward each attractor in turn.
    ///
    /// Works on a copy and only writes back once every coordinate is known
    /// to be finite, so on error `points` is unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGravity`] as in [`Gravity::validate`],
    /// [`Error::AttractorOutOfRange`] if any index is `>= points.len()`, and
    /// [`Error::PerturbationOverflow`] if a moved coordinate is not finite
    /// (e.g. coordinates near `f64::MAX`).
    pub fn apply(&self, points: &mut PointSet, attractors: &[usize]) -> Result<()> {
        self.validate()?;
        let len = points.len();
        if let Some(&index) = attractors.iter().find(|&&a| a >= len) {
            return Err(Error::AttractorOutOfRange { index, len });
        }

        let mut moved = points.clone();
        let mut center = vec![0.0; moved.dimension()];

        for &b in attractors {
            center.copy_from_slice(moved.point(b));
            let mut max_shift = 0.0f64;

            for i in 0..len {
                let p = moved.point_mut(i);
                let d = l2_distance(p, &center);
                let scale = self.strength / (d + self.softening) * self.step;

                let mut shift_sq = 0.0;
                for (x, &c) in p.iter_mut().zip(&center) {
                    let delta = scale * (c - *x);
                    *x += delta;
                    shift_sq += delta * delta;
                }
                max_shift = max_shift.max(shift_sq.sqrt());
            }

            trace!(attractor = b, max_shift, "applied attractor");
        }

        let dimension = moved.dimension();
        if let Some(pos) = moved.as_flat().iter().position(|v| !v.is_finite()) {
            return Err(Error::PerturbationOverflow {
                index: pos / dimension,
                axis: pos % dimension,
            });
        }

        debug!(
            attractors = attractors.len(),
            centroid_shift = l2_distance(&points.centroid(), &moved.centroid()),
            "perturbed points"
        );
        *points = moved;
        Ok(())
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            strength: Self::default_strength(),
            step: Self::default_step(),
            softening: Self::default_softening(),
        }
    }
}

/// Choose `k` distinct point indices in `0..n`, uniformly without replacement.
///
/// # Errors
///
/// [`Error::TooManyAttractors`] if `k > n`.
///
/// # Example
///
/// ```rust
/// use proxima::select_attractors;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let picks = select_attractors(100, 5, &mut StdRng::seed_from_u64(42)).unwrap();
/// assert_eq!(picks.len(), 5);
/// assert!(picks.iter().all(|&i| i < 100));
/// ```
pub fn select_attractors<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Result<Vec<usize>> {
    if k > n {
        return Err(Error::TooManyAttractors {
            requested: k,
            available: n,
        });
    }
    Ok(rand::seq::index::sample(rng, n, k).into_vec())
}
