//! Error types for point-set validation, graph building and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by `proxima`.
///
/// Everything here is an input-validation failure: the computations
/// themselves hold no external resources and cannot fail part-way.
#[derive(Debug, Error)]
pub enum Error {
    /// The point set has no points.
    #[error("point set is empty")]
    EmptyPointSet,

    /// Points were given with zero coordinates.
    #[error("points must have at least one dimension")]
    ZeroDimension,

    /// A point's dimension differs from the first point's.
    #[error("point {index} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        /// Index of the offending point.
        index: usize,
        /// Dimension of point 0.
        expected: usize,
        /// Dimension of the offending point.
        found: usize,
    },

    /// A flat coordinate buffer does not divide into whole points.
    #[error("flat buffer of length {len} does not hold whole points of dimension {dimension}")]
    FlatLengthMismatch {
        /// Buffer length.
        len: usize,
        /// Requested dimension.
        dimension: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("point {index} has a non-finite coordinate on axis {axis}")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
        /// Axis of the offending coordinate.
        axis: usize,
    },

    /// Percentile is NaN or outside `[0, 100]`.
    #[error("percentile {0} is outside [0, 100]")]
    PercentileOutOfRange(f64),

    /// Percentile of an empty sample.
    #[error("cannot take a percentile of no values")]
    EmptySample,

    /// A percentile sample value is NaN or infinite.
    #[error("sample value {index} is not finite")]
    NonFiniteSample {
        /// Index of the offending value.
        index: usize,
    },

    /// Gravity parameters that cannot produce finite positions.
    #[error("invalid gravity: {0}")]
    InvalidGravity(&'static str),

    /// A perturbation pushed a coordinate to NaN or infinity.
    #[error("perturbation left point {index} with a non-finite coordinate on axis {axis}")]
    PerturbationOverflow {
        /// Index of the offending point.
        index: usize,
        /// Axis of the offending coordinate.
        axis: usize,
    },

    /// More attractors requested than there are points.
    #[error("requested {requested} attractors from only {available} points")]
    TooManyAttractors {
        /// Attractors requested.
        requested: usize,
        /// Points available.
        available: usize,
    },

    /// Attractor index does not name a point.
    #[error("attractor index {index} out of range for {len} points")]
    AttractorOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of points.
        len: usize,
    },

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::SimulationConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result alias for `proxima` operations.
pub type Result<T> = std::result::Result<T, Error>;
