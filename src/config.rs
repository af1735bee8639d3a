//! Simulation configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration:
//!
//! ```toml
//! points = 1000
//! dimension = 3
//! percentile = 5.0
//! attractors = 5
//! universes = 3
//! points_per_universe = 500
//! seed = 42
//! parallel = false
//!
//! [gravity]
//! strength = 0.1
//! step = 0.01
//! softening = 1e-6
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builder::{GraphBuilder, DEFAULT_PERCENTILE};
use crate::error::{Error, Result};
use crate::gravity::Gravity;
use crate::percentile::validate_percentile;

/// Parameters for a full run: main structure, perturbation and multiverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Points in the main structure.
    #[serde(default = "SimulationConfig::default_points")]
    pub points: usize,
    /// Coordinates per point.
    #[serde(default = "SimulationConfig::default_dimension")]
    pub dimension: usize,
    /// Percentile of the distance distribution used as edge threshold.
    #[serde(default = "SimulationConfig::default_percentile")]
    pub percentile: f64,
    /// Attractors chosen for the perturbation step.
    #[serde(default = "SimulationConfig::default_attractors")]
    pub attractors: usize,
    /// Independent universes generated after the main structure.
    #[serde(default = "SimulationConfig::default_universes")]
    pub universes: usize,
    /// Points in each universe.
    #[serde(default = "SimulationConfig::default_points_per_universe")]
    pub points_per_universe: usize,
    /// Base RNG seed.
    #[serde(default = "SimulationConfig::default_seed")]
    pub seed: u64,
    /// Compute distance matrices in parallel (needs the `parallel` feature).
    #[serde(default)]
    pub parallel: bool,
    /// Perturbation parameters.
    #[serde(default)]
    pub gravity: Gravity,
}

impl SimulationConfig {
    fn default_points() -> usize {
        1000
    }
    fn default_dimension() -> usize {
        3
    }
    fn default_percentile() -> f64 {
        DEFAULT_PERCENTILE
    }
    fn default_attractors() -> usize {
        5
    }
    fn default_universes() -> usize {
        3
    }
    fn default_points_per_universe() -> usize {
        500
    }
    fn default_seed() -> u64 {
        42
    }

    /// Parse from TOML text and validate.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigRead`] if the file cannot be read, [`Error::ConfigParse`]
    /// if it is not valid, [`Error::InvalidConfig`] or
    /// [`Error::PercentileOutOfRange`] for unusable values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Like [`SimulationConfig::load`], but a missing file yields defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        validate_percentile(self.percentile)?;
        if self.points == 0 {
            return Err(Error::InvalidConfig("points must be at least 1".into()));
        }
        if self.dimension == 0 {
            return Err(Error::InvalidConfig("dimension must be at least 1".into()));
        }
        if self.universes > 0 && self.points_per_universe == 0 {
            return Err(Error::InvalidConfig(
                "points_per_universe must be at least 1".into(),
            ));
        }
        if self.attractors > self.points {
            return Err(Error::TooManyAttractors {
                requested: self.attractors,
                available: self.points,
            });
        }
        self.gravity.validate()?;
        Ok(())
    }

    /// Graph builder for this configuration.
    pub fn builder(&self) -> Result<GraphBuilder> {
        Ok(GraphBuilder::new(self.percentile)?.parallel(self.parallel))
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            points: Self::default_points(),
            dimension: Self::default_dimension(),
            percentile: Self::default_percentile(),
            attractors: Self::default_attractors(),
            universes: Self::default_universes(),
            points_per_universe: Self::default_points_per_universe(),
            seed: Self::default_seed(),
            parallel: false,
            gravity: Gravity::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn unique_path(name: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "proxima_config_test_{}_{}.toml",
            name,
            std::process::id()
        ));
        p
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SimulationConfig::from_toml("").unwrap(), SimulationConfig::default());
    }

    #[test]
    fn defaults() {
        let c = SimulationConfig::default();
        assert_eq!(c.points, 1000);
        assert_eq!(c.dimension, 3);
        assert_eq!(c.percentile, 5.0);
        assert_eq!(c.attractors, 5);
        assert_eq!(c.universes, 3);
        assert_eq!(c.points_per_universe, 500);
        assert_eq!(c.seed, 42);
        assert_eq!(c.gravity, Gravity::default());
        c.validate().unwrap();
    }

    #[test]
    fn partial_override() {
        let c = SimulationConfig::from_toml(
            "points = 64\npercentile = 12.5\n[gravity]\nstep = 0.5\n",
        )
        .unwrap();
        assert_eq!(c.points, 64);
        assert_eq!(c.percentile, 12.5);
        assert_eq!(c.gravity.step, 0.5);
        assert_eq!(c.gravity.strength, 0.1);
        assert_eq!(c.universes, 3);
    }

    #[test]
    fn rejects_unknown_field() {
        assert!(matches!(
            SimulationConfig::from_toml("pionts = 5\n"),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn rejects_bad_percentile() {
        assert!(matches!(
            SimulationConfig::from_toml("percentile = 101.0\n"),
            Err(Error::PercentileOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_too_many_attractors() {
        assert!(matches!(
            SimulationConfig::from_toml("points = 3\nattractors = 4\n"),
            Err(Error::TooManyAttractors { .. })
        ));
    }

    #[test]
    fn rejects_overflowing_gravity() {
        assert!(matches!(
            SimulationConfig::from_toml(
                "points = 3\nattractors = 1\n[gravity]\nstrength = 1e300\nstep = 1e300\n"
            ),
            Err(Error::InvalidGravity(_))
        ));
        assert!(matches!(
            SimulationConfig::from_toml("[gravity]\nsoftening = 0.0\n"),
            Err(Error::InvalidGravity(_))
        ));
    }

    #[test]
    fn load_round_trip() {
        let path = unique_path("round_trip");
        let config = SimulationConfig {
            points: 10,
            seed: 7,
            ..SimulationConfig::default()
        };
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = SimulationConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_or_default_missing_file() {
        let path = unique_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(
            SimulationConfig::load_or_default(&path).unwrap(),
            SimulationConfig::default()
        );
        assert!(matches!(
            SimulationConfig::load(&path),
            Err(Error::ConfigRead { .. })
        ));
    }
}
