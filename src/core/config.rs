//! Simulator configuration
//!
//! Settings for the prediction and runner layers. The combat rules
//! themselves are fixed and live in `combat::constants`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Configuration for prediction runs and the headless runner
///
/// Every field has a default, so a TOML file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    // === MONTE CARLO ===
    /// Number of simulated battles per prediction
    pub iterations: u32,

    /// Rounds fought per simulated battle before it is scored as a draw
    pub max_rounds: u32,

    /// Seed for the roll source (None = seeded from entropy)
    pub seed: Option<u64>,

    // === BATTLEFIELD ===
    /// Flat avoid bonus granted by the defender's tile
    ///
    /// Applied to both sides' hit rates since the round is fought on a
    /// single shared terrain bundle.
    pub terrain_avoid: i32,

    // === DATA ===
    /// Weapon table override (TOML), replaces the built-in table
    pub weapons_path: Option<PathBuf>,

    /// Class table override (TOML), replaces the built-in table
    pub classes_path: Option<PathBuf>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            max_rounds: 10,
            seed: None,

            terrain_avoid: 0,

            weapons_path: None,
            classes_path: None,
        }
    }
}

impl SimulatorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded simulator config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(SimError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }

        if self.max_rounds == 0 {
            return Err(SimError::InvalidConfig(
                "max_rounds must be at least 1".into(),
            ));
        }

        if self.terrain_avoid < 0 {
            return Err(SimError::InvalidConfig(format!(
                "terrain_avoid ({}) must not be negative",
                self.terrain_avoid
            )));
        }

        Ok(())
    }
}
