//! Session configuration.
//!
//! Everything a caller may tune about a game lives in `SessionConfig`:
//! board size, spawn odds, how many tiles a new game starts with, the
//! presentation delay before a move settles, and an optional RNG seed.
//! Configs can be built in code or loaded from TOML:
//!
//! ```
//! use tile_merge::core::SessionConfig;
//!
//! let config = SessionConfig::from_toml_str("size = 5\nseed = 7").unwrap();
//! assert_eq!(config.size, 5);
//! assert_eq!(config.initial_tiles, 2);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::grid::MAX_GRID_SIZE;
use crate::error::ConfigError;

/// Tunable parameters for a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board side length.
    pub size: usize,

    /// Probability a spawned tile is a 4 rather than a 2.
    pub four_probability: f64,

    /// Tiles placed by `start()`.
    pub initial_tiles: usize,

    /// Pause between tiles finishing their slide and the next spawn.
    ///
    /// Pacing only; zero settles every move immediately.
    pub settle_delay_ms: u64,

    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: 4,
            four_probability: 0.2,
            initial_tiles: 2,
            settle_delay_ms: 100,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Create the classic 4×4 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board size.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the chance of spawning a 4.
    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        self.four_probability = probability;
        self
    }

    /// Set how many tiles a new game starts with.
    #[must_use]
    pub fn with_initial_tiles(mut self, count: usize) -> Self {
        self.initial_tiles = count;
        self
    }

    /// Set the settle delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Settle delay as a `Duration`.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_GRID_SIZE).contains(&self.size) {
            return Err(ConfigError::Validation(format!(
                "size must be in 2..={MAX_GRID_SIZE}, got {}",
                self.size
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::Validation(
                "four_probability must be in [0, 1]".into(),
            ));
        }
        if self.initial_tiles > self.size * self.size {
            return Err(ConfigError::Validation(format!(
                "initial_tiles ({}) exceeds cell count ({})",
                self.initial_tiles,
                self.size * self.size
            )));
        }
        Ok(())
    }
}
