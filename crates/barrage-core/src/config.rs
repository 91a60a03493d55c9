//! Encounter configuration.

use serde::{Deserialize, Serialize};

use crate::constants::OFFSCREEN_MARGIN;
use crate::error::ConfigError;
use crate::types::Playfield;

/// Debug visualization switches. Passed in at construction or through the
/// director command channel, never read from global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugOptions {
    /// Include waypoints and aim points in snapshots.
    #[serde(default)]
    pub show_paths: bool,
}

/// Configuration for starting a new encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same encounter.
    pub seed: u64,
    pub playfield: Playfield,
    /// Distance beyond the playfield at which actors and projectiles are removed.
    pub offscreen_margin: f32,
    pub debug: DebugOptions,
    /// Difficulty level at construction.
    pub starting_level: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            playfield: Playfield::default(),
            offscreen_margin: OFFSCREEN_MARGIN,
            debug: DebugOptions::default(),
            starting_level: 1,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.playfield.width(), self.playfield.height());
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidPlayfield { width, height });
        }
        if !self.offscreen_margin.is_finite() || self.offscreen_margin < 0.0 {
            return Err(ConfigError::InvalidMargin(self.offscreen_margin));
        }
        Ok(())
    }
}
