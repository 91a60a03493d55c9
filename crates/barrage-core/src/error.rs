//! Error types for the encounter core.

use thiserror::Error;

use crate::enums::BehaviorClass;

/// A spawn request rejected at the factory boundary. No actor is created.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("cannot spawn {class:?}: no target registered")]
    MissingTarget { class: BehaviorClass },
    #[error("spawn position ({x}, {y}) is not finite")]
    NonFinitePosition { x: f32, y: f32 },
    #[error("spawn position ({x}, {y}) lies outside the playfield")]
    OutOfBounds { x: f32, y: f32 },
    #[error("health multiplier {0} must be finite and positive")]
    InvalidHealthMultiplier(f32),
    #[error("speed multiplier {0} must be finite and positive")]
    InvalidSpeedMultiplier(f32),
}

/// Invalid encounter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("playfield must have positive width and height, got {width}x{height}")]
    InvalidPlayfield { width: f32, height: f32 },
    #[error("offscreen margin {0} must be finite and non-negative")]
    InvalidMargin(f32),
}
