//! Process-wide difficulty scalar and the shared scaling formulas.
//!
//! Every derived parameter is a pure function of `(base, factor, level)`.
//! Controllers keep their base values and recompute on every change, so
//! applying the same scalar twice never compounds.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_FIRE_INTERVAL_MS;

/// Global difficulty level plus its derived continuous factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyScalar {
    pub level: u32,
    pub factor: f32,
}

/// A difficulty change notification. Collaborators may send either the raw
/// level or the pre-computed object form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DifficultyChange {
    Level(u32),
    Scalar { level: u32, factor: f32 },
}

impl Default for DifficultyScalar {
    fn default() -> Self {
        Self::from_level(1)
    }
}

impl DifficultyScalar {
    /// Build the scalar for `level`. Levels below 1 are treated as 1.
    pub fn from_level(level: u32) -> Self {
        let level = level.max(1);
        Self {
            level,
            factor: factor_for_level(level),
        }
    }

    /// Whether `self` would lower difficulty relative to `current`: a lower
    /// level, or the same level with a smaller factor.
    pub fn is_below(&self, current: &DifficultyScalar) -> bool {
        self.level < current.level || (self.level == current.level && self.factor < current.factor)
    }

    /// Speed scaling: linear in the factor.
    pub fn scale_speed(&self, base: f32) -> f32 {
        base * self.factor
    }

    /// Interval scaling: shorter with difficulty, floored at `MIN_FIRE_INTERVAL_MS`.
    pub fn scale_interval(&self, base_ms: f64) -> f64 {
        (base_ms / self.factor as f64).max(MIN_FIRE_INTERVAL_MS.min(base_ms))
    }

    /// Damage scaling: rounded to whole points, never below 1.
    pub fn scale_damage(&self, base: u32) -> u32 {
        ((base as f32 * self.factor).round() as u32).max(1)
    }

    /// Weight scaling (tracking, predictive aim), capped at `cap`.
    pub fn scale_weight(&self, base: f32, cap: f32) -> f32 {
        (base * self.factor).min(cap)
    }
}

/// `factor = 1 + (level-1)*0.1 + (level-1)^1.5 * 0.01`
pub fn factor_for_level(level: u32) -> f32 {
    let n = level.max(1) as f32 - 1.0;
    1.0 + n * 0.1 + n.powf(1.5) * 0.01
}

impl From<u32> for DifficultyChange {
    fn from(level: u32) -> Self {
        DifficultyChange::Level(level)
    }
}

impl From<DifficultyScalar> for DifficultyChange {
    fn from(scalar: DifficultyScalar) -> Self {
        DifficultyChange::Scalar {
            level: scalar.level,
            factor: scalar.factor,
        }
    }
}

impl From<DifficultyChange> for DifficultyScalar {
    /// A supplied factor is honoured only if it is finite and positive;
    /// otherwise it is recomputed from the level.
    fn from(change: DifficultyChange) -> Self {
        match change {
            DifficultyChange::Level(level) => DifficultyScalar::from_level(level),
            DifficultyChange::Scalar { level, factor } => {
                if factor.is_finite() && factor > 0.0 {
                    DifficultyScalar {
                        level: level.max(1),
                        factor,
                    }
                } else {
                    DifficultyScalar::from_level(level)
                }
            }
        }
    }
}
