//! Time-boxed multipliers applied to a controller from outside.
//!
//! This is the only way an owning actor (or one of its special attacks)
//! may change a controller's speed or cadence; internals stay private.

use serde::{Deserialize, Serialize};

/// A multiplier that lapses at `until_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemporaryModifier {
    pub factor: f32,
    pub until_ms: f64,
}

impl TemporaryModifier {
    pub fn new(factor: f32, now_ms: f64, duration_ms: f64) -> Self {
        Self {
            factor: if factor.is_finite() && factor > 0.0 { factor } else { 1.0 },
            until_ms: now_ms + duration_ms.max(0.0),
        }
    }

    pub fn is_active(&self, now_ms: f64) -> bool {
        now_ms < self.until_ms
    }
}

/// Resolve an optional modifier at `now_ms`, clearing it once it has lapsed.
pub fn current_factor(slot: &mut Option<TemporaryModifier>, now_ms: f64) -> f32 {
    match slot {
        Some(m) if m.is_active(now_ms) => m.factor,
        Some(_) => {
            *slot = None;
            1.0
        }
        None => 1.0,
    }
}
