//! Fundamental geometric and timing types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in playfield space (pixels). Origin is top-left, y grows down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// 2D velocity (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Stable identifier handed to collaborators for a live actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Stable identifier for a live projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Frame clock handed down by the external tick driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Monotonic time in milliseconds.
    pub now_ms: f64,
    /// Time since the previous frame in milliseconds.
    pub delta_ms: f64,
}

/// The player's current kinematic state, as reported by the input collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetState {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Axis-aligned playfield rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub min: Vec2,
    pub max: Vec2,
}

impl FrameTime {
    pub fn new(now_ms: f64, delta_ms: f64) -> Self {
        Self { now_ms, delta_ms }
    }

    /// Frame delta in seconds, never negative.
    pub fn dt_secs(&self) -> f32 {
        (self.delta_ms.max(0.0) / 1000.0) as f32
    }

    /// Current time in seconds, for oscillators.
    pub fn now_secs(&self) -> f32 {
        (self.now_ms / 1000.0) as f32
    }
}

impl TargetState {
    pub fn stationary(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(
            crate::constants::PLAYFIELD_WIDTH,
            crate::constants::PLAYFIELD_HEIGHT,
        )
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Whether `p` lies inside the playfield grown by `margin` on every side.
    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        p.x >= self.min.x - margin
            && p.x <= self.max.x + margin
            && p.y >= self.min.y - margin
            && p.y <= self.max.y + margin
    }

    /// Clamp a y coordinate so an actor keeps `inset` pixels from the top and bottom edges.
    pub fn clamp_y(&self, y: f32, inset: f32) -> f32 {
        let lo = self.min.y + inset;
        let hi = (self.max.y - inset).max(lo);
        y.clamp(lo, hi)
    }
}
