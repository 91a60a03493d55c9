//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the pattern
//! controllers and in systems, not here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ActorId, ProjectileId};

/// Hit points. `current` is always within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn full(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Remaining health as a fraction of max.
    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max.max(1) as f32
    }
}

/// Cosmetic hint forwarded to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualHint {
    /// Packed 0xRRGGBB tint.
    pub tint: u32,
    pub scale: f32,
}

/// Identity and lifecycle of a non-player actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorInfo {
    pub id: ActorId,
    pub class: BehaviorClass,
    /// Score awarded on destruction.
    pub score_value: u32,
    pub visual: VisualHint,
    pub life: LifeState,
    /// Time the actor entered the world.
    pub spawned_at_ms: f64,
}

impl ActorInfo {
    pub fn is_active(&self) -> bool {
        self.life == LifeState::Active
    }
}

/// A request to materialize one projectile. Immutable once spawned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    pub origin: Vec2,
    pub velocity: Vec2,
    pub damage: u32,
    pub owner: OwnerSide,
    #[serde(default)]
    pub hint: ProjectileHint,
}

/// A live projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub spec: ProjectileSpec,
    pub spawned_at_ms: f64,
    /// Actor that fired it, if any.
    pub source: Option<ActorId>,
}

/// Marks an actor as an escort bound to a boss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EscortOf(pub ActorId);
