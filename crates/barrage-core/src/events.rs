//! Events emitted by the encounter core for scoring, level logic and
//! cosmetic feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::ActorId;

/// Everything collaborators can observe about a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Damage was applied.
    HealthChanged {
        actor: ActorId,
        health: u32,
        max_health: u32,
    },
    /// Health reached zero. Emitted exactly once per actor.
    ActorDestroyed {
        actor: ActorId,
        class: BehaviorClass,
        score_value: u32,
        position: Vec2,
    },
    /// A boss was destroyed; used by level-completion logic.
    BossDestroyed { actor: ActorId, score_value: u32 },
    /// An actor left the world.
    ActorRemoved {
        actor: ActorId,
        reason: RemovalReason,
    },
    /// Cosmetic: movement pattern switched.
    MovementPatternChanged {
        actor: ActorId,
        from: MovementPattern,
        to: MovementPattern,
    },
    /// Cosmetic: weapon pattern switched.
    WeaponPatternChanged {
        actor: ActorId,
        from: WeaponPattern,
        to: WeaponPattern,
    },
    BossPhaseChanged {
        actor: ActorId,
        from: BossPhase,
        to: BossPhase,
    },
    ShieldChanged { actor: ActorId, active: bool },
    /// An elite executed a special attack.
    SpecialAttack { actor: ActorId, name: String },
    DifficultyChanged { level: u32, factor: f32 },
}
