//! Encounter snapshot: the visible state handed to rendering and debug tooling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::DebugOptions;
use crate::difficulty::DifficultyScalar;
use crate::enums::*;
use crate::types::{ActorId, FrameTime};

/// Complete encounter state after a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub time: FrameTime,
    pub difficulty: DifficultyScalar,
    pub actors: Vec<ActorView>,
    pub projectiles: usize,
    pub debug: DebugOptions,
}

/// One live actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorView {
    pub id: ActorId,
    pub class: BehaviorClass,
    pub position: Vec2,
    pub velocity: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub life: LifeState,
    pub movement: MovementPattern,
    /// `None` for actors with a bespoke gun (turrets).
    pub weapon: Option<WeaponPattern>,
    pub boss: Option<BossView>,
    /// Present only when `DebugOptions::show_paths` is on.
    pub debug: Option<ActorDebugView>,
}

/// Boss-specific state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossView {
    pub phase: BossPhase,
    pub invulnerable: bool,
    pub shield_active: bool,
    pub escorts_alive: u32,
}

/// Path and aim visualization data.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActorDebugView {
    /// Current y waypoint (random pattern) or orbit baseline (circular).
    pub waypoint_y: Option<f32>,
    /// Last point the weapon aimed at.
    pub aim_point: Option<Vec2>,
}
