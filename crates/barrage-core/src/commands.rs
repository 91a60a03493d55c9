//! Director commands sent by the level-scripting collaborator.
//!
//! Commands are queued and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

use crate::config::DebugOptions;
use crate::difficulty::DifficultyChange;
use crate::enums::BehaviorClass;
use crate::types::ActorId;

/// Optional per-spawn stat multipliers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnOptions {
    #[serde(default)]
    pub health_multiplier: Option<f32>,
    #[serde(default)]
    pub speed_multiplier: Option<f32>,
}

/// All possible director actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DirectorCommand {
    /// Spawn an actor of the given behavior class.
    Spawn {
        class: BehaviorClass,
        x: f32,
        y: f32,
        #[serde(default)]
        options: SpawnOptions,
    },
    /// Raise the global difficulty. Applied after all actors have updated.
    SetDifficulty { change: DifficultyChange },
    /// Remove one actor.
    Remove { actor: ActorId },
    /// Remove every actor and projectile.
    Teardown,
    /// Switch debug visualization data on or off.
    SetDebug { options: DebugOptions },
}
