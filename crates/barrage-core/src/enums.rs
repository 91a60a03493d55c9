//! Enumeration types used throughout the encounter core.

use serde::{Deserialize, Serialize};

/// Trajectory generator shared by all non-player actors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    /// Constant horizontal drift.
    #[default]
    Linear,
    /// Fast, sharp vertical oscillation.
    Zigzag,
    /// Vertical orbit around a remembered baseline.
    Circular,
    /// Homing toward the target's y.
    Tracking,
    /// Randomly timed vertical bursts relative to the target.
    Evasive,
    /// Slow, smooth vertical oscillation.
    Sinusoidal,
    /// Eases toward randomly picked y waypoints.
    Random,
}

impl MovementPattern {
    pub const ALL: [MovementPattern; 7] = [
        MovementPattern::Linear,
        MovementPattern::Zigzag,
        MovementPattern::Circular,
        MovementPattern::Tracking,
        MovementPattern::Evasive,
        MovementPattern::Sinusoidal,
        MovementPattern::Random,
    ];
}

/// Firing cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponPattern {
    #[default]
    Single,
    /// Two shots, the second after a short fixed delay.
    Double,
    /// A counted run of fast sub-shots.
    Burst,
    /// A simultaneous fan of shots.
    Spread,
    /// Re-dispatches to single, double or a mini-burst every cycle.
    Random,
}

impl WeaponPattern {
    /// Patterns a `Single` weapon may be upgraded to at high difficulty.
    pub const ADVANCED: [WeaponPattern; 3] =
        [WeaponPattern::Double, WeaponPattern::Burst, WeaponPattern::Spread];
}

/// Behavior class: a named configuration of stats and allowed patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorClass {
    Standard,
    Advanced,
    Elite,
    Turret,
    Boss,
    /// Boss minion spawned while the phase-two shield is up.
    Escort,
}

/// Boss state machine phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossPhase {
    /// Timed fly-in. Invulnerable.
    #[default]
    Entry,
    Phase1,
    Phase2,
    Phase3,
    Rage,
    /// Post-destruction exit. Invulnerable.
    Retreat,
}

impl BossPhase {
    /// Invulnerability is purely a function of phase.
    pub fn is_invulnerable(self) -> bool {
        matches!(self, BossPhase::Entry | BossPhase::Retreat)
    }

    /// Health-driven phases, in the order they are entered.
    pub const COMBAT: [BossPhase; 4] = [
        BossPhase::Phase1,
        BossPhase::Phase2,
        BossPhase::Phase3,
        BossPhase::Rage,
    ];

    /// The next health-driven phase, if any.
    pub fn next_combat(self) -> Option<BossPhase> {
        match self {
            BossPhase::Phase1 => Some(BossPhase::Phase2),
            BossPhase::Phase2 => Some(BossPhase::Phase3),
            BossPhase::Phase3 => Some(BossPhase::Rage),
            BossPhase::Entry | BossPhase::Rage | BossPhase::Retreat => None,
        }
    }
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerSide {
    Player,
    #[default]
    Enemy,
}

/// Cosmetic hint passed through to the renderer with each projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileHint {
    #[default]
    Standard,
    Heavy,
    Turret,
    Radial,
    Spiral,
    Cross,
    Wave,
}

/// Why an actor left the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// Health reached zero.
    Destroyed,
    /// Left the playfield bounds.
    OutOfBounds,
    /// Boss finished its retreat off-field.
    Retreated,
    /// Removed by a collaborator.
    Explicit,
    /// Level teardown.
    Teardown,
}

/// Actor lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeState {
    #[default]
    Active,
    /// Health reached zero; no further damage or fire commands.
    Destroyed,
}
