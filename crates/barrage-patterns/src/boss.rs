//! Boss phase state machine.
//!
//! Pure data: the machine is fed the clock and the boss's health fraction
//! and reports transitions. The caller applies each phase's pattern pair
//! and spawns escorts when asked to. No ECS dependency.
//!
//! Invulnerability is derived from the current phase alone.

use serde::{Deserialize, Serialize};

use barrage_core::constants::*;
use barrage_core::enums::{BossPhase, MovementPattern, WeaponPattern};

/// A phase change reported by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossTransition {
    pub from: BossPhase,
    pub to: BossPhase,
}

/// Shield raised on entering phase two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShieldState {
    #[default]
    Inactive,
    /// Raised but escorts not yet spawned. Does not block damage.
    Armed,
    /// Escorts are alive. Blocks all damage.
    Active,
}

/// Patterns and cadence bound to a phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseProfile {
    pub movement: MovementPattern,
    pub weapon: WeaponPattern,
    pub fire_rate_ms: f64,
    /// Interval between bespoke attack routines. `None` holds the routine.
    pub attack_interval_ms: Option<f64>,
    /// Whether the ordinary weapon may fire.
    pub weapon_live: bool,
}

/// Get the profile for a phase.
pub fn phase_profile(phase: BossPhase) -> PhaseProfile {
    use MovementPattern as M;
    use WeaponPattern as W;

    let (movement, weapon, fire_rate_ms, attack_interval_ms) = match phase {
        BossPhase::Entry => (M::Linear, W::Spread, 1500.0, None),
        BossPhase::Phase1 => (M::Sinusoidal, W::Spread, 1500.0, Some(4000.0)),
        BossPhase::Phase2 => (M::Circular, W::Burst, 1200.0, Some(3500.0)),
        BossPhase::Phase3 => (M::Tracking, W::Random, 1000.0, Some(3000.0)),
        BossPhase::Rage => (M::Evasive, W::Spread, 600.0, Some(2000.0)),
        BossPhase::Retreat => (M::Linear, W::Single, 1500.0, None),
    };
    PhaseProfile {
        movement,
        weapon,
        fire_rate_ms,
        attack_interval_ms,
        weapon_live: !phase.is_invulnerable(),
    }
}

/// Health fraction at or below which `phase` is entered. Entry and retreat
/// are not health-driven.
pub fn threshold(phase: BossPhase) -> Option<f32> {
    match phase {
        BossPhase::Phase1 => Some(BOSS_PHASE1_THRESHOLD),
        BossPhase::Phase2 => Some(BOSS_PHASE2_THRESHOLD),
        BossPhase::Phase3 => Some(BOSS_PHASE3_THRESHOLD),
        BossPhase::Rage => Some(BOSS_RAGE_THRESHOLD),
        BossPhase::Entry | BossPhase::Retreat => None,
    }
}

/// Per-boss phase machine.
#[derive(Debug, Clone)]
pub struct BossStateMachine {
    phase: BossPhase,
    entered_at_ms: f64,
    shield: ShieldState,
}

impl BossStateMachine {
    pub fn new(now_ms: f64) -> Self {
        Self {
            phase: BossPhase::Entry,
            entered_at_ms: now_ms,
            shield: ShieldState::Inactive,
        }
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn entered_at_ms(&self) -> f64 {
        self.entered_at_ms
    }

    pub fn is_invulnerable(&self) -> bool {
        self.phase.is_invulnerable()
    }

    pub fn shield(&self) -> ShieldState {
        self.shield
    }

    /// True when incoming damage must be rejected.
    pub fn damage_blocked(&self) -> bool {
        self.is_invulnerable() || self.shield == ShieldState::Active
    }

    /// Escorts are owed: the shield is armed and waiting for them.
    pub fn escorts_due(&self) -> bool {
        self.shield == ShieldState::Armed
    }

    /// Record that `count` escorts now exist. Returns the new shield state
    /// if it changed.
    pub fn escorts_spawned(&mut self, count: usize) -> Option<ShieldState> {
        if self.shield != ShieldState::Armed {
            return None;
        }
        self.shield = if count > 0 {
            ShieldState::Active
        } else {
            ShieldState::Inactive
        };
        Some(self.shield)
    }

    /// Drop the shield once every escort is gone. Returns true if it dropped.
    pub fn escorts_remaining(&mut self, alive: usize) -> bool {
        if self.shield == ShieldState::Active && alive == 0 {
            self.shield = ShieldState::Inactive;
            return true;
        }
        false
    }

    /// Per-frame evaluation. Advances at most one phase.
    pub fn update(&mut self, now_ms: f64, health_fraction: f32) -> Option<BossTransition> {
        match self.phase {
            BossPhase::Entry => (now_ms - self.entered_at_ms >= BOSS_ENTRY_DURATION_MS)
                .then(|| self.enter(BossPhase::Phase1, now_ms)),
            BossPhase::Retreat => None,
            _ => self.advance_by_health(now_ms, health_fraction),
        }
    }

    /// Evaluate after damage was applied. A destroying hit walks every
    /// remaining combat phase in order and ends in `Retreat`; otherwise at
    /// most one phase is advanced.
    pub fn on_damage(
        &mut self,
        now_ms: f64,
        health_fraction: f32,
        destroyed: bool,
    ) -> Vec<BossTransition> {
        if self.phase.is_invulnerable() {
            return Vec::new();
        }
        if !destroyed {
            return self.advance_by_health(now_ms, health_fraction).into_iter().collect();
        }

        let mut transitions = Vec::new();
        while let Some(next) = self.phase.next_combat() {
            transitions.push(self.enter(next, now_ms));
        }
        transitions.push(self.enter(BossPhase::Retreat, now_ms));
        transitions
    }

    fn advance_by_health(&mut self, now_ms: f64, health_fraction: f32) -> Option<BossTransition> {
        let next = self.phase.next_combat()?;
        let limit = threshold(next)?;
        (health_fraction <= limit).then(|| self.enter(next, now_ms))
    }

    fn enter(&mut self, phase: BossPhase, now_ms: f64) -> BossTransition {
        let from = self.phase;
        self.phase = phase;
        self.entered_at_ms = now_ms;
        self.shield = if phase == BossPhase::Phase2 {
            ShieldState::Armed
        } else {
            ShieldState::Inactive
        };
        BossTransition { from, to: phase }
    }
}
