//! Bespoke boss attack routines.
//!
//! These run on their own timer next to the boss's ordinary weapon. Each
//! phase weights the attacks differently; rage favors combinations.
//! Spiral waves are delayed and queued on the routine so they can be
//! cancelled with the boss.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use barrage_core::constants::*;
use barrage_core::enums::{BossPhase, ProjectileHint};

use crate::aim;
use crate::boss::phase_profile;
use crate::weapon::FireCommand;

/// Vertical spacing between wave-attack muzzles.
const WAVE_SPACING: f32 = 24.0;

/// Total angular spread of the wave attack.
const WAVE_SPREAD: f32 = 0.5;

/// One bespoke attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BossAttack {
    /// `count` bullets evenly spaced around the full circle.
    Radial { count: u32 },
    /// `waves` delayed rings of `per_wave` bullets, each rotated by `step`.
    Spiral { waves: u32, per_wave: u32, step: f32 },
    /// Four bullets along the cardinal directions.
    Cross,
    /// A vertical curtain of `count` bullets fanned toward the left edge.
    Wave { count: u32 },
}

impl BossAttack {
    pub fn name(&self) -> &'static str {
        match self {
            BossAttack::Radial { .. } => "radial",
            BossAttack::Spiral { .. } => "spiral",
            BossAttack::Cross => "cross",
            BossAttack::Wave { .. } => "wave",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Radial,
    Spiral,
    Cross,
    Wave,
}

type Menu = &'static [(&'static [Kind], u32)];

// Weighted attack menus per phase. Each entry fires every kind it lists.
const PHASE1_MENU: Menu = &[(&[Kind::Radial], 4), (&[Kind::Cross], 3), (&[Kind::Wave], 3)];

const PHASE2_MENU: Menu = &[
    (&[Kind::Radial], 3),
    (&[Kind::Spiral], 3),
    (&[Kind::Cross], 2),
    (&[Kind::Wave], 2),
];

const PHASE3_MENU: Menu = &[
    (&[Kind::Radial], 2),
    (&[Kind::Spiral], 4),
    (&[Kind::Cross], 2),
    (&[Kind::Wave], 3),
    (&[Kind::Radial, Kind::Cross], 1),
];

const RAGE_MENU: Menu = &[
    (&[Kind::Radial], 1),
    (&[Kind::Spiral], 1),
    (&[Kind::Radial, Kind::Spiral], 3),
    (&[Kind::Cross, Kind::Wave], 3),
    (&[Kind::Spiral, Kind::Wave], 3),
    (&[Kind::Radial, Kind::Cross, Kind::Wave], 2),
];

fn menu(phase: BossPhase) -> Menu {
    match phase {
        BossPhase::Phase1 => PHASE1_MENU,
        BossPhase::Phase2 => PHASE2_MENU,
        BossPhase::Phase3 => PHASE3_MENU,
        BossPhase::Rage => RAGE_MENU,
        BossPhase::Entry | BossPhase::Retreat => &[],
    }
}

fn parameterize(kind: Kind, phase: BossPhase) -> BossAttack {
    let rage = phase == BossPhase::Rage;
    match kind {
        Kind::Radial => BossAttack::Radial {
            count: match phase {
                BossPhase::Phase1 => 12,
                BossPhase::Rage => 20,
                _ => 16,
            },
        },
        Kind::Spiral => BossAttack::Spiral {
            waves: if rage { 8 } else { 5 },
            per_wave: if rage { 8 } else { 6 },
            step: 0.2,
        },
        Kind::Cross => BossAttack::Cross,
        Kind::Wave => BossAttack::Wave {
            count: if rage { 9 } else { 7 },
        },
    }
}

/// Pick the attacks for one routine cycle in `phase`.
pub fn select_attacks(phase: BossPhase, rng: &mut ChaCha8Rng) -> Vec<BossAttack> {
    let options = menu(phase);
    let Ok(dist) = WeightedIndex::new(options.iter().map(|(_, w)| *w)) else {
        return Vec::new();
    };
    let (kinds, _) = options[dist.sample(rng)];
    kinds.iter().map(|k| parameterize(*k, phase)).collect()
}

/// Speed and damage shared by every bullet of an attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Munition {
    pub speed: f32,
    pub damage: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct ScheduledVolley {
    due_ms: f64,
    angles: Vec<f32>,
    munition: Munition,
    hint: ProjectileHint,
}

/// Delayed volleys owned by one actor. Fired from the actor's position at
/// the time they come due.
#[derive(Debug, Clone, Default)]
pub struct VolleyQueue {
    pending: Vec<ScheduledVolley>,
}

impl VolleyQueue {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn schedule(&mut self, due_ms: f64, angles: Vec<f32>, munition: Munition, hint: ProjectileHint) {
        self.pending.push(ScheduledVolley {
            due_ms,
            angles,
            munition,
            hint,
        });
    }

    /// Fire every volley due at `now_ms` from `origin`.
    pub fn drain_due(&mut self, now_ms: f64, origin: Vec2) -> Vec<FireCommand> {
        let mut shots = Vec::new();
        self.pending.retain(|volley| {
            if volley.due_ms > now_ms {
                return true;
            }
            shots.extend(volley.angles.iter().map(|angle| FireCommand {
                origin,
                angle: *angle,
                speed: volley.munition.speed,
                damage: volley.munition.damage,
                hint: volley.hint,
            }));
            false
        });
        shots
    }

    /// Drop every pending volley. Returns how many were dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

/// Output of one routine tick.
#[derive(Debug, Clone, Default)]
pub struct AttackOutput {
    pub shots: Vec<FireCommand>,
    /// Attacks started this tick.
    pub started: Vec<BossAttack>,
}

/// The boss's attack timer plus its queued spiral waves.
#[derive(Debug, Clone, Default)]
pub struct BossAttackRoutine {
    last_attack_ms: Option<f64>,
    volleys: VolleyQueue,
}

impl BossAttackRoutine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_volleys(&self) -> usize {
        self.volleys.len()
    }

    /// Restart the timer at a phase change and drop queued waves.
    pub fn reset(&mut self, now_ms: f64) -> usize {
        self.last_attack_ms = Some(now_ms);
        self.volleys.cancel()
    }

    pub fn cancel(&mut self) -> usize {
        self.volleys.cancel()
    }

    pub fn tick(
        &mut self,
        now_ms: f64,
        phase: BossPhase,
        origin: Vec2,
        target: Option<Vec2>,
        munition: Munition,
        rng: &mut ChaCha8Rng,
    ) -> AttackOutput {
        let mut out = AttackOutput {
            shots: self.volleys.drain_due(now_ms, origin),
            started: Vec::new(),
        };
        let Some(interval) = phase_profile(phase).attack_interval_ms else {
            return out;
        };
        let last = *self.last_attack_ms.get_or_insert(now_ms);
        if now_ms <= last + interval {
            return out;
        }
        self.last_attack_ms = Some(now_ms);

        for attack in select_attacks(phase, rng) {
            let offset: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            out.shots.extend(self.execute(attack, now_ms, origin, target, offset, munition));
            out.started.push(attack);
        }
        out
    }

    /// Immediate shots of `attack`. Spiral waves after the first are queued.
    pub fn execute(
        &mut self,
        attack: BossAttack,
        now_ms: f64,
        origin: Vec2,
        target: Option<Vec2>,
        offset: f32,
        munition: Munition,
    ) -> Vec<FireCommand> {
        let shot = |origin: Vec2, angle: f32, hint: ProjectileHint| FireCommand {
            origin,
            angle,
            speed: munition.speed,
            damage: munition.damage,
            hint,
        };

        match attack {
            BossAttack::Radial { count } => aim::ring(offset, count)
                .into_iter()
                .map(|a| shot(origin, a, ProjectileHint::Radial))
                .collect(),
            BossAttack::Spiral {
                waves,
                per_wave,
                step,
            } => {
                for wave in 1..waves {
                    let angles = aim::ring(offset + step * wave as f32, per_wave);
                    let due = now_ms + SPIRAL_WAVE_DELAY_MS * wave as f64;
                    self.volleys.schedule(due, angles, munition, ProjectileHint::Spiral);
                }
                if waves == 0 {
                    return Vec::new();
                }
                aim::ring(offset, per_wave)
                    .into_iter()
                    .map(|a| shot(origin, a, ProjectileHint::Spiral))
                    .collect()
            }
            BossAttack::Cross => (0..4)
                .map(|i| shot(origin, FRAC_PI_2 * i as f32, ProjectileHint::Cross))
                .collect(),
            BossAttack::Wave { count } => {
                let center = target.map_or(DEFAULT_FIRE_ANGLE, |t| aim::bearing(origin, t));
                let angles = aim::fan(center, WAVE_SPREAD, count);
                let top = origin.y - WAVE_SPACING * (count.saturating_sub(1)) as f32 / 2.0;
                angles
                    .into_iter()
                    .enumerate()
                    .map(|(i, a)| {
                        let muzzle = Vec2::new(origin.x, top + WAVE_SPACING * i as f32);
                        shot(muzzle, a, ProjectileHint::Wave)
                    })
                    .collect()
            }
        }
    }
}
