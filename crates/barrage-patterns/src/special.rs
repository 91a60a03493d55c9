//! Elite special attacks.
//!
//! Each attack is a strategy object attached to the actor. Attacks reach
//! the actor's controllers only through their public mutation API.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::constants::*;
use barrage_core::enums::ProjectileHint;
use barrage_core::types::{Playfield, TargetState};

use crate::aim;
use crate::movement::MovementController;
use crate::weapon::{FireCommand, WeaponController};

/// Everything a special attack may touch.
pub struct SpecialContext<'a> {
    pub now_ms: f64,
    pub position: &'a mut Vec2,
    pub target: Option<TargetState>,
    pub playfield: Playfield,
    pub movement: &'a mut MovementController,
    pub weapon: &'a mut WeaponController,
}

pub trait SpecialAttack: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Run the attack and return the shots it fires.
    fn execute(&mut self, ctx: &mut SpecialContext<'_>, rng: &mut ChaCha8Rng) -> Vec<FireCommand>;
}

/// A full ring of bullets around the actor.
#[derive(Debug, Default)]
pub struct RadialBurst;

impl SpecialAttack for RadialBurst {
    fn name(&self) -> &'static str {
        "radial_burst"
    }

    fn execute(&mut self, ctx: &mut SpecialContext<'_>, rng: &mut ChaCha8Rng) -> Vec<FireCommand> {
        let offset = rng.gen_range(0.0..std::f32::consts::TAU);
        aim::ring(offset, ELITE_RADIAL_COUNT)
            .into_iter()
            .map(|angle| FireCommand {
                origin: *ctx.position,
                angle,
                speed: ctx.weapon.bullet_speed(),
                damage: ctx.weapon.damage(),
                hint: ProjectileHint::Radial,
            })
            .collect()
    }
}

/// Jump to a random height and fire an aimed fan.
#[derive(Debug, Default)]
pub struct TeleportStrike;

impl SpecialAttack for TeleportStrike {
    fn name(&self) -> &'static str {
        "teleport_strike"
    }

    fn execute(&mut self, ctx: &mut SpecialContext<'_>, rng: &mut ChaCha8Rng) -> Vec<FireCommand> {
        let lo = ctx.playfield.min.y + RANDOM_WAYPOINT_INSET;
        let hi = (ctx.playfield.max.y - RANDOM_WAYPOINT_INSET).max(lo + 1.0);
        ctx.position.y = rng.gen_range(lo..hi);

        let origin = *ctx.position;
        let weight = ctx.weapon.predictive_aim().then(|| ctx.weapon.predictive_weight());
        let (center, _) =
            aim::firing_angle(origin, ctx.target.as_ref(), ctx.weapon.bullet_speed(), weight);
        aim::fan(center, TELEPORT_VOLLEY_ANGLE, TELEPORT_VOLLEY_COUNT)
            .into_iter()
            .map(|angle| FireCommand {
                origin,
                angle,
                speed: ctx.weapon.bullet_speed(),
                damage: ctx.weapon.damage(),
                hint: ProjectileHint::Heavy,
            })
            .collect()
    }
}

/// Temporarily boost speed and fire rate.
#[derive(Debug, Default)]
pub struct Overdrive;

impl SpecialAttack for Overdrive {
    fn name(&self) -> &'static str {
        "overdrive"
    }

    fn execute(&mut self, ctx: &mut SpecialContext<'_>, _rng: &mut ChaCha8Rng) -> Vec<FireCommand> {
        ctx.movement
            .apply_temporary_modifier(OVERDRIVE_FACTOR, OVERDRIVE_DURATION_MS, ctx.now_ms);
        ctx.weapon
            .apply_temporary_modifier(OVERDRIVE_FACTOR, OVERDRIVE_DURATION_MS, ctx.now_ms);
        Vec::new()
    }
}

/// A set of special attacks on an independent randomized timer.
#[derive(Debug, Default)]
pub struct SpecialLoadout {
    attacks: Vec<Box<dyn SpecialAttack>>,
    last_ms: Option<f64>,
    interval_ms: f64,
    disarmed: bool,
}

impl SpecialLoadout {
    pub fn new(attacks: Vec<Box<dyn SpecialAttack>>) -> Self {
        Self {
            attacks,
            last_ms: None,
            interval_ms: ELITE_SPECIAL_MIN_INTERVAL_MS,
            disarmed: false,
        }
    }

    /// The elite loadout.
    pub fn elite() -> Self {
        Self::new(vec![
            Box::new(RadialBurst),
            Box::new(TeleportStrike),
            Box::new(Overdrive),
        ])
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }

    pub fn disarm(&mut self) {
        self.disarmed = true;
    }

    /// Run one attack when the timer lapses. Returns its name and shots.
    pub fn tick(
        &mut self,
        ctx: &mut SpecialContext<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Option<(&'static str, Vec<FireCommand>)> {
        if self.disarmed || self.attacks.is_empty() {
            return None;
        }
        let now = ctx.now_ms;
        let last = match self.last_ms {
            Some(last) => last,
            None => {
                self.reschedule(now, rng);
                return None;
            }
        };
        if now <= last + self.interval_ms {
            return None;
        }
        self.reschedule(now, rng);

        let index = rng.gen_range(0..self.attacks.len());
        let attack = &mut self.attacks[index];
        let shots = attack.execute(ctx, rng);
        Some((attack.name(), shots))
    }

    fn reschedule(&mut self, now_ms: f64, rng: &mut ChaCha8Rng) {
        self.last_ms = Some(now_ms);
        self.interval_ms =
            rng.gen_range(ELITE_SPECIAL_MIN_INTERVAL_MS..=ELITE_SPECIAL_MAX_INTERVAL_MS);
    }
}
