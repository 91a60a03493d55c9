//! Weapon pattern engine.
//!
//! A `WeaponController` turns the frame clock and the target's kinematic
//! state into `FireCommand`s. It never spawns projectiles itself; the
//! caller hands the commands to the projectile spawner.
//!
//! Delayed sub-shots (the second half of a double-tap, the tail of a burst)
//! are owned by the controller and die with it: `disarm` cancels them and
//! a disarmed controller never emits again.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use barrage_core::components::ProjectileSpec;
use barrage_core::constants::*;
use barrage_core::difficulty::DifficultyScalar;
use barrage_core::enums::{OwnerSide, ProjectileHint, WeaponPattern};
use barrage_core::types::{FrameTime, TargetState};

use crate::aim;
use crate::modifier::{current_factor, TemporaryModifier};

/// An instruction to spawn one projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireCommand {
    pub origin: Vec2,
    /// Radians, 0 = +x.
    pub angle: f32,
    pub speed: f32,
    pub damage: u32,
    pub hint: ProjectileHint,
}

impl FireCommand {
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.speed
    }

    pub fn to_spec(&self, owner: OwnerSide) -> ProjectileSpec {
        ProjectileSpec {
            origin: self.origin,
            velocity: self.velocity(),
            damage: self.damage,
            owner,
            hint: self.hint,
        }
    }
}

/// Per-frame input to a weapon controller.
#[derive(Debug, Clone, Copy)]
pub struct WeaponInput {
    pub time: FrameTime,
    /// Muzzle position.
    pub origin: Vec2,
    pub target: Option<TargetState>,
}

/// Construction parameters, usually taken from a behavior profile.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSettings {
    pub pattern: WeaponPattern,
    pub fire_rate_ms: f64,
    pub bullet_speed: f32,
    pub damage: u32,
    pub spread_angle: f32,
    pub spread_count: u32,
    /// Aim predictively regardless of difficulty (elite and boss classes).
    pub predictive_aim: bool,
    pub predictive_weight: f32,
    pub hint: ProjectileHint,
}

impl Default for WeaponSettings {
    fn default() -> Self {
        Self {
            pattern: WeaponPattern::Single,
            fire_rate_ms: 1000.0,
            bullet_speed: ENEMY_BULLET_SPEED,
            damage: ENEMY_BULLET_DAMAGE,
            spread_angle: SPREAD_ANGLE,
            spread_count: SPREAD_COUNT,
            predictive_aim: false,
            predictive_weight: PREDICTIVE_WEIGHT,
            hint: ProjectileHint::Standard,
        }
    }
}

/// An armed run of sub-shots.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Burst {
    remaining: u32,
    next_at_ms: f64,
    interval_ms: f64,
}

/// Per-actor weapon component.
#[derive(Debug, Clone)]
pub struct WeaponController {
    pattern: WeaponPattern,
    upgraded: bool,

    base_fire_rate_ms: f64,
    base_bullet_speed: f32,
    base_damage: u32,
    base_predictive_weight: f32,
    class_predictive: bool,

    // Derived from the base values and the last applied difficulty.
    fire_rate_ms: f64,
    bullet_speed: f32,
    damage: u32,
    predictive_weight: f32,
    predictive_aim: bool,

    spread_angle: f32,
    spread_count: u32,
    hint: ProjectileHint,

    last_shot_ms: Option<f64>,
    delayed: Vec<f64>,
    burst: Option<Burst>,
    hold_fire: bool,
    disarmed: bool,
    modifier: Option<TemporaryModifier>,
    last_aim: Option<Vec2>,
}

impl WeaponController {
    pub fn new(settings: WeaponSettings) -> Self {
        Self {
            pattern: settings.pattern,
            upgraded: false,
            base_fire_rate_ms: settings.fire_rate_ms,
            base_bullet_speed: settings.bullet_speed,
            base_damage: settings.damage,
            base_predictive_weight: settings.predictive_weight,
            class_predictive: settings.predictive_aim,
            fire_rate_ms: settings.fire_rate_ms,
            bullet_speed: settings.bullet_speed,
            damage: settings.damage,
            predictive_weight: settings.predictive_weight,
            predictive_aim: settings.predictive_aim,
            spread_angle: settings.spread_angle,
            spread_count: settings.spread_count,
            hint: settings.hint,
            last_shot_ms: None,
            delayed: Vec::new(),
            burst: None,
            hold_fire: false,
            disarmed: false,
            modifier: None,
            last_aim: None,
        }
    }

    pub fn pattern(&self) -> WeaponPattern {
        self.pattern
    }

    pub fn fire_rate_ms(&self) -> f64 {
        self.fire_rate_ms
    }

    pub fn bullet_speed(&self) -> f32 {
        self.bullet_speed
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn predictive_aim(&self) -> bool {
        self.predictive_aim
    }

    pub fn predictive_weight(&self) -> f32 {
        self.predictive_weight
    }

    pub fn last_aim(&self) -> Option<Vec2> {
        self.last_aim
    }

    pub fn is_disarmed(&self) -> bool {
        self.disarmed
    }

    /// Shots still owed by an armed burst.
    pub fn burst_remaining(&self) -> u32 {
        self.burst.map_or(0, |b| b.remaining)
    }

    /// Delayed sub-shots waiting to fire (double-tap tails and burst shots).
    pub fn pending_sub_shots(&self) -> usize {
        self.delayed.len() + self.burst_remaining() as usize
    }

    /// Switch the pattern used by the next cycle. A sequence already under
    /// way runs to completion first.
    pub fn set_pattern(&mut self, pattern: WeaponPattern) -> WeaponPattern {
        let previous = self.pattern;
        self.pattern = pattern;
        previous
    }

    /// Replace the base fire interval and re-derive it for `difficulty`.
    pub fn set_base_fire_rate(&mut self, fire_rate_ms: f64, difficulty: &DifficultyScalar) {
        self.base_fire_rate_ms = fire_rate_ms;
        self.fire_rate_ms = difficulty.scale_interval(fire_rate_ms);
    }

    /// Suspend or resume the main cadence. Sub-shots already scheduled
    /// still fire; no new cycle starts while holding.
    pub fn set_hold_fire(&mut self, hold: bool) {
        self.hold_fire = hold;
    }

    /// Drop every pending sub-shot. Returns how many were dropped.
    fn cancel(&mut self) -> usize {
        let dropped = self.pending_sub_shots();
        self.delayed.clear();
        self.burst = None;
        dropped
    }

    /// Permanently silence the weapon (owning actor destroyed).
    pub fn disarm(&mut self) -> usize {
        self.disarmed = true;
        let dropped = self.cancel();
        if dropped > 0 {
            tracing::debug!(dropped, "cancelled pending sub-shots");
        }
        dropped
    }

    /// Fire faster by `factor` until `now_ms + duration_ms`.
    pub fn apply_temporary_modifier(&mut self, factor: f32, duration_ms: f64, now_ms: f64) {
        self.modifier = Some(TemporaryModifier::new(factor, now_ms, duration_ms));
    }

    /// Recompute derived parameters from the base values. Above the upgrade
    /// threshold a `Single` weapon is promoted once to an advanced pattern;
    /// the promotion is returned so the caller can signal it.
    pub fn adjust_for_difficulty(
        &mut self,
        difficulty: &DifficultyScalar,
        rng: &mut ChaCha8Rng,
    ) -> Option<(WeaponPattern, WeaponPattern)> {
        self.fire_rate_ms = difficulty.scale_interval(self.base_fire_rate_ms);
        self.bullet_speed = difficulty.scale_speed(self.base_bullet_speed);
        self.damage = difficulty.scale_damage(self.base_damage);
        self.predictive_weight =
            difficulty.scale_weight(self.base_predictive_weight, PREDICTIVE_WEIGHT_MAX);
        self.predictive_aim = self.class_predictive || difficulty.level >= PREDICTIVE_AIM_LEVEL;

        if difficulty.level >= WEAPON_UPGRADE_LEVEL
            && self.pattern == WeaponPattern::Single
            && !self.upgraded
        {
            let advanced = WeaponPattern::ADVANCED;
            let next = advanced[rng.gen_range(0..advanced.len())];
            self.upgraded = true;
            return Some((self.set_pattern(next), next));
        }
        None
    }

    /// Advance one frame and return the shots to spawn.
    pub fn tick(&mut self, input: &WeaponInput, rng: &mut ChaCha8Rng) -> Vec<FireCommand> {
        let mut shots = Vec::new();
        if self.disarmed {
            return shots;
        }
        let now = input.time.now_ms;

        self.fire_due_sub_shots(now, input, &mut shots);

        if !self.hold_fire
            && self.burst.is_none()
            && self.delayed.is_empty()
            && self.cycle_ready(now)
        {
            self.last_shot_ms = Some(now);
            let pattern = self.pattern;
            self.start_cycle(pattern, now, input, rng, &mut shots);
        }
        shots
    }

    fn cycle_ready(&mut self, now: f64) -> bool {
        let speedup = current_factor(&mut self.modifier, now) as f64;
        match self.last_shot_ms {
            None => true,
            Some(last) => now - last >= self.fire_rate_ms / speedup,
        }
    }

    fn start_cycle(
        &mut self,
        pattern: WeaponPattern,
        now: f64,
        input: &WeaponInput,
        rng: &mut ChaCha8Rng,
        shots: &mut Vec<FireCommand>,
    ) {
        match pattern {
            WeaponPattern::Single => shots.push(self.aimed_shot(input)),
            WeaponPattern::Double => {
                shots.push(self.aimed_shot(input));
                self.delayed.push(now + DOUBLE_SHOT_DELAY_MS);
            }
            WeaponPattern::Burst => {
                let count = rng.gen_range(BURST_MIN_SHOTS..=BURST_MAX_SHOTS);
                self.arm_burst(count, now, input, rng, shots);
            }
            WeaponPattern::Spread => {
                let (center, point) = self.aim(input);
                self.last_aim = point;
                for angle in aim::fan(center, self.spread_angle, self.spread_count) {
                    shots.push(self.shot_at(input.origin, angle));
                }
            }
            WeaponPattern::Random => {
                let roll: f64 = rng.gen();
                if roll < 0.4 {
                    self.start_cycle(WeaponPattern::Single, now, input, rng, shots);
                } else if roll < 0.7 {
                    self.start_cycle(WeaponPattern::Double, now, input, rng, shots);
                } else {
                    let count = rng.gen_range(MINI_BURST_MIN_SHOTS..=MINI_BURST_MAX_SHOTS);
                    self.arm_burst(count, now, input, rng, shots);
                }
            }
        }
    }

    /// Fire the first shot of a `count`-shot burst now and arm the rest.
    fn arm_burst(
        &mut self,
        count: u32,
        now: f64,
        input: &WeaponInput,
        rng: &mut ChaCha8Rng,
        shots: &mut Vec<FireCommand>,
    ) {
        shots.push(self.aimed_shot(input));
        if count > 1 {
            let interval_ms = rng.gen_range(BURST_MIN_INTERVAL_MS..=BURST_MAX_INTERVAL_MS);
            self.burst = Some(Burst {
                remaining: count - 1,
                next_at_ms: now + interval_ms,
                interval_ms,
            });
        }
    }

    fn fire_due_sub_shots(&mut self, now: f64, input: &WeaponInput, shots: &mut Vec<FireCommand>) {
        let due = self.delayed.iter().filter(|at| **at <= now).count();
        if due > 0 {
            self.delayed.retain(|at| *at > now);
            for _ in 0..due {
                shots.push(self.aimed_shot(input));
            }
        }

        // A long frame may owe several burst shots; never more than remain.
        while let Some(mut burst) = self.burst {
            if burst.remaining == 0 || burst.next_at_ms > now {
                self.burst = (burst.remaining > 0).then_some(burst);
                break;
            }
            shots.push(self.aimed_shot(input));
            burst.remaining -= 1;
            burst.next_at_ms += burst.interval_ms;
            self.burst = Some(burst);
        }
    }

    fn aim(&self, input: &WeaponInput) -> (f32, Option<Vec2>) {
        let weight = self.predictive_aim.then_some(self.predictive_weight);
        aim::firing_angle(input.origin, input.target.as_ref(), self.bullet_speed, weight)
    }

    fn aimed_shot(&mut self, input: &WeaponInput) -> FireCommand {
        let (angle, point) = self.aim(input);
        self.last_aim = point;
        self.shot_at(input.origin, angle)
    }

    fn shot_at(&self, origin: Vec2, angle: f32) -> FireCommand {
        FireCommand {
            origin,
            angle,
            speed: self.bullet_speed,
            damage: self.damage,
            hint: self.hint,
        }
    }
}
