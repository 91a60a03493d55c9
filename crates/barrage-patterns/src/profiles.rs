//! Behavior-class profiles.
//!
//! Every actor is the same composition of a movement controller and an
//! armament; the class only decides which patterns it may use and its
//! base stats.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::VisualHint;
use barrage_core::constants::*;
use barrage_core::enums::{BehaviorClass, MovementPattern, ProjectileHint, WeaponPattern};

use crate::movement::MovementSettings;
use crate::weapon::WeaponSettings;

/// What an actor fires with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Armament {
    /// An ordinary `WeaponController`.
    Patterned,
    /// The dual-barrel rotating gun.
    Turret,
}

/// Behavioral profile for a behavior class.
#[derive(Debug, Clone)]
pub struct BehaviorProfile {
    pub class: BehaviorClass,
    pub max_health: u32,
    /// Base speed (px/s) before difficulty scaling.
    pub speed: f32,
    pub score_value: u32,
    pub visual: VisualHint,
    /// Movement patterns the class may use.
    pub movement: &'static [MovementPattern],
    pub change_pattern_randomly: bool,
    pub tracking_factor: f32,
    pub armament: Armament,
    /// Weapon patterns the class may use. Empty for turrets.
    pub weapons: &'static [WeaponPattern],
    pub fire_rate_ms: f64,
    pub bullet_speed: f32,
    pub damage: u32,
    pub predictive_aim: bool,
    pub predictive_weight: f32,
    pub hint: ProjectileHint,
    /// Runs elite special attacks on their own timer.
    pub specials: bool,
}

impl BehaviorProfile {
    /// Movement settings with an initial pattern drawn from the allowed set.
    pub fn movement_settings(&self, speed_multiplier: f32, rng: &mut ChaCha8Rng) -> MovementSettings {
        let initial = self
            .movement
            .choose(rng)
            .copied()
            .unwrap_or(MovementPattern::Linear);
        MovementSettings {
            base_speed: self.speed * speed_multiplier,
            allowed: self.movement.to_vec(),
            initial,
            tracking_factor: self.tracking_factor,
            change_pattern_randomly: self.change_pattern_randomly,
            change_interval_ms: PATTERN_CHANGE_INTERVAL_MS,
        }
    }

    /// Weapon settings with an initial pattern drawn from the allowed set.
    pub fn weapon_settings(&self, rng: &mut ChaCha8Rng) -> WeaponSettings {
        let pattern = self
            .weapons
            .choose(rng)
            .copied()
            .unwrap_or(WeaponPattern::Single);
        WeaponSettings {
            pattern,
            fire_rate_ms: self.fire_rate_ms,
            bullet_speed: self.bullet_speed,
            damage: self.damage,
            spread_angle: SPREAD_ANGLE,
            spread_count: SPREAD_COUNT,
            predictive_aim: self.predictive_aim,
            predictive_weight: self.predictive_weight,
            hint: self.hint,
        }
    }
}

/// Get the behavioral profile for a given class.
pub fn get_profile(class: BehaviorClass) -> BehaviorProfile {
    use MovementPattern as M;
    use WeaponPattern as W;

    match class {
        BehaviorClass::Standard => BehaviorProfile {
            class,
            max_health: 30,
            speed: 120.0,
            score_value: 100,
            visual: VisualHint { tint: 0xff5544, scale: 1.0 },
            movement: &[M::Linear, M::Zigzag, M::Circular],
            change_pattern_randomly: false,
            tracking_factor: TRACKING_FACTOR,
            armament: Armament::Patterned,
            weapons: &[W::Single],
            fire_rate_ms: 1000.0,
            bullet_speed: ENEMY_BULLET_SPEED,
            damage: ENEMY_BULLET_DAMAGE,
            predictive_aim: false,
            predictive_weight: PREDICTIVE_WEIGHT,
            hint: ProjectileHint::Standard,
            specials: false,
        },
        BehaviorClass::Advanced => BehaviorProfile {
            class,
            max_health: 60,
            speed: 150.0,
            score_value: 250,
            visual: VisualHint { tint: 0xffaa22, scale: 1.15 },
            movement: &[M::Zigzag, M::Circular, M::Tracking, M::Sinusoidal],
            change_pattern_randomly: true,
            tracking_factor: TRACKING_FACTOR,
            armament: Armament::Patterned,
            weapons: &W::ADVANCED,
            fire_rate_ms: 1400.0,
            bullet_speed: ENEMY_BULLET_SPEED * 1.1,
            damage: ENEMY_BULLET_DAMAGE,
            predictive_aim: false,
            predictive_weight: PREDICTIVE_WEIGHT,
            hint: ProjectileHint::Standard,
            specials: false,
        },
        BehaviorClass::Elite => BehaviorProfile {
            class,
            max_health: 120,
            speed: 170.0,
            score_value: 500,
            visual: VisualHint { tint: 0xcc44ff, scale: 1.3 },
            movement: &[M::Tracking, M::Evasive, M::Sinusoidal, M::Random],
            change_pattern_randomly: true,
            tracking_factor: TRACKING_FACTOR * 1.5,
            armament: Armament::Patterned,
            weapons: &[W::Burst, W::Spread, W::Random],
            fire_rate_ms: 1800.0,
            bullet_speed: ENEMY_BULLET_SPEED * 1.2,
            damage: ENEMY_BULLET_DAMAGE + 5,
            predictive_aim: true,
            predictive_weight: PREDICTIVE_WEIGHT,
            hint: ProjectileHint::Heavy,
            specials: true,
        },
        BehaviorClass::Turret => BehaviorProfile {
            class,
            max_health: 80,
            speed: 40.0,
            score_value: 200,
            visual: VisualHint { tint: 0x88aacc, scale: 1.2 },
            movement: &[M::Linear],
            change_pattern_randomly: false,
            tracking_factor: TRACKING_FACTOR,
            armament: Armament::Turret,
            weapons: &[],
            fire_rate_ms: TURRET_FIRE_RATE_MS,
            bullet_speed: ENEMY_BULLET_SPEED,
            damage: ENEMY_BULLET_DAMAGE,
            predictive_aim: false,
            predictive_weight: PREDICTIVE_WEIGHT,
            hint: ProjectileHint::Turret,
            specials: false,
        },
        // Boss patterns are driven by the phase machine.
        BehaviorClass::Boss => BehaviorProfile {
            class,
            max_health: 2000,
            speed: 60.0,
            score_value: 5000,
            visual: VisualHint { tint: 0xff2266, scale: 2.5 },
            movement: &[M::Linear],
            change_pattern_randomly: false,
            tracking_factor: TRACKING_FACTOR,
            armament: Armament::Patterned,
            weapons: &[W::Spread],
            fire_rate_ms: 1500.0,
            bullet_speed: ENEMY_BULLET_SPEED,
            damage: ENEMY_BULLET_DAMAGE + 5,
            predictive_aim: true,
            predictive_weight: PREDICTIVE_WEIGHT,
            hint: ProjectileHint::Heavy,
            specials: false,
        },
        BehaviorClass::Escort => BehaviorProfile {
            class,
            max_health: 25,
            speed: 140.0,
            score_value: 50,
            visual: VisualHint { tint: 0xff88aa, scale: 0.8 },
            movement: &[M::Tracking, M::Sinusoidal],
            change_pattern_randomly: true,
            tracking_factor: TRACKING_FACTOR,
            armament: Armament::Patterned,
            weapons: &[W::Single],
            fire_rate_ms: 1600.0,
            bullet_speed: ENEMY_BULLET_SPEED,
            damage: ENEMY_BULLET_DAMAGE,
            predictive_aim: false,
            predictive_weight: PREDICTIVE_WEIGHT,
            hint: ProjectileHint::Standard,
            specials: false,
        },
    }
}
