//! Dual-barrel rotating gun used by the turret class in place of a
//! `WeaponController`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use barrage_core::constants::*;
use barrage_core::difficulty::DifficultyScalar;
use barrage_core::enums::ProjectileHint;
use barrage_core::types::{FrameTime, TargetState};

use crate::aim;
use crate::weapon::FireCommand;

/// Which barrel fires next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Barrel {
    #[default]
    Left,
    Right,
}

impl Barrel {
    fn other(self) -> Self {
        match self {
            Barrel::Left => Barrel::Right,
            Barrel::Right => Barrel::Left,
        }
    }

    /// Lateral sign relative to the barrel axis.
    fn side(self) -> f32 {
        match self {
            Barrel::Left => -1.0,
            Barrel::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TurretGun {
    angle: f32,
    next_barrel: Barrel,
    base_fire_rate_ms: f64,
    fire_rate_ms: f64,
    base_bullet_speed: f32,
    bullet_speed: f32,
    base_damage: u32,
    damage: u32,
    last_shot_ms: Option<f64>,
    disarmed: bool,
}

impl Default for TurretGun {
    fn default() -> Self {
        Self::new(TURRET_FIRE_RATE_MS, ENEMY_BULLET_SPEED, ENEMY_BULLET_DAMAGE)
    }
}

impl TurretGun {
    pub fn new(fire_rate_ms: f64, bullet_speed: f32, damage: u32) -> Self {
        Self {
            angle: DEFAULT_FIRE_ANGLE,
            next_barrel: Barrel::Left,
            base_fire_rate_ms: fire_rate_ms,
            fire_rate_ms,
            base_bullet_speed: bullet_speed,
            bullet_speed,
            base_damage: damage,
            damage,
            last_shot_ms: None,
            disarmed: false,
        }
    }

    /// Current barrel heading (radians).
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn next_barrel(&self) -> Barrel {
        self.next_barrel
    }

    pub fn fire_rate_ms(&self) -> f64 {
        self.fire_rate_ms
    }

    pub fn disarm(&mut self) {
        self.disarmed = true;
    }

    pub fn adjust_for_difficulty(&mut self, difficulty: &DifficultyScalar) {
        self.fire_rate_ms = difficulty.scale_interval(self.base_fire_rate_ms);
        self.bullet_speed = difficulty.scale_speed(self.base_bullet_speed);
        self.damage = difficulty.scale_damage(self.base_damage);
    }

    /// Muzzle of `barrel` for a turret at `mount` with the current heading.
    pub fn muzzle(&self, mount: Vec2, barrel: Barrel) -> Vec2 {
        let axis = Vec2::from_angle(self.angle);
        let lateral = axis.perp();
        mount + axis * TURRET_BARREL_LENGTH + lateral * TURRET_BARREL_SPACING * barrel.side()
    }

    /// Rotate toward the target and fire once aligned and reloaded.
    pub fn tick(
        &mut self,
        time: FrameTime,
        mount: Vec2,
        target: Option<&TargetState>,
    ) -> Option<FireCommand> {
        if self.disarmed {
            return None;
        }
        let desired = target.map_or(DEFAULT_FIRE_ANGLE, |t| aim::bearing(mount, t.position));
        let max_turn = TURRET_ROTATION_SPEED * time.dt_secs();
        let delta = aim::angle_delta(self.angle, desired);
        self.angle += delta.clamp(-max_turn, max_turn);

        let reloaded = match self.last_shot_ms {
            None => true,
            Some(last) => time.now_ms - last >= self.fire_rate_ms,
        };
        let aligned = aim::angle_delta(self.angle, desired).abs() <= TURRET_AIM_TOLERANCE;
        if target.is_none() || !reloaded || !aligned {
            return None;
        }

        let barrel = self.next_barrel;
        self.next_barrel = barrel.other();
        self.last_shot_ms = Some(time.now_ms);
        Some(FireCommand {
            origin: self.muzzle(mount, barrel),
            angle: self.angle,
            speed: self.bullet_speed,
            damage: self.damage,
            hint: ProjectileHint::Turret,
        })
    }
}
