//! Actor factory: validates spawn requests and builds actor entities with
//! the component bundle their behavior class calls for.

use glam::Vec2;
use hecs::{Entity, EntityBuilder, World};
use rand_chacha::ChaCha8Rng;

use barrage_core::commands::SpawnOptions;
use barrage_core::components::{ActorInfo, EscortOf, Health};
use barrage_core::constants::BOSS_HOLD_INSET;
use barrage_core::difficulty::DifficultyScalar;
use barrage_core::enums::{BehaviorClass, BossPhase, LifeState};
use barrage_core::error::SpawnError;
use barrage_core::types::{ActorId, Playfield, Position, TargetState, Velocity};
use barrage_patterns::boss::phase_profile;
use barrage_patterns::movement::{Horizontal, MovementController};
use barrage_patterns::profiles::{get_profile, Armament};
use barrage_patterns::special::SpecialLoadout;
use barrage_patterns::turret::TurretGun;
use barrage_patterns::weapon::WeaponController;

use crate::components::BossBrain;

/// A spawn request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidSpawn {
    pub class: BehaviorClass,
    pub position: Vec2,
    pub health_multiplier: f32,
    pub speed_multiplier: f32,
}

/// Shared state every new actor is built against.
pub struct SpawnEnv<'a> {
    pub now_ms: f64,
    pub playfield: Playfield,
    pub difficulty: &'a DifficultyScalar,
    pub rng: &'a mut ChaCha8Rng,
}

/// Check a spawn request at the factory boundary.
pub fn validate(
    class: BehaviorClass,
    x: f32,
    y: f32,
    options: SpawnOptions,
    target: Option<&TargetState>,
    playfield: &Playfield,
    margin: f32,
) -> Result<ValidSpawn, SpawnError> {
    if target.is_none() {
        return Err(SpawnError::MissingTarget { class });
    }
    if !(x.is_finite() && y.is_finite()) {
        return Err(SpawnError::NonFinitePosition { x, y });
    }
    let position = Vec2::new(x, y);
    if !playfield.contains_with_margin(position, margin) {
        return Err(SpawnError::OutOfBounds { x, y });
    }
    let health_multiplier = options.health_multiplier.unwrap_or(1.0);
    if !(health_multiplier.is_finite() && health_multiplier > 0.0) {
        return Err(SpawnError::InvalidHealthMultiplier(health_multiplier));
    }
    let speed_multiplier = options.speed_multiplier.unwrap_or(1.0);
    if !(speed_multiplier.is_finite() && speed_multiplier > 0.0) {
        return Err(SpawnError::InvalidSpeedMultiplier(speed_multiplier));
    }
    Ok(ValidSpawn {
        class,
        position,
        health_multiplier,
        speed_multiplier,
    })
}

/// Build an actor entity for a validated request.
pub fn spawn_actor(
    world: &mut World,
    id: ActorId,
    spawn: ValidSpawn,
    escort_of: Option<ActorId>,
    env: SpawnEnv<'_>,
) -> Entity {
    let profile = get_profile(spawn.class);
    let max_health = (profile.max_health as f32 * spawn.health_multiplier).round() as u32;

    let mut movement =
        MovementController::new(profile.movement_settings(spawn.speed_multiplier, env.rng));
    movement.adjust_for_difficulty(env.difficulty);

    let mut builder = EntityBuilder::new();
    builder.add(ActorInfo {
        id,
        class: spawn.class,
        score_value: profile.score_value,
        visual: profile.visual,
        life: LifeState::Active,
        spawned_at_ms: env.now_ms,
    });
    builder.add(Position(spawn.position));
    builder.add(Velocity::default());
    builder.add(Health::full(max_health));

    match profile.armament {
        Armament::Patterned => {
            let mut weapon = WeaponController::new(profile.weapon_settings(env.rng));
            weapon.adjust_for_difficulty(env.difficulty, env.rng);
            if spawn.class == BehaviorClass::Boss {
                let entry = phase_profile(BossPhase::Entry);
                movement.set_pattern(entry.movement, env.now_ms);
                movement.set_horizontal(Horizontal::Hold {
                    x: env.playfield.max.x - BOSS_HOLD_INSET,
                });
                weapon.set_pattern(entry.weapon);
                weapon.set_base_fire_rate(entry.fire_rate_ms, env.difficulty);
                weapon.set_hold_fire(!entry.weapon_live);
                builder.add(BossBrain::new(env.now_ms));
            }
            builder.add(weapon);
        }
        Armament::Turret => {
            let mut gun = TurretGun::new(profile.fire_rate_ms, profile.bullet_speed, profile.damage);
            gun.adjust_for_difficulty(env.difficulty);
            builder.add(gun);
        }
    }

    if profile.specials {
        builder.add(SpecialLoadout::elite());
    }
    if let Some(boss) = escort_of {
        builder.add(EscortOf(boss));
    }
    builder.add(movement);

    tracing::debug!(?id, class = ?spawn.class, x = spawn.position.x, y = spawn.position.y, "spawned actor");
    world.spawn(builder.build())
}
