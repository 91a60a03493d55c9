//! Snapshot system: builds an `EncounterSnapshot` from the ECS world.
//! Read-only.

use hecs::World;

use barrage_core::components::{ActorInfo, Health, Projectile};
use barrage_core::config::DebugOptions;
use barrage_core::difficulty::DifficultyScalar;
use barrage_core::state::{ActorDebugView, ActorView, BossView, EncounterSnapshot};
use barrage_core::types::{FrameTime, Position, Velocity};
use barrage_patterns::boss::ShieldState;
use barrage_patterns::movement::MovementController;
use barrage_patterns::weapon::WeaponController;

use crate::components::BossBrain;
use crate::systems::boss::escorts_alive;

pub fn build_snapshot(
    world: &World,
    time: FrameTime,
    difficulty: DifficultyScalar,
    debug: DebugOptions,
) -> EncounterSnapshot {
    let escorts = escorts_alive(world);

    let mut actors = Vec::new();
    let mut query = world.query::<(
        &ActorInfo,
        &Position,
        &Velocity,
        &Health,
        &MovementController,
        Option<&WeaponController>,
        Option<&BossBrain>,
    )>();
    for (_entity, (info, pos, vel, health, movement, weapon, brain)) in query.iter() {
        let boss = brain.map(|b| BossView {
            phase: b.machine.phase(),
            invulnerable: b.machine.is_invulnerable(),
            shield_active: b.machine.shield() == ShieldState::Active,
            escorts_alive: escorts.get(&info.id).copied().unwrap_or(0),
        });
        let debug_view = debug.show_paths.then(|| ActorDebugView {
            waypoint_y: movement.waypoint_y(),
            aim_point: weapon.and_then(|w| w.last_aim()),
        });
        actors.push(ActorView {
            id: info.id,
            class: info.class,
            position: pos.0,
            velocity: vel.0,
            health: health.current,
            max_health: health.max,
            life: info.life,
            movement: movement.pattern(),
            weapon: weapon.map(|w| w.pattern()),
            boss,
            debug: debug_view,
        });
    }
    actors.sort_by_key(|a| a.id);

    drop(query);

    let projectiles = {
        let mut query = world.query::<&Projectile>();
        query.iter().count()
    };

    EncounterSnapshot {
        time,
        difficulty,
        actors,
        projectiles,
        debug,
    }
}
