//! Tests for the encounter engine: spawning, cadence, damage intake, boss
//! phases, difficulty propagation and cleanup.

use std::collections::HashMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use barrage_core::commands::{DirectorCommand, SpawnOptions};
use barrage_core::components::Projectile;
use barrage_core::config::{DebugOptions, SimConfig};
use barrage_core::constants::*;
use barrage_core::difficulty::{DifficultyChange, DifficultyScalar};
use barrage_core::enums::*;
use barrage_core::error::SpawnError;
use barrage_core::events::GameEvent;
use barrage_core::types::{ActorId, ProjectileId, TargetState};

use crate::engine::EncounterEngine;

const FRAME_MS: f64 = 16.0;

fn engine_with_target(seed: u64, target: Vec2) -> EncounterEngine {
    let mut engine = EncounterEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.set_target(TargetState::stationary(target));
    engine
}

/// Run frames from `start` (inclusive) until `end` (exclusive).
fn run_until(engine: &mut EncounterEngine, start: f64, end: f64) -> f64 {
    let mut t = start;
    while t < end {
        engine.update(t, FRAME_MS);
        t += FRAME_MS;
    }
    t
}

fn boss_phases(events: &[GameEvent]) -> Vec<BossPhase> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::BossPhaseChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect()
}

fn spawn_boss(engine: &mut EncounterEngine, health_multiplier: f32) -> ActorId {
    engine
        .spawn_of_behavior_class(
            BehaviorClass::Boss,
            850.0,
            300.0,
            SpawnOptions {
                health_multiplier: Some(health_multiplier),
                speed_multiplier: None,
            },
        )
        .unwrap()
}

// ---- Determinism ----

fn scripted_run(seed: u64) -> Vec<String> {
    let mut engine = engine_with_target(seed, Vec2::new(120.0, 300.0));
    engine.queue_commands([
        DirectorCommand::Spawn {
            class: BehaviorClass::Standard,
            x: 780.0,
            y: 120.0,
            options: SpawnOptions::default(),
        },
        DirectorCommand::Spawn {
            class: BehaviorClass::Advanced,
            x: 780.0,
            y: 300.0,
            options: SpawnOptions::default(),
        },
        DirectorCommand::Spawn {
            class: BehaviorClass::Elite,
            x: 780.0,
            y: 450.0,
            options: SpawnOptions::default(),
        },
        DirectorCommand::Spawn {
            class: BehaviorClass::Turret,
            x: 780.0,
            y: 560.0,
            options: SpawnOptions::default(),
        },
    ]);

    let mut frames = Vec::new();
    for i in 0..600 {
        let t = i as f64 * FRAME_MS;
        let y = 300.0 + (t as f32 / 500.0).sin() * 150.0;
        engine.set_target(TargetState {
            position: Vec2::new(120.0, y),
            velocity: Vec2::new(0.0, 100.0),
        });
        if i == 300 {
            engine.queue_command(DirectorCommand::SetDifficulty {
                change: DifficultyChange::Level(6),
            });
        }
        engine.update(t, FRAME_MS);
        frames.push(serde_json::to_string(&engine.snapshot()).unwrap());
        frames.push(serde_json::to_string(&engine.drain_events()).unwrap());
    }
    frames
}

#[test]
fn test_determinism_same_seed() {
    assert_eq!(scripted_run(12345), scripted_run(12345), "runs diverged with same seed");
}

#[test]
fn test_determinism_different_seeds() {
    assert_ne!(scripted_run(111), scripted_run(222));
}

// ---- End-to-end scenarios ----

#[test]
fn test_standard_enemy_fires_three_aimed_shots() {
    let target = Vec2::new(100.0, 300.0);
    let mut engine = engine_with_target(7, target);
    let id = engine
        .spawn_of_behavior_class(BehaviorClass::Standard, 700.0, 300.0, SpawnOptions::default())
        .unwrap();
    assert_eq!(engine.difficulty().level, 1);

    let mut seen: HashMap<ProjectileId, Projectile> = HashMap::new();
    let mut t = 0.0;
    while t < 3000.0 {
        engine.update(t, FRAME_MS);
        let mut query = engine.world().query::<&Projectile>();
        for (_entity, projectile) in query.iter() {
            seen.entry(projectile.id).or_insert_with(|| projectile.clone());
        }
        t += FRAME_MS;
    }

    assert!(engine.contains_actor(id));
    assert_eq!(engine.projectiles_spawned(), 3);
    assert_eq!(seen.len(), 3);

    let mut shots: Vec<&Projectile> = seen.values().collect();
    shots.sort_by_key(|p| p.id);
    let times: Vec<f64> = shots.iter().map(|p| p.spawned_at_ms).collect();
    assert_eq!(times, vec![0.0, 1008.0, 2016.0]);

    for shot in shots {
        assert_eq!(shot.spec.damage, ENEMY_BULLET_DAMAGE);
        assert_eq!(shot.spec.owner, OwnerSide::Enemy);
        assert_eq!(shot.source, Some(id));
        let toward = (target - shot.spec.origin).normalize();
        assert!(
            shot.spec.velocity.normalize().dot(toward) > 0.9999,
            "shot not aimed at target"
        );
        assert!((shot.spec.velocity.length() - ENEMY_BULLET_SPEED).abs() < 1e-3);
    }
}

#[test]
fn test_boss_walks_every_phase_and_dies_once() {
    let mut engine = engine_with_target(3, Vec2::new(100.0, 300.0));
    let boss = spawn_boss(&mut engine, 0.1);
    assert_eq!(engine.health(boss).unwrap().max, 200);

    let t = run_until(&mut engine, 0.0, BOSS_ENTRY_DURATION_MS + FRAME_MS);
    assert_eq!(engine.boss_phase(boss), Some(BossPhase::Phase1));

    let results: Vec<bool> = (0..5).map(|_| engine.take_damage(boss, 100.0)).collect();
    assert_eq!(results, vec![false, true, false, false, false]);
    assert_eq!(engine.health(boss).unwrap().current, 0);

    let events = engine.drain_events();
    let destroyed = events
        .iter()
        .filter(|e| matches!(e, GameEvent::ActorDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::BossDestroyed { actor, .. } if *actor == boss)));
    assert_eq!(
        boss_phases(&events),
        vec![
            BossPhase::Phase1,
            BossPhase::Phase2,
            BossPhase::Phase3,
            BossPhase::Rage,
            BossPhase::Retreat
        ]
    );

    // The wreck flies off to the right and is removed as retreated.
    run_until(&mut engine, t, t + 10_000.0);
    assert!(!engine.contains_actor(boss));
    let events = engine.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::ActorRemoved { actor, reason: RemovalReason::Retreated } if *actor == boss
    )));
}

// ---- Damage intake ----

#[test]
fn test_health_monotonic_and_single_destruction() {
    let mut engine = engine_with_target(9, Vec2::new(100.0, 300.0));
    let id = engine
        .spawn_of_behavior_class(
            BehaviorClass::Standard,
            700.0,
            300.0,
            SpawnOptions {
                health_multiplier: Some(10.0),
                speed_multiplier: None,
            },
        )
        .unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut prev = engine.health(id).unwrap().current;
    let mut destructions = 0;
    for i in 0..200 {
        let amount = match i % 7 {
            0 => f32::NAN,
            1 => -25.0,
            _ => rng.gen_range(0.0..20.0),
        };
        if engine.take_damage(id, amount) {
            destructions += 1;
            assert_eq!(engine.health(id).unwrap().current, 0);
        }
        let now = engine.health(id).unwrap().current;
        assert!(now <= prev, "health rose from {prev} to {now}");
        prev = now;
    }
    assert_eq!(destructions, 1);
}

#[test]
fn test_damage_rounded() {
    let mut engine = engine_with_target(9, Vec2::new(100.0, 300.0));
    let id = engine
        .spawn_of_behavior_class(BehaviorClass::Standard, 700.0, 300.0, SpawnOptions::default())
        .unwrap();
    engine.take_damage(id, 4.6);
    assert_eq!(engine.health(id).unwrap().current, 25);
    assert!(!engine.take_damage(id, 0.4));
    assert_eq!(engine.health(id).unwrap().current, 25);
}

#[test]
fn test_boss_invulnerable_during_entry() {
    let mut engine = engine_with_target(4, Vec2::new(100.0, 300.0));
    let boss = spawn_boss(&mut engine, 1.0);
    run_until(&mut engine, 0.0, 1000.0);
    assert_eq!(engine.boss_phase(boss), Some(BossPhase::Entry));
    let before = engine.health(boss).unwrap();
    assert!(!engine.take_damage(boss, 500.0));
    assert_eq!(engine.health(boss).unwrap(), before);
}

#[test]
fn test_boss_holds_fire_during_entry() {
    let mut engine = engine_with_target(4, Vec2::new(100.0, 300.0));
    spawn_boss(&mut engine, 1.0);
    run_until(&mut engine, 0.0, BOSS_ENTRY_DURATION_MS - FRAME_MS);
    assert_eq!(engine.projectiles_spawned(), 0);
    run_until(&mut engine, BOSS_ENTRY_DURATION_MS, BOSS_ENTRY_DURATION_MS + 500.0);
    assert!(engine.projectiles_spawned() > 0);
}

#[test]
fn test_phase_two_shield_and_escorts() {
    let mut engine = engine_with_target(5, Vec2::new(100.0, 300.0));
    let boss = spawn_boss(&mut engine, 0.1);
    let t = run_until(&mut engine, 0.0, BOSS_ENTRY_DURATION_MS + FRAME_MS);

    assert!(!engine.take_damage(boss, 100.0));
    assert_eq!(engine.boss_phase(boss), Some(BossPhase::Phase2));

    // Escorts arrive on the next frame and the shield goes up.
    let t = run_until(&mut engine, t, t + FRAME_MS);
    let snapshot = engine.snapshot();
    let view = snapshot
        .actors
        .iter()
        .find(|a| a.id == boss)
        .and_then(|a| a.boss)
        .unwrap();
    assert!(view.shield_active);
    assert!((BOSS_ESCORT_MIN..=BOSS_ESCORT_MAX).contains(&view.escorts_alive));
    let escorts: Vec<ActorId> = snapshot
        .actors
        .iter()
        .filter(|a| a.class == BehaviorClass::Escort)
        .map(|a| a.id)
        .collect();
    assert_eq!(escorts.len() as u32, view.escorts_alive);

    let health = engine.health(boss).unwrap();
    assert!(!engine.take_damage(boss, 50.0));
    assert_eq!(engine.health(boss).unwrap(), health, "shield must block damage");

    for escort in &escorts {
        assert!(engine.take_damage(*escort, 10_000.0));
    }
    run_until(&mut engine, t, t + FRAME_MS);
    let events = engine.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::ShieldChanged { actor, active: false } if *actor == boss
    )));

    assert!(!engine.take_damage(boss, 50.0));
    assert_eq!(engine.health(boss).unwrap().current, 50);
}

#[test]
fn test_destroyed_actor_never_fires_again() {
    let mut engine = engine_with_target(6, Vec2::new(100.0, 300.0));
    let id = engine
        .spawn_of_behavior_class(BehaviorClass::Elite, 700.0, 300.0, SpawnOptions::default())
        .unwrap();

    let mut t = 0.0;
    while engine.projectiles_spawned() == 0 {
        engine.update(t, FRAME_MS);
        t += FRAME_MS;
        assert!(t < 5000.0, "elite never fired");
    }
    assert!(engine.take_damage(id, 10_000.0));
    let fired = engine.projectiles_spawned();

    run_until(&mut engine, t, t + 5000.0);
    assert_eq!(engine.projectiles_spawned(), fired);
    assert!(!engine.contains_actor(id));
    assert!(engine.drain_events().iter().any(|e| matches!(
        e,
        GameEvent::ActorRemoved { actor, reason: RemovalReason::Destroyed } if *actor == id
    )));
}

// ---- Difficulty ----

#[test]
fn test_difficulty_applied_after_frame_and_monotonic() {
    let mut engine = engine_with_target(8, Vec2::new(100.0, 300.0));
    let id = engine
        .spawn_of_behavior_class(BehaviorClass::Standard, 700.0, 300.0, SpawnOptions::default())
        .unwrap();

    engine.queue_command(DirectorCommand::SetDifficulty {
        change: DifficultyChange::Level(3),
    });
    assert_eq!(engine.difficulty().level, 1, "queued changes wait for the frame");
    engine.update(0.0, FRAME_MS);
    assert_eq!(engine.difficulty().level, 3);

    let events = engine.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::WeaponPatternChanged { actor, from: WeaponPattern::Single, .. } if *actor == id
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::DifficultyChanged { level: 3, .. })));

    engine.set_difficulty(2u32);
    assert_eq!(engine.difficulty().level, 3);
    engine.set_difficulty(DifficultyScalar::from_level(3));
    assert!(
        engine.drain_events().is_empty(),
        "re-applying the same level is silent"
    );
}

#[test]
fn test_spawn_inherits_current_difficulty() {
    let mut engine = engine_with_target(8, Vec2::new(100.0, 300.0));
    engine.set_difficulty(4u32);
    let id = engine
        .spawn_of_behavior_class(BehaviorClass::Advanced, 700.0, 300.0, SpawnOptions::default())
        .unwrap();
    let snapshot = engine.snapshot();
    let view = snapshot.actors.iter().find(|a| a.id == id).unwrap();
    assert!(WeaponPattern::ADVANCED.contains(&view.weapon.unwrap()));
    assert_eq!(snapshot.difficulty.level, 4);
}

// ---- Spawn validation ----

#[test]
fn test_spawn_validation() {
    let mut engine = EncounterEngine::new(SimConfig::default());
    assert_eq!(
        engine.spawn_of_behavior_class(BehaviorClass::Standard, 700.0, 300.0, SpawnOptions::default()),
        Err(SpawnError::MissingTarget {
            class: BehaviorClass::Standard
        })
    );

    engine.set_target(TargetState::stationary(Vec2::new(100.0, 300.0)));
    assert!(matches!(
        engine.spawn_of_behavior_class(BehaviorClass::Standard, f32::NAN, 0.0, SpawnOptions::default()),
        Err(SpawnError::NonFinitePosition { .. })
    ));
    assert!(matches!(
        engine.spawn_of_behavior_class(BehaviorClass::Standard, 2000.0, 300.0, SpawnOptions::default()),
        Err(SpawnError::OutOfBounds { .. })
    ));
    assert!(matches!(
        engine.spawn_of_behavior_class(
            BehaviorClass::Standard,
            700.0,
            300.0,
            SpawnOptions {
                health_multiplier: Some(-1.0),
                speed_multiplier: None
            }
        ),
        Err(SpawnError::InvalidHealthMultiplier(_))
    ));
    assert!(matches!(
        engine.spawn_of_behavior_class(
            BehaviorClass::Standard,
            700.0,
            300.0,
            SpawnOptions {
                health_multiplier: None,
                speed_multiplier: Some(0.0)
            }
        ),
        Err(SpawnError::InvalidSpeedMultiplier(_))
    ));
    assert_eq!(engine.actor_count(), 0);
}

#[test]
fn test_queued_spawn_command() {
    let mut engine = engine_with_target(1, Vec2::new(100.0, 300.0));
    engine.queue_command(DirectorCommand::Spawn {
        class: BehaviorClass::Turret,
        x: 760.0,
        y: 500.0,
        options: SpawnOptions::default(),
    });
    assert_eq!(engine.actor_count(), 0);
    engine.update(0.0, FRAME_MS);
    assert_eq!(engine.actor_count(), 1);
    assert_eq!(engine.snapshot().actors[0].weapon, None);
}

// ---- Cleanup ----

#[test]
fn test_out_of_bounds_removal() {
    let mut engine = engine_with_target(2, Vec2::new(100.0, 300.0));
    let id = engine
        .spawn_of_behavior_class(BehaviorClass::Standard, -95.0, 300.0, SpawnOptions::default())
        .unwrap();
    run_until(&mut engine, 0.0, 500.0);
    assert!(!engine.contains_actor(id));
    assert!(engine.drain_events().iter().any(|e| matches!(
        e,
        GameEvent::ActorRemoved { actor, reason: RemovalReason::OutOfBounds } if *actor == id
    )));
}

#[test]
fn test_projectile_hit_and_expiry() {
    let mut engine = engine_with_target(2, Vec2::new(100.0, 300.0));
    engine
        .spawn_of_behavior_class(BehaviorClass::Standard, 700.0, 300.0, SpawnOptions::default())
        .unwrap();
    engine.update(0.0, FRAME_MS);
    assert_eq!(engine.projectile_count(), 1);

    let id = {
        let mut query = engine.world().query::<&Projectile>();
        query.iter().map(|(_, p)| p.id).next().unwrap()
    };
    assert!(engine.report_projectile_hit(id));
    assert!(!engine.report_projectile_hit(id));
    assert_eq!(engine.projectile_count(), 0);
    assert_eq!(engine.snapshot().projectiles, 0);
}

#[test]
fn test_explicit_remove_and_teardown() {
    let mut engine = engine_with_target(2, Vec2::new(100.0, 300.0));
    let a = engine
        .spawn_of_behavior_class(BehaviorClass::Standard, 700.0, 200.0, SpawnOptions::default())
        .unwrap();
    engine
        .spawn_of_behavior_class(BehaviorClass::Elite, 700.0, 400.0, SpawnOptions::default())
        .unwrap();
    run_until(&mut engine, 0.0, 200.0);

    assert!(engine.remove_actor(a));
    assert!(!engine.remove_actor(a));
    assert!(!engine.take_damage(a, 10.0));

    engine.queue_command(DirectorCommand::Teardown);
    engine.update(200.0, FRAME_MS);
    assert_eq!(engine.actor_count(), 0);
    assert_eq!(engine.projectile_count(), 0);
    let events = engine.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::ActorRemoved { reason: RemovalReason::Explicit, .. }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::ActorRemoved { reason: RemovalReason::Teardown, .. }
    )));
}

// ---- Snapshot ----

#[test]
fn test_debug_paths_in_snapshot() {
    let mut engine = engine_with_target(2, Vec2::new(100.0, 300.0));
    engine
        .spawn_of_behavior_class(BehaviorClass::Standard, 700.0, 300.0, SpawnOptions::default())
        .unwrap();
    engine.update(0.0, FRAME_MS);
    assert!(engine.snapshot().actors[0].debug.is_none());

    engine.queue_command(DirectorCommand::SetDebug {
        options: DebugOptions { show_paths: true },
    });
    engine.update(FRAME_MS, FRAME_MS);
    let snapshot = engine.snapshot();
    let debug = snapshot.actors[0].debug.unwrap();
    assert!(debug.aim_point.is_some());
    assert!(snapshot.debug.show_paths);
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = engine_with_target(2, Vec2::new(100.0, 300.0));
    spawn_boss(&mut engine, 1.0);
    engine.update(0.0, FRAME_MS);
    let json = serde_json::to_string(&engine.snapshot()).unwrap();
    assert!(json.contains("\"phase\":\"entry\""));
    assert!(json.contains("\"class\":\"boss\""));
}

#[test]
fn test_projectile_max_age() {
    let mut world = hecs::World::new();
    let mut spawner = crate::spawner::ProjectileSpawner::new();
    let playfield = barrage_core::types::Playfield::default();
    let resting = barrage_core::components::ProjectileSpec {
        origin: Vec2::new(400.0, 300.0),
        velocity: Vec2::ZERO,
        damage: 5,
        owner: OwnerSide::Enemy,
        hint: ProjectileHint::default(),
    };
    spawner.request_spec(None, resting);
    spawner.request_spec(
        None,
        barrage_core::components::ProjectileSpec {
            velocity: Vec2::new(f32::NAN, 0.0),
            ..resting
        },
    );
    assert_eq!(spawner.flush(&mut world, 0.0), 1, "non-finite shots are dropped");

    let mut expired = Vec::new();
    let frame = |now| barrage_core::types::FrameTime::new(now, FRAME_MS);
    crate::systems::projectiles::run(&mut world, frame(7990.0), &playfield, 100.0, &mut expired);
    assert!(expired.is_empty());
    crate::systems::projectiles::run(
        &mut world,
        frame(PROJECTILE_MAX_AGE_MS),
        &playfield,
        100.0,
        &mut expired,
    );
    assert_eq!(expired.len(), 1);
}

#[test]
fn test_no_escorts_once_boss_skips_past_phase_two() {
    let mut engine = engine_with_target(5, Vec2::new(100.0, 300.0));
    let boss = spawn_boss(&mut engine, 0.1);
    let t = run_until(&mut engine, 0.0, BOSS_ENTRY_DURATION_MS + FRAME_MS);

    // One hit from full health to 20%: the hit itself only reaches phase2,
    // the next frame carries the boss on to phase3.
    assert!(!engine.take_damage(boss, 160.0));
    assert_eq!(engine.boss_phase(boss), Some(BossPhase::Phase2));
    engine.drain_events();

    run_until(&mut engine, t, t + 20.0 * FRAME_MS);
    assert_eq!(engine.boss_phase(boss), Some(BossPhase::Phase3));
    let snapshot = engine.snapshot();
    assert!(snapshot.actors.iter().all(|a| a.class != BehaviorClass::Escort));
    let view = snapshot
        .actors
        .iter()
        .find(|a| a.id == boss)
        .and_then(|a| a.boss)
        .unwrap();
    assert!(!view.shield_active);
    assert!(!engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::ShieldChanged { .. })));
}

#[test]
fn test_same_level_lower_factor_ignored() {
    let mut engine = engine_with_target(8, Vec2::new(100.0, 300.0));
    engine.set_difficulty(3u32);
    engine.drain_events();

    engine.set_difficulty(DifficultyChange::Scalar {
        level: 3,
        factor: 1.0,
    });
    assert_eq!(engine.difficulty(), DifficultyScalar::from_level(3));
    assert!(engine.drain_events().is_empty());

    engine.set_difficulty(DifficultyChange::Scalar {
        level: 3,
        factor: 1.5,
    });
    assert_eq!(engine.difficulty().factor, 1.5);

    // Queued changes keep the hardest one.
    engine.queue_commands([
        DirectorCommand::SetDifficulty {
            change: DifficultyChange::Scalar {
                level: 3,
                factor: 1.8,
            },
        },
        DirectorCommand::SetDifficulty {
            change: DifficultyChange::Scalar {
                level: 3,
                factor: 1.6,
            },
        },
    ]);
    engine.update(0.0, FRAME_MS);
    assert_eq!(engine.difficulty().factor, 1.8);
}
