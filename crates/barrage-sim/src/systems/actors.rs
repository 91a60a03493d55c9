//! Actor system: movement first, then the weapon, turret gun, special
//! attacks and boss attack routine for every actor.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::ActorInfo;
use barrage_core::enums::BossPhase;
use barrage_core::events::GameEvent;
use barrage_core::types::{FrameTime, Playfield, Position, TargetState, Velocity};
use barrage_patterns::attacks::Munition;
use barrage_patterns::movement::{MovementController, MovementInput};
use barrage_patterns::special::{SpecialContext, SpecialLoadout};
use barrage_patterns::turret::TurretGun;
use barrage_patterns::weapon::{WeaponController, WeaponInput};

use crate::components::BossBrain;
use crate::spawner::ProjectileSpawner;

/// Everything the actor pass reads besides the world.
pub struct ActorPass<'a> {
    pub time: FrameTime,
    pub target: Option<TargetState>,
    pub playfield: Playfield,
    pub rng: &'a mut ChaCha8Rng,
    pub spawner: &'a mut ProjectileSpawner,
    pub events: &'a mut Vec<GameEvent>,
}

/// Run the actor system.
pub fn run(world: &mut World, pass: ActorPass<'_>) {
    let ActorPass {
        time,
        target,
        playfield,
        rng,
        spawner,
        events,
    } = pass;
    let dt = time.dt_secs();
    let now = time.now_ms;

    for (_entity, (info, pos, vel, movement, weapon, turret, specials, brain)) in world.query_mut::<(
        &ActorInfo,
        &mut Position,
        &mut Velocity,
        &mut MovementController,
        Option<&mut WeaponController>,
        Option<&mut TurretGun>,
        Option<&mut SpecialLoadout>,
        Option<&mut BossBrain>,
    )>() {
        // A destroyed boss keeps flying its retreat; everything else is inert.
        let retreating = brain
            .as_ref()
            .is_some_and(|b| b.machine.phase() == BossPhase::Retreat);
        if !info.is_active() && !retreating {
            continue;
        }

        let update = movement.tick(
            &MovementInput {
                time,
                position: pos.0,
                target: target.map(|t| t.position),
                playfield,
            },
            rng,
        );
        if let Some((from, to)) = update.pattern_changed {
            events.push(GameEvent::MovementPatternChanged {
                actor: info.id,
                from,
                to,
            });
        }
        vel.0 = update.velocity;
        pos.0 += vel.0 * dt;

        if !info.is_active() {
            continue;
        }

        if let Some(gun) = turret {
            if let Some(shot) = gun.tick(time, pos.0, target.as_ref()) {
                spawner.request(Some(info.id), &shot);
            }
        }

        let Some(weapon) = weapon else {
            continue;
        };
        let input = WeaponInput {
            time,
            origin: pos.0,
            target,
        };
        for shot in weapon.tick(&input, rng) {
            spawner.request(Some(info.id), &shot);
        }

        if let Some(loadout) = specials {
            let mut ctx = SpecialContext {
                now_ms: now,
                position: &mut pos.0,
                target,
                playfield,
                movement: &mut *movement,
                weapon: &mut *weapon,
            };
            if let Some((name, shots)) = loadout.tick(&mut ctx, rng) {
                tracing::debug!(actor = ?info.id, name, "special attack");
                events.push(GameEvent::SpecialAttack {
                    actor: info.id,
                    name: name.to_string(),
                });
                for shot in &shots {
                    spawner.request(Some(info.id), shot);
                }
            }
        }

        if let Some(brain) = brain {
            let munition = Munition {
                speed: weapon.bullet_speed(),
                damage: weapon.damage(),
            };
            let out = brain.routine.tick(
                now,
                brain.machine.phase(),
                pos.0,
                target.map(|t| t.position),
                munition,
                rng,
            );
            for attack in &out.started {
                events.push(GameEvent::SpecialAttack {
                    actor: info.id,
                    name: attack.name().to_string(),
                });
            }
            for shot in &out.shots {
                spawner.request(Some(info.id), shot);
            }
        }
    }
}
