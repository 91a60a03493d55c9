//! Damage intake reported by the collision collaborator.

use hecs::{Entity, World};

use barrage_core::components::{ActorInfo, Health};
use barrage_core::difficulty::DifficultyScalar;
use barrage_core::enums::{BehaviorClass, LifeState};
use barrage_core::events::GameEvent;
use barrage_core::types::{Playfield, Position};
use barrage_patterns::movement::MovementController;
use barrage_patterns::special::SpecialLoadout;
use barrage_patterns::turret::TurretGun;
use barrage_patterns::weapon::WeaponController;

use crate::components::BossBrain;
use crate::systems::boss::apply_transition;

/// Clamp to non-negative and round. Non-finite amounts count as zero.
pub fn sanitize_amount(amount: f32) -> u32 {
    if amount.is_finite() {
        amount.max(0.0).round() as u32
    } else {
        0
    }
}

/// Apply `amount` damage to `entity`. Returns true only on the call that
/// destroys it.
pub fn apply(
    world: &mut World,
    entity: Entity,
    amount: f32,
    now_ms: f64,
    playfield: &Playfield,
    difficulty: &DifficultyScalar,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Ok((info, health, pos, movement, weapon, turret, specials, brain)) = world
        .query_one_mut::<(
            &mut ActorInfo,
            &mut Health,
            &Position,
            &mut MovementController,
            Option<&mut WeaponController>,
            Option<&mut TurretGun>,
            Option<&mut SpecialLoadout>,
            Option<&mut BossBrain>,
        )>(entity)
    else {
        return false;
    };

    if !info.is_active() {
        return false;
    }
    if let Some(brain) = brain.as_ref() {
        if brain.machine.damage_blocked() {
            tracing::debug!(actor = ?info.id, phase = ?brain.machine.phase(), "damage blocked");
            return false;
        }
    }

    let amount = sanitize_amount(amount);
    if amount == 0 {
        return false;
    }
    health.current = health.current.saturating_sub(amount);
    events.push(GameEvent::HealthChanged {
        actor: info.id,
        health: health.current,
        max_health: health.max,
    });
    let destroyed = health.current == 0;

    let mut weapon = weapon;
    if let Some(brain) = brain {
        let transitions = brain.machine.on_damage(now_ms, health.fraction(), destroyed);
        if let Some(weapon) = weapon.as_deref_mut() {
            for transition in transitions {
                apply_transition(
                    info.id,
                    transition,
                    now_ms,
                    playfield,
                    difficulty,
                    movement,
                    weapon,
                    brain,
                    events,
                );
            }
        }
        if destroyed {
            brain.routine.cancel();
        }
    }

    if !destroyed {
        return false;
    }

    info.life = LifeState::Destroyed;
    if let Some(weapon) = weapon {
        weapon.disarm();
    }
    if let Some(gun) = turret {
        gun.disarm();
    }
    if let Some(loadout) = specials {
        loadout.disarm();
    }

    tracing::info!(actor = ?info.id, class = ?info.class, score = info.score_value, "actor destroyed");
    events.push(GameEvent::ActorDestroyed {
        actor: info.id,
        class: info.class,
        score_value: info.score_value,
        position: pos.0,
    });
    if info.class == BehaviorClass::Boss {
        events.push(GameEvent::BossDestroyed {
            actor: info.id,
            score_value: info.score_value,
        });
    }
    true
}
