//! Boss system: advances each boss's phase machine, applies phase
//! profiles, and tracks the escort shield.

use std::collections::HashMap;

use glam::Vec2;
use hecs::World;

use barrage_core::components::{ActorInfo, EscortOf, Health};
use barrage_core::constants::BOSS_HOLD_INSET;
use barrage_core::difficulty::DifficultyScalar;
use barrage_core::enums::BossPhase;
use barrage_core::events::GameEvent;
use barrage_core::types::{ActorId, FrameTime, Playfield, Position};
use barrage_patterns::boss::{phase_profile, BossTransition};
use barrage_patterns::movement::{Horizontal, MovementController};
use barrage_patterns::weapon::WeaponController;

use crate::components::BossBrain;

/// A boss whose shield is armed and waiting for escorts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscortOrder {
    pub boss: ActorId,
    pub position: Vec2,
}

/// Live escorts per boss.
pub fn escorts_alive(world: &World) -> HashMap<ActorId, u32> {
    let mut counts = HashMap::new();
    let mut query = world.query::<(&ActorInfo, &EscortOf)>();
    for (_entity, (info, escort)) in query.iter() {
        if info.is_active() {
            *counts.entry(escort.0).or_insert(0) += 1;
        }
    }
    counts
}

/// Run the boss system. Returns the escort spawns owed this frame.
pub fn run(
    world: &mut World,
    time: FrameTime,
    playfield: &Playfield,
    difficulty: &DifficultyScalar,
    events: &mut Vec<GameEvent>,
) -> Vec<EscortOrder> {
    let counts = escorts_alive(world);
    let mut orders = Vec::new();

    for (_entity, (info, health, pos, movement, weapon, brain)) in world.query_mut::<(
        &ActorInfo,
        &Health,
        &Position,
        &mut MovementController,
        &mut WeaponController,
        &mut BossBrain,
    )>() {
        if !info.is_active() {
            continue;
        }

        // Escorts owed from a transition on an earlier frame.
        let escorts_due = brain.machine.escorts_due();

        let alive = counts.get(&info.id).copied().unwrap_or(0);
        if brain.machine.escorts_remaining(alive as usize) {
            tracing::debug!(actor = ?info.id, "escorts down, shield dropped");
            events.push(GameEvent::ShieldChanged {
                actor: info.id,
                active: false,
            });
        }

        if let Some(transition) = brain.machine.update(time.now_ms, health.fraction()) {
            apply_transition(
                info.id,
                transition,
                time.now_ms,
                playfield,
                difficulty,
                movement,
                weapon,
                brain,
                events,
            );
        }

        // A boss pushed past phase2 this frame no longer wants its escorts.
        if escorts_due && brain.machine.phase() == BossPhase::Phase2 {
            orders.push(EscortOrder {
                boss: info.id,
                position: pos.0,
            });
        }
    }
    orders
}

/// Apply a phase change: swap the pattern pair, retune cadence, restart the
/// attack routine and report it.
#[allow(clippy::too_many_arguments)]
pub fn apply_transition(
    actor: ActorId,
    transition: BossTransition,
    now_ms: f64,
    playfield: &Playfield,
    difficulty: &DifficultyScalar,
    movement: &mut MovementController,
    weapon: &mut WeaponController,
    brain: &mut BossBrain,
    events: &mut Vec<GameEvent>,
) {
    let profile = phase_profile(transition.to);
    tracing::info!(?actor, from = ?transition.from, to = ?transition.to, "boss phase transition");
    events.push(GameEvent::BossPhaseChanged {
        actor,
        from: transition.from,
        to: transition.to,
    });

    let horizontal = match transition.to {
        BossPhase::Retreat => Horizontal::Drift { heading: 1.0 },
        _ => Horizontal::Hold {
            x: playfield.max.x - BOSS_HOLD_INSET,
        },
    };
    movement.set_horizontal(horizontal);
    movement.set_change_pattern_randomly(false);
    let from = movement.set_pattern(profile.movement, now_ms);
    if from != profile.movement {
        events.push(GameEvent::MovementPatternChanged {
            actor,
            from,
            to: profile.movement,
        });
    }

    let from = weapon.set_pattern(profile.weapon);
    if from != profile.weapon {
        events.push(GameEvent::WeaponPatternChanged {
            actor,
            from,
            to: profile.weapon,
        });
    }
    weapon.set_base_fire_rate(profile.fire_rate_ms, difficulty);
    weapon.set_hold_fire(!profile.weapon_live);

    let dropped = brain.routine.reset(now_ms);
    if dropped > 0 {
        tracing::debug!(?actor, dropped, "cancelled queued boss volleys");
    }
}
