//! Cleanup system: collects actors that have left the playfield or been
//! destroyed. The engine despawns them and reports the removals.

use hecs::{Entity, World};

use barrage_core::components::ActorInfo;
use barrage_core::enums::{BossPhase, RemovalReason};
use barrage_core::types::{ActorId, Playfield, Position};

use crate::components::BossBrain;

/// An actor to remove and why.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Removal {
    pub actor: ActorId,
    pub entity: Entity,
    pub reason: RemovalReason,
}

/// Collect removals into a pre-allocated buffer.
pub fn run(world: &mut World, playfield: &Playfield, margin: f32, removals: &mut Vec<Removal>) {
    removals.clear();

    for (entity, (info, pos, brain)) in
        world.query_mut::<(&ActorInfo, &Position, Option<&BossBrain>)>()
    {
        let retreating = brain.is_some_and(|b| b.machine.phase() == BossPhase::Retreat);
        let reason = if !playfield.contains_with_margin(pos.0, margin) {
            if retreating {
                RemovalReason::Retreated
            } else {
                RemovalReason::OutOfBounds
            }
        } else if !info.is_active() && !retreating {
            RemovalReason::Destroyed
        } else {
            continue;
        };
        removals.push(Removal {
            actor: info.id,
            entity,
            reason,
        });
    }
}
