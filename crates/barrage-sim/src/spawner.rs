//! Projectile spawner: the single shared sink every actor fires into.
//!
//! Fire commands are queued during the actor pass and materialized as
//! entities afterwards. Actors may append but never clear another actor's
//! projectiles; only the engine retires them.

use std::collections::HashMap;

use hecs::{Entity, World};

use barrage_core::components::{Projectile, ProjectileSpec};
use barrage_core::enums::OwnerSide;
use barrage_core::types::{ActorId, Position, ProjectileId, Velocity};
use barrage_patterns::weapon::FireCommand;

#[derive(Debug, Default)]
pub struct ProjectileSpawner {
    next_id: u32,
    queued: Vec<(Option<ActorId>, ProjectileSpec)>,
    live: HashMap<ProjectileId, Entity>,
    total_spawned: u64,
}

impl ProjectileSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an enemy shot fired by `source`.
    pub fn request(&mut self, source: Option<ActorId>, command: &FireCommand) {
        tracing::trace!(
            ?source,
            x = command.origin.x,
            y = command.origin.y,
            angle = command.angle,
            damage = command.damage,
            "fire"
        );
        self.request_spec(source, command.to_spec(OwnerSide::Enemy));
    }

    /// Queue an arbitrary projectile.
    pub fn request_spec(&mut self, source: Option<ActorId>, spec: ProjectileSpec) {
        if !(spec.origin.is_finite() && spec.velocity.is_finite()) {
            tracing::warn!(?source, "dropping projectile with non-finite kinematics");
            return;
        }
        self.queued.push((source, spec));
    }

    /// Materialize every queued projectile. Returns how many were spawned.
    pub fn flush(&mut self, world: &mut World, now_ms: f64) -> usize {
        let count = self.queued.len();
        for (source, spec) in self.queued.drain(..) {
            let id = ProjectileId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            let entity = world.spawn((
                Projectile {
                    id,
                    spec,
                    spawned_at_ms: now_ms,
                    source,
                },
                Position(spec.origin),
                Velocity(spec.velocity),
            ));
            self.live.insert(id, entity);
        }
        self.total_spawned += count as u64;
        count
    }

    /// Stop tracking a projectile. The caller despawns the entity.
    pub fn forget(&mut self, id: ProjectileId) -> Option<Entity> {
        self.live.remove(&id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Projectiles spawned since construction.
    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    /// Drop queued shots and release every live projectile.
    pub fn clear(&mut self) -> Vec<Entity> {
        self.queued.clear();
        self.live.drain().map(|(_, entity)| entity).collect()
    }
}
