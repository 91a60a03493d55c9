//! Projectile integration and expiry.

use hecs::{Entity, World};

use barrage_core::components::Projectile;
use barrage_core::constants::PROJECTILE_MAX_AGE_MS;
use barrage_core::types::{FrameTime, Playfield, Position, ProjectileId, Velocity};

/// Move every projectile and collect those past max age or out of bounds.
pub fn run(
    world: &mut World,
    time: FrameTime,
    playfield: &Playfield,
    margin: f32,
    expired: &mut Vec<(ProjectileId, Entity)>,
) {
    expired.clear();
    let dt = time.dt_secs();

    for (entity, (projectile, pos, vel)) in
        world.query_mut::<(&Projectile, &mut Position, &Velocity)>()
    {
        pos.0 += vel.0 * dt;
        let too_old = time.now_ms - projectile.spawned_at_ms >= PROJECTILE_MAX_AGE_MS;
        if too_old || !playfield.contains_with_margin(pos.0, margin) {
            expired.push((projectile.id, entity));
        }
    }
}
