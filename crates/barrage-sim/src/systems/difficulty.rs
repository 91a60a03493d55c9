//! Difficulty broadcast: recompute every live actor's derived parameters.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::ActorInfo;
use barrage_core::difficulty::DifficultyScalar;
use barrage_core::events::GameEvent;
use barrage_patterns::movement::MovementController;
use barrage_patterns::turret::TurretGun;
use barrage_patterns::weapon::WeaponController;

/// Apply `scalar` to every live actor. Returns how many were retuned.
pub fn apply(
    world: &mut World,
    scalar: &DifficultyScalar,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) -> usize {
    let mut retuned = 0;
    for (_entity, (info, movement, weapon, turret)) in world.query_mut::<(
        &ActorInfo,
        &mut MovementController,
        Option<&mut WeaponController>,
        Option<&mut TurretGun>,
    )>() {
        if !info.is_active() {
            continue;
        }
        movement.adjust_for_difficulty(scalar);
        if let Some(weapon) = weapon {
            if let Some((from, to)) = weapon.adjust_for_difficulty(scalar, rng) {
                tracing::debug!(actor = ?info.id, ?from, ?to, "weapon upgraded");
                events.push(GameEvent::WeaponPatternChanged {
                    actor: info.id,
                    from,
                    to,
                });
            }
        }
        if let Some(gun) = turret {
            gun.adjust_for_difficulty(scalar);
        }
        retuned += 1;
    }
    retuned
}
