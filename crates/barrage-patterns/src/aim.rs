//! Aiming helpers: bearing to a point and lead (predicted intercept) aiming.

use glam::Vec2;

use barrage_core::constants::DEFAULT_FIRE_ANGLE;
use barrage_core::types::TargetState;

/// Below this range the target is treated as coincident with the muzzle.
const MIN_AIM_RANGE: f32 = 1.0;

/// Angle (radians, 0 = +x) from `from` to `to`.
/// Falls back to the default leftward direction when the points coincide.
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    if d.length_squared() < MIN_AIM_RANGE * MIN_AIM_RANGE {
        DEFAULT_FIRE_ANGLE
    } else {
        d.y.atan2(d.x)
    }
}

/// Point to aim at. With a `predictive_weight`, the target is advanced
/// along its velocity by `distance / bullet_speed * weight` seconds.
pub fn aim_point(
    origin: Vec2,
    target: &TargetState,
    bullet_speed: f32,
    predictive_weight: Option<f32>,
) -> Vec2 {
    let Some(weight) = predictive_weight else {
        return target.position;
    };
    if bullet_speed <= f32::EPSILON {
        return target.position;
    }
    let lead_secs = origin.distance(target.position) / bullet_speed * weight;
    target.position + target.velocity * lead_secs
}

/// Firing angle toward an optional target.
pub fn firing_angle(
    origin: Vec2,
    target: Option<&TargetState>,
    bullet_speed: f32,
    predictive_weight: Option<f32>,
) -> (f32, Option<Vec2>) {
    match target {
        Some(t) => {
            let point = aim_point(origin, t, bullet_speed, predictive_weight);
            (bearing(origin, point), Some(point))
        }
        None => (DEFAULT_FIRE_ANGLE, None),
    }
}

/// `count` angles evenly spread across `spread` radians centered on `center`.
pub fn fan(center: f32, spread: f32, count: u32) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![center],
        n => {
            let step = spread / (n - 1) as f32;
            let start = center - spread / 2.0;
            (0..n).map(|i| start + step * i as f32).collect()
        }
    }
}

/// `count` angles evenly spaced around the full circle, starting at `offset`.
pub fn ring(offset: f32, count: u32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let step = std::f32::consts::TAU / count as f32;
    (0..count).map(|i| offset + step * i as f32).collect()
}

/// Smallest signed difference `to - from`, wrapped into `(-PI, PI]`.
pub fn angle_delta(from: f32, to: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut d = (to - from).rem_euclid(TAU);
    if d > PI {
        d -= TAU;
    }
    d
}
