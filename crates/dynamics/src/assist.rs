//! Heuristic gravity-assist impulse.
//!
//! This is not a patched-conic flyby. The velocity change induced by gravity
//! over the entry step stands in for the hyperbolic excess speed, and the
//! difference between the body's escape speed at the influence radius and
//! that value is added to the spacecraft's speed without turning it.

use slingshot_core::vector::{self, Vector2};

use crate::body::Body;

/// Scalar speed correction for an entry into `body`'s influence sphere.
///
/// `v_escape - v_infinity` where `v_infinity = |current - before|`.
pub fn speed_correction(
    current_velocity: &Vector2,
    velocity_before_update: &Vector2,
    body: &Body,
    g: f64,
) -> f64 {
    let v_infinity = vector::norm(&vector::sub(current_velocity, velocity_before_update));
    body.escape_speed_at_influence_radius(g) - v_infinity
}

/// Velocity after applying the assist correction along the current direction of travel.
pub fn apply(
    current_velocity: &Vector2,
    velocity_before_update: &Vector2,
    body: &Body,
    g: f64,
) -> Vector2 {
    let delta_v = speed_correction(current_velocity, velocity_before_update, body, g);
    with_added_speed(current_velocity, delta_v)
}

// A stationary spacecraft has no direction to push along.
fn with_added_speed(velocity: &Vector2, delta_v: f64) -> Vector2 {
    let speed = vector::norm(velocity);
    if speed == 0.0 {
        return *velocity;
    }
    vector::scale(velocity, (speed + delta_v) / speed)
}
