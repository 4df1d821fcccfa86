//! Newtonian point-mass gravity.

use slingshot_core::vector::{self, Vector2, ZERO};

use crate::body::Body;

/// Acceleration toward a single body, `G M r / |r|³` with `r = body - position`.
///
/// A spacecraft sitting exactly on the body centre receives no pull from it.
#[inline]
pub fn body_acceleration(position: &Vector2, body: &Body, g: f64) -> Vector2 {
    let delta = vector::sub(&body.position_m, position);
    let r = vector::norm(&delta);
    if r == 0.0 {
        return ZERO;
    }
    vector::scale(&delta, body.mu(g) / (r * r * r))
}

/// Net gravitational acceleration (m/s²) at `position` from every body.
pub fn compute_acceleration(position: &Vector2, bodies: &[Body], g: f64) -> Vector2 {
    bodies.iter().fold(ZERO, |acc, body| {
        vector::add(&acc, &body_acceleration(position, body, g))
    })
}
