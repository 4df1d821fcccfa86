//! Two-body orbit helpers (circular speed, escape speed, period, specific energy).
//!
//! All inputs are SI: `mu_m3_s2` is the gravitational parameter `G * M` of the
//! attracting body, distances are metres, speeds m/s.
use slingshot_core::vector::{self, Vector2};

/// Gravitational parameter `G * M` for a body of the given mass.
#[inline]
pub fn gravitational_parameter(g: f64, mass_kg: f64) -> f64 {
    g * mass_kg
}

/// Speed of a circular orbit of radius `r_m`.
pub fn circular_speed(mu_m3_s2: f64, r_m: f64) -> f64 {
    (mu_m3_s2 / r_m).sqrt()
}

/// Escape speed at distance `r_m` from the body centre.
pub fn escape_speed(mu_m3_s2: f64, r_m: f64) -> f64 {
    (2.0 * mu_m3_s2 / r_m).sqrt()
}

/// Period of a circular orbit of radius `r_m` (seconds).
pub fn circular_period(mu_m3_s2: f64, r_m: f64) -> f64 {
    2.0 * std::f64::consts::PI * (r_m.powi(3) / mu_m3_s2).sqrt()
}

/// Specific orbital energy `v²/2 - mu/r` of a state relative to the body.
///
/// `relative_position_m` and `velocity_m_s` are measured from a body at rest.
/// Negative values are bound orbits. Returns negative infinity at `r == 0`.
pub fn specific_energy(
    mu_m3_s2: f64,
    relative_position_m: &Vector2,
    velocity_m_s: &Vector2,
) -> f64 {
    let r = vector::norm(relative_position_m);
    let v2 = vector::dot(velocity_m_s, velocity_m_s);
    0.5 * v2 - mu_m3_s2 / r
}
