//! Core units, constants, and shared primitives for the Slingshot workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Newtonian gravitational constant, CODATA 2018 (m³/kg/s²).
    pub const G: f64 = 6.674_30e-11;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR};

    /// Convert hours to seconds.
    #[inline]
    pub fn hours_to_seconds(hours: f64) -> f64 {
        hours * SECONDS_PER_HOUR
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Split a duration into whole (days, hours, minutes).
    pub fn split_duration(seconds: f64) -> (i64, i64, i64) {
        let total_seconds = seconds.max(0.0);
        let days = (total_seconds / SECONDS_PER_DAY).floor() as i64;
        let remaining = total_seconds - days as f64 * SECONDS_PER_DAY;
        let hours = (remaining / SECONDS_PER_HOUR).floor() as i64;
        let minutes = ((remaining - hours as f64 * SECONDS_PER_HOUR) / 60.0).floor() as i64;
        (days, hours, minutes)
    }
}

/// Minimal planar vector helpers to avoid ad-hoc `[f64; 2]` math everywhere.
pub mod vector {
    /// A 2D vector in metres or m/s depending on context.
    pub type Vector2 = [f64; 2];

    /// The zero vector.
    pub const ZERO: Vector2 = [0.0, 0.0];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector2) -> f64 {
        v[0].hypot(v[1])
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector2, b: &Vector2) -> f64 {
        a[0] * b[0] + a[1] * b[1]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] + b[0], a[1] + b[1]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] - b[0], a[1] - b[1]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector2, s: f64) -> Vector2 {
        [v[0] * s, v[1] * s]
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(a: &Vector2, b: &Vector2) -> f64 {
        norm(&sub(a, b))
    }

    /// True when both components are finite (no NaN or infinity).
    #[inline]
    pub fn is_finite(v: &Vector2) -> bool {
        v[0].is_finite() && v[1].is_finite()
    }
}
