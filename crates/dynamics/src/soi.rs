//! Sphere-of-influence entry detection, latched per body.

use std::collections::HashSet;

use slingshot_core::vector::{self, Vector2};

use crate::body::Body;

/// True exactly when `position` lies strictly inside `body`'s influence sphere
/// and the body has not been entered before.
pub fn check(body: &Body, position: &Vector2, already_entered: &HashSet<String>) -> bool {
    !already_entered.contains(&body.name)
        && body.distance_from(position) < body.influence_radius_m
}

/// Per-run record of which bodies have already fired.
#[derive(Debug, Clone, Default)]
pub struct SoiLatch {
    entered: HashSet<String>,
}

impl SoiLatch {
    /// Check `body` and latch it on first entry. Returns whether it fired now.
    pub fn enter(&mut self, body: &Body, position: &Vector2) -> bool {
        if !check(body, position, &self.entered) {
            return false;
        }
        self.entered.insert(body.name.clone());
        true
    }

    pub fn has_entered(&self, body_name: &str) -> bool {
        self.entered.contains(body_name)
    }

    pub fn entered(&self) -> &HashSet<String> {
        &self.entered
    }
}

/// A sphere-of-influence entry and the velocity change applied there.
#[derive(Debug, Clone, PartialEq)]
pub struct SoiEventRecord {
    pub body_name: String,
    pub step_index: usize,
    /// Velocity after the gravity update of the entry step.
    pub entry_velocity_m_s: Vector2,
    /// Velocity after the assist (equal to entry when assists are disabled).
    pub exit_velocity_m_s: Vector2,
}

impl SoiEventRecord {
    /// Signed change in speed produced by the assist.
    pub fn speed_change_m_s(&self) -> f64 {
        vector::norm(&self.exit_velocity_m_s) - vector::norm(&self.entry_velocity_m_s)
    }
}
