//! Spacecraft state and the step-indexed trajectory handed to consumers.

use std::ops::Index;

use slingshot_core::vector::{self, Vector2};

use crate::SetupError;
use crate::body::Body;

/// Point-mass spacecraft state at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacecraftState {
    pub position_m: Vector2,
    pub velocity_m_s: Vector2,
    pub mass_kg: f64,
}

impl SpacecraftState {
    pub fn new(position_m: Vector2, velocity_m_s: Vector2, mass_kg: f64) -> Self {
        Self {
            position_m,
            velocity_m_s,
            mass_kg,
        }
    }

    pub fn speed_m_s(&self) -> f64 {
        vector::norm(&self.velocity_m_s)
    }

    pub fn is_finite(&self) -> bool {
        vector::is_finite(&self.position_m) && vector::is_finite(&self.velocity_m_s)
    }
}

/// One state per integration step; index 0 is the initial condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    dt_s: f64,
    states: Vec<SpacecraftState>,
}

impl Trajectory {
    /// Empty trajectory with room for `num_steps` states, reserved up front.
    pub(crate) fn try_with_capacity(dt_s: f64, num_steps: usize) -> Result<Self, SetupError> {
        let mut states = Vec::new();
        states
            .try_reserve_exact(num_steps)
            .map_err(|_| SetupError::TrajectoryTooLong(num_steps))?;
        Ok(Self { dt_s, states })
    }

    pub(crate) fn push(&mut self, state: SpacecraftState) {
        self.states.push(state);
    }

    pub fn dt_s(&self) -> f64 {
        self.dt_s
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&SpacecraftState> {
        self.states.get(step)
    }

    pub fn first(&self) -> Option<&SpacecraftState> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&SpacecraftState> {
        self.states.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpacecraftState> {
        self.states.iter()
    }

    pub fn as_slice(&self) -> &[SpacecraftState] {
        &self.states
    }

    pub fn into_states(self) -> Vec<SpacecraftState> {
        self.states
    }

    /// Elapsed simulation time at `step`.
    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 * self.dt_s
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.states.iter().map(|s| s.position_m)
    }

    pub fn velocities(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.states.iter().map(|s| s.velocity_m_s)
    }

    /// Step and distance of the closest recorded approach to `body`.
    ///
    /// Non-finite distances (diverged states) are skipped.
    pub fn closest_approach(&self, body: &Body) -> Option<(usize, f64)> {
        self.states
            .iter()
            .enumerate()
            .map(|(step, state)| (step, body.distance_from(&state.position_m)))
            .filter(|(_, distance)| distance.is_finite())
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl Index<usize> for Trajectory {
    type Output = SpacecraftState;

    fn index(&self, step: usize) -> &Self::Output {
        &self.states[step]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a SpacecraftState;
    type IntoIter = std::slice::Iter<'a, SpacecraftState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
