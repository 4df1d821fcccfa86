//! Semi-implicit Euler integration loop.
//!
//! Each step evaluates gravity at the previous position, updates velocity
//! first and then moves the spacecraft with the *new* velocity:
//!
//! ```text
//! v[k] = v[k-1] + a(x[k-1]) * dt
//! x[k] = x[k-1] + v[k] * dt
//! ```
//!
//! The sphere-of-influence check runs after the update and any assist is
//! written into `v[k]` before step `k + 1` starts. There is no step-size
//! control and no stability check; a blow-up is recorded, not rejected.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use slingshot_core::constants::G;
use slingshot_core::vector::{self, Vector2};

use crate::assist;
use crate::body::{Body, BodyRegistry};
use crate::force::compute_acceleration;
use crate::soi::{SoiEventRecord, SoiLatch};
use crate::state::{SpacecraftState, Trajectory};
use crate::{SetupError, positive_finite};

/// Fixed-step parameters shared by every run of a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub dt_s: f64,
    /// Number of recorded states, including the initial condition.
    pub num_steps: usize,
    pub gravitational_constant: f64,
    /// Apply the assist impulse on sphere-of-influence entry.
    pub assist: bool,
}

impl SimulationParams {
    /// Parameters with the standard gravitational constant and assists enabled.
    pub fn new(dt_s: f64, num_steps: usize) -> Self {
        Self {
            dt_s,
            num_steps,
            gravitational_constant: G,
            assist: true,
        }
    }

    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    pub fn with_assist(mut self, assist: bool) -> Self {
        self.assist = assist;
        self
    }

    /// Total simulated time covered by the recorded states.
    pub fn duration_s(&self) -> f64 {
        self.num_steps.saturating_sub(1) as f64 * self.dt_s
    }

    fn validate(&self) -> Result<(), SetupError> {
        if !positive_finite(self.dt_s) {
            return Err(SetupError::NonPositiveTimeStep(self.dt_s));
        }
        if self.num_steps == 0 {
            return Err(SetupError::ZeroSteps);
        }
        if !positive_finite(self.gravitational_constant) {
            return Err(SetupError::NonPositiveGravitationalConstant(
                self.gravitational_constant,
            ));
        }
        Ok(())
    }
}

/// Everything a run hands back to its caller.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub trajectory: Trajectory,
    /// Sphere-of-influence entries in the order they fired.
    pub events: Vec<SoiEventRecord>,
    /// First step whose position or velocity is no longer finite.
    pub diverged_at: Option<usize>,
    /// The run stopped early on request; `trajectory` holds the steps completed so far.
    pub cancelled: bool,
}

/// A validated body registry and step parameters, ready to integrate any number of
/// initial conditions.
#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: BodyRegistry,
    params: SimulationParams,
}

impl Simulation {
    pub fn new(bodies: BodyRegistry, params: SimulationParams) -> Result<Self, SetupError> {
        params.validate()?;
        Ok(Self { bodies, params })
    }

    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Integrate `initial` for the configured number of steps.
    pub fn run(&self, initial: SpacecraftState) -> Result<SimulationOutput, SetupError> {
        self.run_with_cancel(initial, &AtomicBool::new(false))
    }

    /// Like [`Simulation::run`], checking `cancel` between steps.
    ///
    /// On cancellation the partial trajectory is returned with `cancelled` set.
    pub fn run_with_cancel(
        &self,
        initial: SpacecraftState,
        cancel: &AtomicBool,
    ) -> Result<SimulationOutput, SetupError> {
        validate_initial_state(&initial)?;

        let SimulationParams {
            dt_s,
            num_steps,
            gravitational_constant: g,
            assist: apply_assist,
        } = self.params;
        let bodies = self.bodies.as_slice();

        debug!(
            "integrating {num_steps} steps of {dt_s} s around {} bodies",
            bodies.len()
        );

        let mut trajectory = Trajectory::try_with_capacity(dt_s, num_steps)?;
        let mut events = Vec::new();
        let mut latch = SoiLatch::default();
        let mut diverged_at = None;
        let mut cancelled = false;

        let mut state = initial;
        trajectory.push(state);

        for step in 1..num_steps {
            if cancel.load(Ordering::Relaxed) {
                warn!("run cancelled after {} of {num_steps} steps", trajectory.len());
                cancelled = true;
                break;
            }

            let velocity_before_update = state.velocity_m_s;
            let acceleration = compute_acceleration(&state.position_m, bodies, g);
            state.velocity_m_s =
                vector::add(&state.velocity_m_s, &vector::scale(&acceleration, dt_s));
            state.position_m =
                vector::add(&state.position_m, &vector::scale(&state.velocity_m_s, dt_s));

            for body in bodies {
                if !latch.enter(body, &state.position_m) {
                    continue;
                }
                let entry_velocity = state.velocity_m_s;
                if apply_assist {
                    state.velocity_m_s =
                        assist::apply(&entry_velocity, &velocity_before_update, body, g);
                }
                events.push(record_entry(body, step, entry_velocity, state.velocity_m_s));
            }

            if diverged_at.is_none() && !state.is_finite() {
                warn!("state became non-finite at step {step}; continuing without correction");
                diverged_at = Some(step);
            }

            trajectory.push(state);
        }

        debug!(
            "run finished with {} states and {} sphere-of-influence events",
            trajectory.len(),
            events.len()
        );

        Ok(SimulationOutput {
            trajectory,
            events,
            diverged_at,
            cancelled,
        })
    }
}

/// One-shot integration with the standard gravitational constant and assists enabled.
pub fn run(
    initial: SpacecraftState,
    bodies: &[Body],
    dt_s: f64,
    num_steps: usize,
) -> Result<Trajectory, SetupError> {
    let registry = BodyRegistry::new(bodies.to_vec())?;
    let simulation = Simulation::new(registry, SimulationParams::new(dt_s, num_steps))?;
    Ok(simulation.run(initial)?.trajectory)
}

pub(crate) fn validate_initial_state(initial: &SpacecraftState) -> Result<(), SetupError> {
    if !positive_finite(initial.mass_kg) {
        return Err(SetupError::NonPositiveSpacecraftMass(initial.mass_kg));
    }
    if !initial.is_finite() {
        return Err(SetupError::NonFiniteInitialState);
    }
    Ok(())
}

fn record_entry(
    body: &Body,
    step: usize,
    entry_velocity: Vector2,
    exit_velocity: Vector2,
) -> SoiEventRecord {
    let record = SoiEventRecord {
        body_name: body.name.clone(),
        step_index: step,
        entry_velocity_m_s: entry_velocity,
        exit_velocity_m_s: exit_velocity,
    };
    info!(
        "entered sphere of influence of {} at step {step}: speed {:.3} -> {:.3} m/s",
        body.name,
        vector::norm(&entry_velocity),
        vector::norm(&exit_velocity)
    );
    record
}
