//! Fixed-step gravitational integration of a single spacecraft among static bodies.
//!
//! The engine is split leaf-first: [`body`] holds the registry of gravitating
//! bodies, [`force`] sums their pull, [`soi`] latches sphere-of-influence
//! entries, [`assist`] turns an entry into an impulsive speed change, and
//! [`integrator`] drives the semi-implicit Euler loop that ties them together.

pub mod assist;
pub mod body;
pub mod force;
pub mod integrator;
pub mod scenario;
pub mod soi;
pub mod state;

pub use body::{Body, BodyRegistry};
pub use integrator::{Simulation, SimulationOutput, SimulationParams, run};
pub use scenario::{Scenario, ScenarioError};
pub use soi::SoiEventRecord;
pub use state::{SpacecraftState, Trajectory};

use thiserror::Error;

/// Configuration problems detected before any integration step runs.
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    #[error("body '{body}' must have a positive finite mass (got {mass_kg} kg)")]
    NonPositiveBodyMass { body: String, mass_kg: f64 },
    #[error("body '{body}' must have a positive finite influence radius (got {radius_m} m)")]
    NonPositiveInfluenceRadius { body: String, radius_m: f64 },
    #[error("body '{0}' has a non-finite position")]
    NonFiniteBodyPosition(String),
    #[error("body '{0}' is listed more than once")]
    DuplicateBody(String),
    #[error("time step must be positive and finite (got {0} s)")]
    NonPositiveTimeStep(f64),
    #[error("simulation needs at least one step")]
    ZeroSteps,
    #[error("cannot reserve memory for a trajectory of {0} states")]
    TrajectoryTooLong(usize),
    #[error("gravitational constant must be positive and finite (got {0})")]
    NonPositiveGravitationalConstant(f64),
    #[error("spacecraft must have a positive finite mass (got {0} kg)")]
    NonPositiveSpacecraftMass(f64),
    #[error("initial spacecraft position and velocity must be finite")]
    NonFiniteInitialState,
}

pub(crate) fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
