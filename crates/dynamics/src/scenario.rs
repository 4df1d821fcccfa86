//! Conversion from scenario manifests to runnable simulations.

use std::path::Path;
use std::sync::atomic::AtomicBool;

use slingshot_config::{ConfigError, ScenarioConfig, load_scenario};
use thiserror::Error;

use crate::SetupError;
use crate::body::{Body, BodyRegistry};
use crate::integrator::{
    Simulation, SimulationOutput, SimulationParams, validate_initial_state,
};
use crate::state::SpacecraftState;

/// Errors surfaced while turning a manifest into a simulation.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid simulation setup: {0}")]
    Setup(#[from] SetupError),
}

/// A validated simulation paired with its initial spacecraft state.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: Option<String>,
    pub simulation: Simulation,
    pub initial_state: SpacecraftState,
}

impl Scenario {
    /// Build and validate everything the manifest describes, before any step runs.
    pub fn from_config(config: &ScenarioConfig) -> Result<Self, ScenarioError> {
        let bodies = config
            .bodies
            .iter()
            .map(|b| Body::new(b.name.clone(), b.mass_kg, b.position_m, b.influence_radius_m))
            .collect();
        let registry = BodyRegistry::new(bodies)?;

        let params = SimulationParams::new(
            config.simulation.dt_s,
            config.simulation.resolve_num_steps()?,
        )
        .with_gravitational_constant(config.gravitational_constant)
        .with_assist(config.simulation.assist);
        let simulation = Simulation::new(registry, params)?;

        let spacecraft = &config.spacecraft;
        let initial_state = SpacecraftState::new(
            spacecraft.position_m,
            spacecraft.velocity_m_s,
            spacecraft.mass_kg,
        );
        validate_initial_state(&initial_state)?;

        Ok(Self {
            name: config.name.clone(),
            simulation,
            initial_state,
        })
    }

    /// Load a manifest from disk and build it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let config = load_scenario(path)?;
        Self::from_config(&config)
    }

    /// Replace the step parameters, re-validating them.
    pub fn with_params(self, params: SimulationParams) -> Result<Self, ScenarioError> {
        let simulation = Simulation::new(self.simulation.bodies().clone(), params)?;
        Ok(Self { simulation, ..self })
    }

    pub fn run(&self) -> Result<SimulationOutput, ScenarioError> {
        Ok(self.simulation.run(self.initial_state)?)
    }

    pub fn run_with_cancel(&self, cancel: &AtomicBool) -> Result<SimulationOutput, ScenarioError> {
        Ok(self.simulation.run_with_cancel(self.initial_state, cancel)?)
    }
}
