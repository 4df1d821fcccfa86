//! Scenario manifests and loaders for the Slingshot workspace.
//!
//! Manifests are plain records; semantic validation (positive masses, radii,
//! unique body names) is performed once by the dynamics crate when a
//! simulation is built from them.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use slingshot_core::constants::G;
use thiserror::Error;

/// A complete simulation scenario: bodies, spacecraft, and step parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: Option<String>,
    /// Gravitational constant in m³/kg/s². Defaults to CODATA 2018.
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: f64,
    pub spacecraft: SpacecraftConfig,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

/// Gravitating body entry.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub mass_kg: f64,
    pub position_m: [f64; 2],
    pub influence_radius_m: f64,
}

/// Initial spacecraft state.
#[derive(Debug, Deserialize, Clone)]
pub struct SpacecraftConfig {
    pub mass_kg: f64,
    pub position_m: [f64; 2],
    pub velocity_m_s: [f64; 2],
}

/// Fixed-step integration parameters.
///
/// Either `num_steps` or `total_time_s` must be present; `num_steps` wins when both are.
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub dt_s: f64,
    #[serde(default)]
    pub num_steps: Option<usize>,
    #[serde(default)]
    pub total_time_s: Option<f64>,
    /// Apply the gravity-assist correction on sphere-of-influence entry.
    #[serde(default = "default_assist")]
    pub assist: bool,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("simulation needs either `num_steps` or `total_time_s`")]
    MissingDuration,
    #[error("cannot derive a step count from total_time_s={total_time_s} and dt_s={dt_s}")]
    InvalidDuration { total_time_s: f64, dt_s: f64 },
}

fn default_gravitational_constant() -> f64 {
    G
}

fn default_assist() -> bool {
    true
}

impl SimulationConfig {
    /// Number of integration steps, deriving it from `total_time_s / dt_s` when not explicit.
    ///
    /// The derived count is truncated toward zero, so a total time shorter than one step
    /// yields zero steps (rejected later by simulation setup). A quotient too large for
    /// `usize` is an invalid duration.
    pub fn resolve_num_steps(&self) -> Result<usize, ConfigError> {
        if let Some(steps) = self.num_steps {
            return Ok(steps);
        }
        let total_time_s = self.total_time_s.ok_or(ConfigError::MissingDuration)?;
        let invalid = ConfigError::InvalidDuration {
            total_time_s,
            dt_s: self.dt_s,
        };
        if !(self.dt_s.is_finite() && self.dt_s > 0.0)
            || !(total_time_s.is_finite() && total_time_s >= 0.0)
        {
            return Err(invalid);
        }
        let steps = (total_time_s / self.dt_s).floor();
        if !(steps < usize::MAX as f64) {
            return Err(invalid);
        }
        Ok(steps as usize)
    }
}

/// Load a single scenario from a YAML or TOML file (chosen by extension).
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Load a list of scenarios.
///
/// A directory yields every `.toml` manifest inside it, sorted by path. A `.toml` file
/// yields one scenario; any other file is parsed as a YAML sequence of scenarios.
pub fn load_scenario_list<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        Ok(vec![load_scenario(path)?])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
