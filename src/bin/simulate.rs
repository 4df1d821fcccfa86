use anyhow::anyhow;
use clap::Parser;
use log::info;
use slingshot::core::time::split_duration;
use slingshot::core::units::m_to_km;
use slingshot::core::vector;
use slingshot::dynamics::{Scenario, SimulationParams};
use slingshot::orbits::specific_energy;
use std::path::PathBuf;

/// Integrate a spacecraft trajectory through a scenario's gravitating bodies.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Fixed-step gravity-assist trajectory simulator"
)]
struct Cli {
    /// Scenario manifest (YAML or TOML)
    #[arg(long, default_value = "configs/scenarios/earth_flyby.toml")]
    scenario: PathBuf,

    /// Override the integration step in seconds
    #[arg(long)]
    dt: Option<f64>,

    /// Override the number of recorded states
    #[arg(long)]
    steps: Option<usize>,

    /// Integrate gravity only, without the sphere-of-influence assist
    #[arg(long, default_value_t = false)]
    no_assist: bool,

    /// Print every Nth state of the trajectory (0 disables)
    #[arg(long, default_value_t = 0)]
    sample_every: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut scenario = Scenario::load(&cli.scenario)?;
    let base = *scenario.simulation.params();
    let params = SimulationParams {
        dt_s: cli.dt.unwrap_or(base.dt_s),
        num_steps: cli.steps.unwrap_or(base.num_steps),
        assist: base.assist && !cli.no_assist,
        ..base
    };
    if params != base {
        info!("overriding scenario parameters: {params:?}");
        scenario = scenario.with_params(params)?;
    }

    let output = scenario.run()?;
    let trajectory = &output.trajectory;
    let last = trajectory
        .last()
        .ok_or_else(|| anyhow!("simulation produced an empty trajectory"))?;

    let duration = trajectory.time_at(trajectory.len() - 1);
    let (d, h, m) = split_duration(duration);

    println!("=== Trajectory ===");
    println!(
        "Scenario       : {}",
        scenario.name.as_deref().unwrap_or("(unnamed)")
    );
    println!(
        "Steps          : {} states, dt = {} s, span = {:.0} s ({}d {}h {}m)",
        trajectory.len(),
        params.dt_s,
        duration,
        d,
        h,
        m
    );
    println!(
        "Final position : ({:.3}, {:.3}) km",
        m_to_km(last.position_m[0]),
        m_to_km(last.position_m[1])
    );
    println!(
        "Final velocity : ({:.3}, {:.3}) m/s, speed = {:.3} m/s",
        last.velocity_m_s[0],
        last.velocity_m_s[1],
        last.speed_m_s()
    );

    if cli.sample_every > 0 {
        println!("=== Samples ===");
        for (step, state) in trajectory.iter().enumerate().step_by(cli.sample_every) {
            println!(
                "step {:>8} t = {:>10.1} s  r = ({:.3}, {:.3}) km  v = ({:.3}, {:.3}) m/s",
                step,
                trajectory.time_at(step),
                m_to_km(state.position_m[0]),
                m_to_km(state.position_m[1]),
                state.velocity_m_s[0],
                state.velocity_m_s[1]
            );
        }
    }

    println!("=== SOI events ===");
    if output.events.is_empty() {
        println!("none");
    }
    for event in &output.events {
        println!(
            "{} at step {} (t = {:.1} s): speed change {:+.3} m/s",
            event.body_name,
            event.step_index,
            trajectory.time_at(event.step_index),
            event.speed_change_m_s()
        );
    }

    println!("=== Closest approach ===");
    for body in scenario.simulation.bodies() {
        if let Some((step, distance)) = trajectory.closest_approach(body) {
            let relative = vector::sub(&last.position_m, &body.position_m);
            let energy = specific_energy(
                body.mu(params.gravitational_constant),
                &relative,
                &last.velocity_m_s,
            );
            println!(
                "{} : {:.3} km at step {}, final specific energy {:.3} MJ/kg",
                body.name,
                m_to_km(distance),
                step,
                energy / 1.0e6
            );
        }
    }

    if let Some(step) = output.diverged_at {
        eprintln!("warning: trajectory became non-finite at step {step}");
    }

    Ok(())
}
