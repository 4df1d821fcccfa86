use std::sync::atomic::AtomicBool;

use approx::assert_relative_eq;
use proptest::prelude::*;
use slingshot::core::vector;
use slingshot::dynamics::{
    Body, BodyRegistry, SetupError, Simulation, SimulationParams, SpacecraftState, run,
};
use slingshot::orbits::circular_speed;

const G: f64 = 6.6743e-11;
const EARTH_MASS_KG: f64 = 5.972e24;
const EARTH_SOI_M: f64 = 6.471e6;

fn earth() -> Body {
    Body::new("EARTH", EARTH_MASS_KG, [0.0, 0.0], EARTH_SOI_M)
}

fn flyby_state() -> SpacecraftState {
    SpacecraftState::new([0.0, 6.471e6], [8000.0, 0.0], 1000.0)
}

fn simulation(bodies: Vec<Body>, params: SimulationParams) -> Simulation {
    Simulation::new(BodyRegistry::new(bodies).expect("valid bodies"), params).expect("valid params")
}

#[test]
fn first_step_matches_hand_computed_euler_update() {
    let params = SimulationParams::new(1.0, 2)
        .with_gravitational_constant(G)
        .with_assist(false);
    let output = simulation(vec![earth()], params)
        .run(flyby_state())
        .expect("run");
    let trajectory = output.trajectory;
    assert_eq!(trajectory.len(), 2);
    assert_eq!(trajectory[0], flyby_state());

    let a = G * EARTH_MASS_KG / (6.471e6 * 6.471e6);
    let step = &trajectory[1];
    assert_relative_eq!(step.velocity_m_s[0], 8000.0);
    assert_relative_eq!(step.velocity_m_s[1], -a, max_relative = 1e-12);
    assert_relative_eq!(step.position_m[0], 8000.0);
    assert_relative_eq!(step.position_m[1], 6.471e6 - a, max_relative = 1e-12);

    assert_relative_eq!(step.velocity_m_s[1], -9.51, max_relative = 1e-3);
    assert_relative_eq!(step.position_m[1], 6_470_990.49, max_relative = 1e-3);
    assert_eq!(step.mass_kg, 1000.0);
}

#[test]
fn position_update_uses_new_velocity() {
    let params = SimulationParams::new(10.0, 2).with_assist(false);
    let trajectory = simulation(vec![earth()], params)
        .run(flyby_state())
        .expect("run")
        .trajectory;

    let v1 = trajectory[1].velocity_m_s;
    let expected = vector::add(&flyby_state().position_m, &vector::scale(&v1, 10.0));
    assert_relative_eq!(trajectory[1].position_m[0], expected[0]);
    assert_relative_eq!(trajectory[1].position_m[1], expected[1]);
    assert!(trajectory[1].position_m[1] < 6.471e6, "old velocity would leave y unchanged");
}

#[test]
fn entry_on_first_step_applies_assist_to_velocity_only() {
    let params = SimulationParams::new(1.0, 2).with_gravitational_constant(G);
    let output = simulation(vec![earth()], params)
        .run(flyby_state())
        .expect("run");

    assert_eq!(output.events.len(), 1);
    let event = &output.events[0];
    assert_eq!(event.body_name, "EARTH");
    assert_eq!(event.step_index, 1);

    let a = G * EARTH_MASS_KG / (6.471e6 * 6.471e6);
    assert_relative_eq!(event.entry_velocity_m_s[1], -a, max_relative = 1e-12);

    let v_escape = (2.0 * G * EARTH_MASS_KG / EARTH_SOI_M).sqrt();
    assert_relative_eq!(event.speed_change_m_s(), v_escape - a, max_relative = 1e-9);

    let step = &output.trajectory[1];
    assert_eq!(step.velocity_m_s, event.exit_velocity_m_s);
    assert_relative_eq!(step.position_m[1], 6.471e6 - a, max_relative = 1e-12);

    let entry = event.entry_velocity_m_s;
    let exit = event.exit_velocity_m_s;
    let entry_dir = vector::scale(&entry, 1.0 / vector::norm(&entry));
    let exit_dir = vector::scale(&exit, 1.0 / vector::norm(&exit));
    assert_relative_eq!(entry_dir[0], exit_dir[0], max_relative = 1e-12);
    assert_relative_eq!(entry_dir[1], exit_dir[1], max_relative = 1e-12);
}

fn circular_orbit_errors(dt_s: f64, checkpoints_s: &[f64]) -> Vec<f64> {
    let r = 7.0e6;
    let mu = G * EARTH_MASS_KG;
    let v = circular_speed(mu, r);
    let omega = v / r;
    let span = checkpoints_s.iter().cloned().fold(0.0, f64::max);
    let num_steps = (span / dt_s).round() as usize + 1;

    // Influence radius far smaller than the orbit so no assist ever fires.
    let body = Body::new("EARTH", EARTH_MASS_KG, [0.0, 0.0], 1.0);
    let params = SimulationParams::new(dt_s, num_steps).with_gravitational_constant(G);
    let output = simulation(vec![body], params)
        .run(SpacecraftState::new([r, 0.0], [0.0, v], 1000.0))
        .expect("run");
    assert!(output.events.is_empty());

    checkpoints_s
        .iter()
        .map(|&t| {
            let step = (t / dt_s).round() as usize;
            let analytic = [r * (omega * t).cos(), r * (omega * t).sin()];
            vector::distance(&output.trajectory[step].position_m, &analytic)
        })
        .collect()
}

#[test]
fn circular_orbit_error_shrinks_with_step_size() {
    let checkpoints = [1000.0, 2000.0, 3000.0, 4000.0, 5000.0];
    let coarse = circular_orbit_errors(1.0, &checkpoints);
    let fine = circular_orbit_errors(0.1, &checkpoints);

    for ((t, c), f) in checkpoints.iter().zip(&coarse).zip(&fine) {
        assert!(c > f, "t = {t}: dt=1 error {c} m should exceed dt=0.1 error {f} m");
        assert!(*c < 0.01 * 7.0e6, "t = {t}: dt=1 error {c} m is not bounded");
    }
}

#[test]
fn sphere_of_influence_fires_once_despite_reentry() {
    let r = 7.0e6;
    let v = circular_speed(G * EARTH_MASS_KG, r);
    let beacon_radius = 2.0e5;
    let bodies = vec![
        Body::new("EARTH", EARTH_MASS_KG, [0.0, 0.0], 1.0),
        Body::new("BEACON", 1.0, [r, 0.0], beacon_radius),
    ];
    let params = SimulationParams::new(1.0, 15_000).with_gravitational_constant(G);
    let output = simulation(bodies, params)
        .run(SpacecraftState::new([r, 0.0], [0.0, v], 1000.0))
        .expect("run");

    let inside: Vec<bool> = output
        .trajectory
        .positions()
        .map(|p| vector::distance(&p, &[r, 0.0]) < beacon_radius)
        .collect();
    let reentries = inside.windows(2).filter(|w| !w[0] && w[1]).count();
    assert!(reentries >= 1, "spacecraft should come back through the beacon sphere");

    assert_eq!(output.events.len(), 1);
    assert_eq!(output.events[0].body_name, "BEACON");
    assert_eq!(output.events[0].step_index, 1);
}

#[test]
fn free_flight_without_bodies_is_a_straight_line() {
    let state = SpacecraftState::new([1.0, 2.0], [3.0, -4.0], 10.0);
    let trajectory = run(state, &[], 0.5, 11).expect("run");

    assert_eq!(trajectory.len(), 11);
    let last = trajectory.last().expect("last state");
    assert_relative_eq!(last.position_m[0], 1.0 + 3.0 * 5.0);
    assert_relative_eq!(last.position_m[1], 2.0 - 4.0 * 5.0);
    assert_eq!(last.velocity_m_s, [3.0, -4.0]);
    assert_relative_eq!(trajectory.time_at(10), 5.0);
}

#[test]
fn non_finite_state_is_reported_not_rejected() {
    let monster = Body::new("MONSTER", 1.0e300, [0.0, 0.0], 1.0);
    let params = SimulationParams::new(1.0, 5).with_gravitational_constant(1.0e300);
    let output = simulation(vec![monster], params)
        .run(flyby_state())
        .expect("divergence is not a setup error");

    assert_eq!(output.trajectory.len(), 5);
    assert_eq!(output.diverged_at, Some(1));
    assert!(!output.cancelled);
}

#[test]
fn cancellation_returns_partial_trajectory() {
    let cancel = AtomicBool::new(true);
    let output = simulation(vec![earth()], SimulationParams::new(1.0, 1_000))
        .run_with_cancel(flyby_state(), &cancel)
        .expect("run");

    assert!(output.cancelled);
    assert_eq!(output.trajectory.len(), 1);
    assert_eq!(output.trajectory[0], flyby_state());
}

#[test]
fn invalid_setup_fails_before_integrating() {
    assert_eq!(
        run(flyby_state(), &[earth()], 0.0, 10).unwrap_err(),
        SetupError::NonPositiveTimeStep(0.0)
    );
    assert_eq!(
        run(flyby_state(), &[earth()], 1.0, 0).unwrap_err(),
        SetupError::ZeroSteps
    );
    assert!(matches!(
        run(flyby_state(), &[Body::new("VOID", -1.0, [0.0, 0.0], 1.0)], 1.0, 10),
        Err(SetupError::NonPositiveBodyMass { .. })
    ));
    assert!(matches!(
        run(flyby_state(), &[Body::new("FLAT", 1.0, [0.0, 0.0], 0.0)], 1.0, 10),
        Err(SetupError::NonPositiveInfluenceRadius { .. })
    ));
    assert_eq!(
        run(flyby_state(), &[earth(), earth()], 1.0, 10).unwrap_err(),
        SetupError::DuplicateBody("EARTH".to_string())
    );
    assert_eq!(
        run(SpacecraftState::new([0.0, 0.0], [0.0, 0.0], 0.0), &[earth()], 1.0, 10).unwrap_err(),
        SetupError::NonPositiveSpacecraftMass(0.0)
    );
    assert_eq!(
        run(SpacecraftState::new([f64::NAN, 0.0], [0.0, 0.0], 1.0), &[earth()], 1.0, 10)
            .unwrap_err(),
        SetupError::NonFiniteInitialState
    );
}

#[test]
fn oversized_trajectory_fails_setup_instead_of_panicking() {
    assert_eq!(
        run(flyby_state(), &[earth()], 1.0, usize::MAX / 8).unwrap_err(),
        SetupError::TrajectoryTooLong(usize::MAX / 8)
    );
}

#[test]
fn body_names_are_unique_ignoring_case() {
    let err = BodyRegistry::new(vec![
        Body::new("Earth", EARTH_MASS_KG, [0.0, 0.0], EARTH_SOI_M),
        Body::new("EARTH", 1.0, [1.0e9, 0.0], 1.0),
    ])
    .unwrap_err();
    assert_eq!(err, SetupError::DuplicateBody("EARTH".to_string()));

    let registry = BodyRegistry::new(vec![earth()]).expect("valid bodies");
    assert_eq!(registry.get("earth").map(|b| b.mass_kg), Some(EARTH_MASS_KG));
}

#[test]
fn overlapping_spheres_fire_in_registry_order_with_chained_velocities() {
    let bodies = vec![
        Body::new("ZULU", 1.0e20, [1.0e3, 0.0], 1.0e6),
        Body::new("ALPHA", 4.0e20, [-2.0e3, 0.0], 1.0e6),
    ];
    let escape: Vec<f64> = bodies
        .iter()
        .map(|b| b.escape_speed_at_influence_radius(G))
        .collect();
    let initial = SpacecraftState::new([0.0, 0.0], [100.0, 0.0], 1000.0);
    let params = SimulationParams::new(1.0, 2).with_gravitational_constant(G);
    let output = simulation(bodies, params).run(initial).expect("run");

    let names: Vec<&str> = output.events.iter().map(|e| e.body_name.as_str()).collect();
    assert_eq!(names, ["ZULU", "ALPHA"]);
    assert!(output.events.iter().all(|e| e.step_index == 1));

    let (first, second) = (&output.events[0], &output.events[1]);
    assert_eq!(second.entry_velocity_m_s, first.exit_velocity_m_s);
    assert_eq!(output.trajectory[1].velocity_m_s, second.exit_velocity_m_s);

    // Both corrections measure against the same pre-update velocity.
    let v0 = initial.velocity_m_s;
    let first_drift = vector::norm(&vector::sub(&first.entry_velocity_m_s, &v0));
    let second_drift = vector::norm(&vector::sub(&second.entry_velocity_m_s, &v0));
    assert_relative_eq!(first.speed_change_m_s(), escape[0] - first_drift, max_relative = 1e-9);
    assert_relative_eq!(
        second.speed_change_m_s(),
        escape[1] - second_drift,
        max_relative = 1e-9
    );
    assert!(second_drift > 0.5 * escape[0], "second body sees the first assist");
}

#[test]
fn closest_approach_finds_minimum_distance() {
    let trajectory = run(
        SpacecraftState::new([-1000.0, 50.0], [100.0, 0.0], 1.0),
        &[],
        1.0,
        21,
    )
    .expect("run");
    let marker = Body::new("MARKER", 1.0, [0.0, 0.0], 1.0);
    let (step, distance) = trajectory.closest_approach(&marker).expect("approach");
    assert_eq!(step, 10);
    assert_relative_eq!(distance, 50.0);
}

proptest! {
    #[test]
    fn trajectory_has_exactly_num_steps_states(num_steps in 1usize..400, dt in 0.1f64..100.0) {
        let trajectory = run(flyby_state(), &[earth()], dt, num_steps).expect("run");
        prop_assert_eq!(trajectory.len(), num_steps);
        prop_assert_eq!(trajectory[0], flyby_state());
        prop_assert_eq!(trajectory.velocities().count(), num_steps);
    }
}
