use approx::assert_relative_eq;
use proptest::prelude::*;
use strand_core::{ANGULAR_MOMENTUM, TOTAL_ENERGY};
use strand_laws::{CentralGravity, Pendulum, Spring};
use strand_observers::Summary;
use strand_solvers::{Config, SchemeKind, compare_schemes, run};

#[test]
fn euler_cromer_bounds_spring_energy() {
    let spring = Spring::new(1.0, 1.0).unwrap();
    let solution = run(
        &spring,
        spring.state(1.0, 0.0).unwrap(),
        SchemeKind::EulerCromer,
        Config::new(0.01, 1000).unwrap(),
        (),
        &spring,
    )
    .unwrap();

    assert_eq!(solution.steps(), 1000);
    assert!(Summary::of(&solution).max_energy_drift().unwrap() < 0.05);
}

#[test]
fn euler_energy_grows_every_step() {
    let spring = Spring::new(1.0, 1.0).unwrap();
    let solution = run(
        &spring,
        spring.state(1.0, 0.0).unwrap(),
        SchemeKind::Euler,
        Config::new(0.01, 1000).unwrap(),
        (),
        &spring,
    )
    .unwrap();

    let summary = Summary::of(&solution);
    assert!(summary.grows_monotonically(TOTAL_ENERGY).unwrap());

    // Each Euler step scales a unit oscillator's energy by exactly 1 + dt².
    let expected = 0.5 * (1.0 + 1e-4_f64).powi(1000);
    assert_relative_eq!(
        summary.final_value(TOTAL_ENERGY).unwrap(),
        expected,
        max_relative = 1e-9
    );
}

#[test]
fn large_swing_pendulum_favors_euler_cromer() {
    let pendulum = Pendulum::new(9.81, 1.0).unwrap();
    let initial = pendulum.released_at(90.0).unwrap();

    let comparison =
        compare_schemes(&pendulum, &initial, Config::new(0.01, 2000).unwrap(), (), &pendulum)
            .unwrap();

    let drift = |solution| Summary::of(solution).max_energy_drift().unwrap();
    assert!(drift(&comparison.euler_cromer) < 0.05);
    assert!(drift(&comparison.euler) > 10.0 * drift(&comparison.euler_cromer));
}

#[test]
fn euler_cromer_conserves_orbital_angular_momentum() {
    let sun = CentralGravity::solar().unwrap();
    let initial = sun.state([1.0, 0.0], [0.0, sun.circular_speed(1.0)]).unwrap();

    let comparison =
        compare_schemes(&sun, &initial, Config::new(0.001, 5000).unwrap(), (), &sun).unwrap();

    let cromer = Summary::of(&comparison.euler_cromer);
    let momentum = cromer.final_value(ANGULAR_MOMENTUM).unwrap();
    assert!(cromer.change(ANGULAR_MOMENTUM).unwrap().abs() < 1e-9 * momentum.abs());

    let euler = Summary::of(&comparison.euler);
    assert!(euler.change(ANGULAR_MOMENTUM).unwrap() > 0.0);
    assert!(euler.energy_change().unwrap() > 0.0);
}

proptest! {
    #[test]
    fn cromer_drift_stays_small_for_any_start(
        position in -2.0..2.0_f64,
        velocity in -2.0..2.0_f64,
    ) {
        prop_assume!(position.hypot(velocity) > 0.1);
        let spring = Spring::new(1.0, 1.0).unwrap();
        let solution = run(
            &spring,
            spring.state(position, velocity).unwrap(),
            SchemeKind::EulerCromer,
            Config::new(0.01, 1000).unwrap(),
            (),
            &spring,
        )
        .unwrap();

        prop_assert!(Summary::of(&solution).max_energy_drift().unwrap() < 0.05);
    }
}
