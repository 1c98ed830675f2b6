use integration_tests::Blowup;
use strand_laws::{CentralGravity, FreeFall, Relaxation, Spring};
use strand_solvers::{
    Config, ConfigError, Failure, SchemeKind, TerminationReason, ThresholdMonitor, run,
    run_unmonitored,
};

#[test]
fn gravity_at_the_origin_is_a_domain_failure() {
    let sun = CentralGravity::solar().unwrap();
    let initial = sun.state([0.25, 0.0], [-0.5, 0.0]).unwrap();

    let solution =
        run_unmonitored(&sun, initial, SchemeKind::Euler, Config::new(0.5, 10).unwrap()).unwrap();

    let Some(Failure::Domain(err)) = solution.failure() else {
        panic!("expected a domain failure, got {:?}", solution.reason);
    };
    assert_eq!(err.law(), "central gravity");
    assert_eq!(solution.steps(), 1);
    assert_eq!(solution.final_state().get("position_x"), Some(0.0));
    assert!(solution.rejected.is_none());
}

#[test]
fn mismatched_state_fails_cleanly() {
    let spring = Spring::new(1.0, 1.0).unwrap();
    let cooling = Relaxation::newton_cooling(0.1, 25.0).unwrap();

    let solution = run(
        &spring,
        cooling.state(100.0).unwrap(),
        SchemeKind::EulerCromer,
        Config::new(0.1, 10).unwrap(),
        (),
        &spring,
    )
    .unwrap();

    let Some(Failure::Domain(err)) = solution.failure() else {
        panic!("expected a domain failure, got {:?}", solution.reason);
    };
    assert_eq!(err.law(), "spring");
    assert_eq!(solution.steps(), 0);
    assert!(solution.trajectory.first().diagnostics.is_none());
}

#[test]
fn runaway_growth_is_a_divergence_failure() {
    let law = Blowup::new().unwrap();

    let solution = run_unmonitored(
        &law,
        law.state(1.0).unwrap(),
        SchemeKind::Euler,
        Config::new(0.01, 10_000).unwrap(),
    )
    .unwrap();

    let Some(Failure::NumericDivergence { component, step }) = solution.failure() else {
        panic!("expected divergence, got {:?}", solution.reason);
    };
    assert_eq!(component, "x");
    assert_eq!(*step, solution.steps() + 1);
    assert!(solution.final_state().get("x").unwrap().is_finite());
}

#[test]
fn invalid_runs_are_rejected_before_stepping() {
    assert_eq!(Config::new(0.0, 10), Err(ConfigError::TimeStep));
    assert_eq!(Config::new(f64::NAN, 10), Err(ConfigError::TimeStep));
    assert_eq!(Config::new(0.1, 0), Err(ConfigError::MaxSteps));

    let fall = FreeFall::new(9.8).unwrap();
    let err = run(
        &fall,
        fall.dropped_from(10.0, 0.0).unwrap(),
        SchemeKind::Euler,
        Config::new(0.01, 10).unwrap(),
        ThresholdMonitor::below("altitude", 0.0),
        &(),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::UnknownComponent("altitude".into()));

    let err = run_unmonitored(
        &fall,
        fall.dropped_from(f64::INFINITY, 0.0).unwrap(),
        SchemeKind::Euler,
        Config::new(0.01, 10).unwrap(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::NonFiniteInitial {
            component: "height".into()
        }
    );
}

#[test]
fn failure_keeps_the_partial_trajectory() {
    let law = Blowup::new().unwrap();
    let solution = run_unmonitored(
        &law,
        law.state(1.0).unwrap(),
        SchemeKind::EulerCromer,
        Config::new(0.01, 10_000).unwrap(),
    )
    .unwrap();

    assert!(matches!(
        solution.reason,
        TerminationReason::Failed(Failure::NumericDivergence { .. })
    ));
    assert!(solution.steps() > 100);
    assert!(
        solution
            .trajectory
            .states()
            .all(|state| state.first_non_finite().is_none())
    );
}
