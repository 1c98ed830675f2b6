//! Fixed-step runs of a law from an initial state.
//!
//! A run repeatedly steps the law, checks the new state for divergence,
//! records diagnostics, and asks the monitor whether to stop:
//!
//! ```ignore
//! use strand_solvers::{Config, SchemeKind, ThresholdMonitor, run};
//!
//! let config = Config::new(0.01, 10_000)?;
//! let monitor = ThresholdMonitor::below("height", 0.0);
//! let solution = run(&law, initial, SchemeKind::EulerCromer, config, monitor, &law)?;
//!
//! for sample in &solution.trajectory {
//!     println!("t={}: {:?}", sample.state.time(), sample.state.values());
//! }
//! ```

mod config;
mod solution;

pub use config::{Config, ConfigError};
pub use solution::{Failure, Solution, TerminationReason};

use strand_core::{DerivativeLaw, Diagnostics, InvariantTracker, Sample, StateVector, Trajectory};
use tracing::{debug, debug_span, trace, warn};

use crate::{
    SchemeKind, Settings, SettingsError,
    monitor::{Check, EventMonitor, StopReason},
    scheme::step,
};

/// Upper bound on trajectory preallocation, so a generous `max_steps` does
/// not reserve memory the run may never use.
const PREALLOCATE_LIMIT: usize = 1 << 16;

/// Integrates `law` from `initial` until the monitor stops the run or
/// `config.max_steps()` steps have been accepted.
///
/// # Algorithm
///
/// 1. Validate the monitor against the schema and reject a non-finite
///    initial time or state.
/// 2. Record the initial sample.
/// 3. For each step:
///    - Advance the last accepted state with `scheme`.
///    - Fail if the law errors or any component becomes non-finite.
///    - Record diagnostics with `tracker`.
///    - Ask the monitor; append the state unless it is discarded.
///
/// Pass `()` as the monitor to never stop early and `&()` as the tracker to
/// record no diagnostics.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the run cannot start. Failures after the
/// first step are reported through [`TerminationReason::Failed`] alongside
/// the partial trajectory.
pub fn run<L, M, T>(
    law: &L,
    initial: StateVector,
    scheme: SchemeKind,
    config: Config,
    mut monitor: M,
    tracker: &T,
) -> Result<Solution, ConfigError>
where
    L: DerivativeLaw + ?Sized,
    M: EventMonitor,
    T: InvariantTracker + ?Sized,
{
    monitor.validate(initial.schema())?;
    if !initial.time().is_finite() {
        return Err(ConfigError::NonFiniteStartTime);
    }
    if let Some((component, _)) = initial.first_non_finite() {
        return Err(ConfigError::NonFiniteInitial {
            component: component.to_owned(),
        });
    }

    let _span = debug_span!(
        "run",
        %scheme,
        dt = config.dt(),
        max_steps = config.max_steps()
    )
    .entered();
    debug!(dimension = initial.dimension(), t0 = initial.time(), "starting run");

    let record = |state: &StateVector| -> Option<Diagnostics> {
        Some(tracker.record(state)).filter(|diagnostics| !diagnostics.is_empty())
    };

    let capacity = config.max_steps().saturating_add(1).min(PREALLOCATE_LIMIT);
    let diagnostics = record(&initial);
    let mut trajectory = Trajectory::with_capacity(Sample::new(initial, diagnostics), capacity);

    for n in 1..=config.max_steps() {
        let next = match step(&trajectory.last().state, config.dt(), law, scheme) {
            Ok(next) => next,
            Err(err) => return Ok(finish(TerminationReason::Failed(err.into()), trajectory, None)),
        };

        if let Some((component, value)) = next.first_non_finite() {
            trace!(component, value, step = n, "non-finite component");
            let failure = Failure::NumericDivergence {
                component: component.to_owned(),
                step: n,
            };
            return Ok(finish(TerminationReason::Failed(failure), trajectory, None));
        }

        let diagnostics = record(&next);
        match monitor.check(&trajectory, &next) {
            Check::Continue => trajectory.push(Sample::new(next, diagnostics)),
            Check::Stop(stop) => {
                let reason = match stop.reason {
                    StopReason::Event(name) => TerminationReason::EventTriggered(name),
                    StopReason::Converged => TerminationReason::Converged,
                };
                let rejected = if stop.keep_state {
                    trajectory.push(Sample::new(next, diagnostics));
                    None
                } else {
                    Some(next)
                };
                return Ok(finish(reason, trajectory, rejected));
            }
        }
    }

    Ok(finish(TerminationReason::MaxStepsReached, trajectory, None))
}

/// Runs for exactly `config.max_steps()` steps with no monitor or tracker.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the initial state is not finite.
pub fn run_unmonitored<L>(
    law: &L,
    initial: StateVector,
    scheme: SchemeKind,
    config: Config,
) -> Result<Solution, ConfigError>
where
    L: DerivativeLaw + ?Sized,
{
    run(law, initial, scheme, config, (), &())
}

/// Runs with the scheme, step, event and tracking flag from `settings`.
///
/// `tracker` is used only when `settings.track_invariants` is set.
///
/// # Errors
///
/// Returns a [`SettingsError`] if the settings describe an invalid run.
pub fn run_with_settings<L, T>(
    law: &L,
    initial: StateVector,
    settings: &Settings,
    tracker: &T,
) -> Result<Solution, SettingsError>
where
    L: DerivativeLaw + ?Sized,
    T: InvariantTracker + ?Sized,
{
    let config = settings.config()?;
    let monitor = settings.monitor()?;

    let solution = if settings.track_invariants {
        run(law, initial, settings.scheme, config, monitor, tracker)?
    } else {
        run(law, initial, settings.scheme, config, monitor, &())?
    };
    Ok(solution)
}

fn finish(
    reason: TerminationReason,
    trajectory: Trajectory,
    rejected: Option<StateVector>,
) -> Solution {
    let steps = trajectory.len() - 1;
    match &reason {
        TerminationReason::Failed(failure) => warn!(steps, %failure, "run failed"),
        reason => debug!(steps, ?reason, "run finished"),
    }

    Solution {
        reason,
        trajectory,
        rejected,
    }
}
