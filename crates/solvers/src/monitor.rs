//! Event monitors decide, after every step, whether a run continues.
//!
//! A monitor sees the trajectory accepted so far and the candidate state the
//! integrator just produced. It either lets the run continue or stops it,
//! choosing whether the candidate is kept.
//!
//! Closures implement [`EventMonitor`], `()` never stops, `Option<M>` defers
//! to the monitor when present, and a pair `(A, B)` stops as soon as either
//! member does, checking `A` first.

mod steady;
mod threshold;

pub use steady::SteadyStateMonitor;
pub use threshold::{Crossing, Direction, ThresholdMonitor};

use strand_core::{Schema, StateVector, Trajectory};

use crate::ConfigError;

/// Why a monitor stopped a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A named event fired, such as a component crossing a threshold.
    Event(String),

    /// A convergence criterion was met.
    Converged,
}

/// A request to end the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub reason: StopReason,

    /// Whether the candidate state is appended to the trajectory.
    pub keep_state: bool,
}

/// A monitor's verdict on a candidate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Continue,
    Stop(Stop),
}

impl Check {
    /// Stops on a named event.
    #[must_use]
    pub fn event(name: impl Into<String>, keep_state: bool) -> Self {
        Self::Stop(Stop {
            reason: StopReason::Event(name.into()),
            keep_state,
        })
    }

    /// Stops because the run has converged, keeping the state.
    #[must_use]
    pub fn converged() -> Self {
        Self::Stop(Stop {
            reason: StopReason::Converged,
            keep_state: true,
        })
    }

    /// Returns whether the run should stop.
    #[must_use]
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop(_))
    }
}

/// Inspects each candidate state and decides whether the run stops.
pub trait EventMonitor {
    /// Checks the monitor against the schema before any stepping.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the monitor refers to a component the
    /// schema does not have.
    fn validate(&self, _schema: &Schema) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Judges the candidate `next` given the trajectory accepted so far.
    fn check(&mut self, trajectory: &Trajectory, next: &StateVector) -> Check;
}

/// Blanket implementation for monitor closures.
impl<F> EventMonitor for F
where
    F: FnMut(&Trajectory, &StateVector) -> Check,
{
    fn check(&mut self, trajectory: &Trajectory, next: &StateVector) -> Check {
        self(trajectory, next)
    }
}

/// A monitor that never stops.
impl EventMonitor for () {
    fn check(&mut self, _trajectory: &Trajectory, _next: &StateVector) -> Check {
        Check::Continue
    }
}

impl<M: EventMonitor> EventMonitor for Option<M> {
    fn validate(&self, schema: &Schema) -> Result<(), ConfigError> {
        self.as_ref().map_or(Ok(()), |monitor| monitor.validate(schema))
    }

    fn check(&mut self, trajectory: &Trajectory, next: &StateVector) -> Check {
        self.as_mut()
            .map_or(Check::Continue, |monitor| monitor.check(trajectory, next))
    }
}

impl<A: EventMonitor, B: EventMonitor> EventMonitor for (A, B) {
    fn validate(&self, schema: &Schema) -> Result<(), ConfigError> {
        self.0.validate(schema)?;
        self.1.validate(schema)
    }

    fn check(&mut self, trajectory: &Trajectory, next: &StateVector) -> Check {
        match self.0.check(trajectory, next) {
            Check::Continue => self.1.check(trajectory, next),
            stop => stop,
        }
    }
}

/// Ensures `component` names something in `schema`.
pub(crate) fn require_component(schema: &Schema, component: &str) -> Result<(), ConfigError> {
    if schema.contains(component) {
        Ok(())
    } else {
        Err(ConfigError::UnknownComponent(component.to_owned()))
    }
}
