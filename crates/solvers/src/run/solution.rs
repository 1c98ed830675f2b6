use strand_core::{DomainError, StateVector, Trajectory};
use thiserror::Error;

use crate::StepError;

/// Why a run that had started could not continue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Failure {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("law returned {found} rates, schema expects {expected}")]
    RateMismatch { expected: usize, found: usize },

    #[error("{component} became non-finite at step {step}")]
    NumericDivergence { component: String, step: usize },
}

impl From<StepError> for Failure {
    fn from(err: StepError) -> Self {
        match err {
            StepError::Domain(err) => Self::Domain(err),
            StepError::RateMismatch { expected, found } => Self::RateMismatch { expected, found },
        }
    }
}

/// How a run ended. Exactly one reason applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Took every allowed step.
    MaxStepsReached,

    /// A monitor stopped the run on the named event.
    EventTriggered(String),

    /// A monitor judged the run converged.
    Converged,

    /// The run aborted; the trajectory holds every state accepted before.
    Failed(Failure),
}

/// The result of a run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// How the run ended.
    pub reason: TerminationReason,

    /// Accepted states, starting with the initial condition.
    pub trajectory: Trajectory,

    /// The state a monitor stopped on without keeping it, if any.
    pub rejected: Option<StateVector>,
}

impl Solution {
    /// Number of accepted steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.trajectory.len() - 1
    }

    /// Returns the last accepted state.
    #[must_use]
    pub fn final_state(&self) -> &StateVector {
        &self.trajectory.last().state
    }

    /// Returns the failure that ended the run, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match &self.reason {
            TerminationReason::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns whether the run ended in a failure.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failure().is_some()
    }
}
