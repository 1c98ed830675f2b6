use thiserror::Error;

use crate::{ConfigError, Failure};

/// Errors that can occur during step-halving refinement.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RefineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("run with dt = {dt} failed: {failure}")]
    RunFailed { dt: f64, failure: Failure },
}
