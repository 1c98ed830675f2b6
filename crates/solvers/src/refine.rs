//! Step-halving refinement of a fixed-step run.
//!
//! Each iteration is an independent run over the same interval with twice
//! as many steps as the last. The observable is read at a target time by
//! linear interpolation, and refinement stops once two successive estimates
//! agree within the tolerance:
//!
//! ```text
//! |y(h/2) - y(h)| < tolerance
//! ```

mod config;
mod error;
mod solution;

pub use config::RefineConfig;
pub use error::RefineError;
pub use solution::{Estimate, RefineStatus, Refined};

use strand_core::{DerivativeLaw, StateVector};
use tracing::{debug, debug_span, warn};

use crate::{Config, ConfigError, SchemeKind, monitor::require_component, run_unmonitored};

/// Refines the step until `observable` at the target time converges.
///
/// # Errors
///
/// Returns [`RefineError::Config`] if the observable is not in the schema or
/// a run cannot be configured, and [`RefineError::RunFailed`] if any run
/// fails. Failed runs are never retried.
pub fn refine<L>(
    law: &L,
    initial: &StateVector,
    scheme: SchemeKind,
    observable: &str,
    config: RefineConfig,
) -> Result<Refined, RefineError>
where
    L: DerivativeLaw + ?Sized,
{
    require_component(initial.schema(), observable)?;

    let _span = debug_span!("refine", %scheme, observable).entered();
    let target = initial.time() + config.target_time();

    let mut steps = config.initial_steps();
    let mut refinements = 0;
    let mut history: Vec<Estimate> = Vec::new();

    loop {
        let run_config = Config::spanning(config.t_end(), steps)?;
        let dt = run_config.dt();
        let solution = run_unmonitored(law, initial.clone(), scheme, run_config)?;

        if let Some(failure) = solution.failure() {
            warn!(dt, %failure, "refinement run failed");
            return Err(RefineError::RunFailed {
                dt,
                failure: failure.clone(),
            });
        }

        let value = solution
            .trajectory
            .interpolate(observable, target)
            .ok_or_else(|| ConfigError::UnknownComponent(observable.to_owned()))?;
        let change = history
            .last()
            .map_or(f64::INFINITY, |previous| (value - previous.value).abs());
        history.push(Estimate { dt, value });
        debug!(refinements, steps, dt, value, change, "estimate");

        let status = if change < config.tolerance() {
            RefineStatus::Converged
        } else if refinements >= config.max_refinements() {
            RefineStatus::MaxRefinementsReached
        } else {
            steps = steps.saturating_mul(2);
            refinements += 1;
            continue;
        };

        debug!(?status, refinements, value, "refinement finished");
        return Ok(Refined {
            status,
            value,
            change,
            refinements,
            history,
            solution,
        });
    }
}
