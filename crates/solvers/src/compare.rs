use strand_core::{DerivativeLaw, InvariantTracker, StateVector};
use tracing::debug;

use crate::{Config, ConfigError, EventMonitor, SchemeKind, Solution, run};

/// The same problem solved under both schemes.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub euler: Solution,
    pub euler_cromer: Solution,
}

impl Comparison {
    /// Returns the solution for one scheme.
    #[must_use]
    pub fn get(&self, scheme: SchemeKind) -> &Solution {
        match scheme {
            SchemeKind::Euler => &self.euler,
            SchemeKind::EulerCromer => &self.euler_cromer,
        }
    }

    /// Iterates over `(scheme, solution)` in [`SchemeKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (SchemeKind, &Solution)> {
        SchemeKind::ALL.into_iter().map(|scheme| (scheme, self.get(scheme)))
    }
}

/// Runs `law` from `initial` once per scheme with identical settings.
///
/// Each run gets its own clone of `monitor`, so stateful monitors start
/// fresh.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the runs cannot start.
pub fn compare_schemes<L, M, T>(
    law: &L,
    initial: &StateVector,
    config: Config,
    monitor: M,
    tracker: &T,
) -> Result<Comparison, ConfigError>
where
    L: DerivativeLaw + ?Sized,
    M: EventMonitor + Clone,
    T: InvariantTracker + ?Sized,
{
    let euler = run(
        law,
        initial.clone(),
        SchemeKind::Euler,
        config,
        monitor.clone(),
        tracker,
    )?;
    let euler_cromer = run(
        law,
        initial.clone(),
        SchemeKind::EulerCromer,
        config,
        monitor,
        tracker,
    )?;

    debug!(
        euler_steps = euler.steps(),
        euler_cromer_steps = euler_cromer.steps(),
        "compared schemes"
    );
    Ok(Comparison {
        euler,
        euler_cromer,
    })
}
