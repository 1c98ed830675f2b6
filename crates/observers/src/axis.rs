use strand_core::Trajectory;
use thiserror::Error;

/// Column name that selects sample times.
pub const TIME: &str = "time";

/// A column or axis name that the trajectory cannot supply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{0}` is not time, a component, or a diagnostic recorded on every sample")]
pub struct UnknownColumn(pub String);

/// Resolves a column name to its values, one per sample.
///
/// Components shadow diagnostics of the same name.
pub(crate) fn values(trajectory: &Trajectory, name: &str) -> Result<Vec<f64>, UnknownColumn> {
    if name == TIME {
        return Ok(trajectory.times());
    }
    trajectory
        .series(name)
        .or_else(|| trajectory.diagnostic_series(name))
        .ok_or_else(|| UnknownColumn(name.to_owned()))
}

/// Every column the trajectory can supply, in display order.
///
/// Diagnostics are listed in the order the first sample recorded them.
pub(crate) fn all_columns(trajectory: &Trajectory) -> Vec<String> {
    let mut columns = vec![TIME.to_owned()];
    columns.extend(trajectory.schema().names().map(str::to_owned));

    if let Some(diagnostics) = &trajectory.first().diagnostics {
        columns.extend(
            diagnostics
                .names()
                .filter(|name| !trajectory.schema().contains(name))
                .filter(|name| trajectory.diagnostic_series(name).is_some())
                .map(str::to_owned),
        );
    }
    columns
}
