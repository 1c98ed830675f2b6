//! Headline metrics of a finished run.

use strand_core::{TOTAL_ENERGY, Trajectory};
use strand_solvers::Solution;

use crate::axis::{self, UnknownColumn};

/// The largest value a column reaches and when it first reaches it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub time: f64,
    pub value: f64,
}

/// Read-only metrics over a trajectory.
///
/// Quantities are named the way [`Table`](crate::Table) columns are. The
/// energy metrics read the `total_energy` diagnostic, so the run must have
/// been given a tracker that records it.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    trajectory: &'a Trajectory,
}

impl<'a> Summary<'a> {
    /// Summarizes a trajectory.
    #[must_use]
    pub fn new(trajectory: &'a Trajectory) -> Self {
        Self { trajectory }
    }

    /// Summarizes the trajectory of a run.
    #[must_use]
    pub fn of(solution: &'a Solution) -> Self {
        Self::new(&solution.trajectory)
    }

    /// Time covered by the trajectory, such as a projectile's flight time.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.trajectory.last().state.time() - self.trajectory.first().state.time()
    }

    /// Value at the last accepted sample.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if `name` cannot be resolved.
    pub fn final_value(&self, name: &str) -> Result<f64, UnknownColumn> {
        let values = axis::values(self.trajectory, name)?;
        Ok(values.last().copied().unwrap_or(f64::NAN))
    }

    /// Last value minus first value, such as a projectile's range.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if `name` cannot be resolved.
    pub fn change(&self, name: &str) -> Result<f64, UnknownColumn> {
        let values = axis::values(self.trajectory, name)?;
        match (values.first(), values.last()) {
            (Some(first), Some(last)) => Ok(last - first),
            _ => Ok(f64::NAN),
        }
    }

    /// The maximum value and the earliest time it occurs.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if `name` cannot be resolved.
    pub fn peak(&self, name: &str) -> Result<Peak, UnknownColumn> {
        let values = axis::values(self.trajectory, name)?;
        let mut peak = Peak {
            time: self.trajectory.first().state.time(),
            value: f64::NEG_INFINITY,
        };
        for (state, value) in self.trajectory.states().zip(values) {
            if value > peak.value {
                peak = Peak {
                    time: state.time(),
                    value,
                };
            }
        }
        Ok(peak)
    }

    /// Final total energy minus initial total energy.
    ///
    /// Negative when a dissipative force removed energy.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if total energy was not recorded.
    pub fn energy_change(&self) -> Result<f64, UnknownColumn> {
        self.change(TOTAL_ENERGY)
    }

    /// The largest `|E - E0| / |E0|` over the run.
    ///
    /// Falls back to the absolute deviation when `E0` is zero.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if total energy was not recorded.
    pub fn max_energy_drift(&self) -> Result<f64, UnknownColumn> {
        let energy = axis::values(self.trajectory, TOTAL_ENERGY)?;
        let initial = energy.first().copied().unwrap_or(0.0);
        let scale = if initial == 0.0 { 1.0 } else { initial.abs() };

        Ok(energy
            .iter()
            .map(|e| (e - initial).abs() / scale)
            .fold(0.0, f64::max))
    }

    /// Whether the quantity strictly increases at every step.
    ///
    /// A trajectory with a single sample trivially grows.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if `name` cannot be resolved.
    pub fn grows_monotonically(&self, name: &str) -> Result<bool, UnknownColumn> {
        let values = axis::values(self.trajectory, name)?;
        Ok(values.windows(2).all(|pair| pair[1] > pair[0]))
    }
}
