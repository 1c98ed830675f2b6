use strand_core::Trajectory;

use crate::axis::{self, TIME, UnknownColumn};

/// Paired `(x, y)` values ready for an external plotter.
///
/// Either axis may be `time`, a component, or a diagnostic. Plotting
/// `position_y` against `position_x` traces a projectile's path; plotting
/// `total_energy` against `time` shows drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if either axis cannot be resolved.
    pub fn new(trajectory: &Trajectory, x: &str, y: &str) -> Result<Self, UnknownColumn> {
        Ok(Self {
            x_label: x.to_owned(),
            y_label: y.to_owned(),
            x: axis::values(trajectory, x)?,
            y: axis::values(trajectory, y)?,
        })
    }

    /// Plots `y` against time.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if `y` cannot be resolved.
    pub fn over_time(trajectory: &Trajectory, y: &str) -> Result<Self, UnknownColumn> {
        Self::new(trajectory, TIME, y)
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns whether the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterates over `(x, y)` pairs in sample order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use strand_core::{Diagnostics, Sample, Schema, StateVector, TOTAL_ENERGY};

    fn flight() -> Trajectory {
        let schema = Schema::builder()
            .pair("position_x", "velocity_x")
            .pair("position_y", "velocity_y")
            .build()
            .unwrap();
        let sample = |t: f64, x: f64, y: f64| {
            let state = StateVector::new(Arc::clone(&schema), t, vec![x, 1.0, y, 0.0]).unwrap();
            Sample::new(state, Some(Diagnostics::energy(1.0, y)))
        };

        let mut trajectory = Trajectory::new(sample(0.0, 0.0, 0.0));
        trajectory.push(sample(0.1, 1.0, 0.5));
        trajectory.push(sample(0.2, 2.0, 0.0));
        trajectory
    }

    #[test]
    fn pairs_two_components() {
        let path = Series::new(&flight(), "position_x", "position_y").unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(
            path.points().collect::<Vec<_>>(),
            [(0.0, 0.0), (1.0, 0.5), (2.0, 0.0)]
        );
        assert_eq!(path.x_label, "position_x");
    }

    #[test]
    fn plots_diagnostics_over_time() {
        let energy = Series::over_time(&flight(), TOTAL_ENERGY).unwrap();

        assert_eq!(energy.x, [0.0, 0.1, 0.2]);
        assert_eq!(energy.y, [1.0, 1.5, 1.0]);
    }

    #[test]
    fn unresolved_axis_is_an_error() {
        let err = Series::over_time(&flight(), "angular_momentum").unwrap_err();
        assert_eq!(err, UnknownColumn("angular_momentum".into()));
    }
}
