use strand_core::{Schema, StateVector, Trajectory};

use crate::ConfigError;

use super::{Check, EventMonitor, require_component};

/// Stops a run once a component has settled.
///
/// The run ends with [`StopReason::Converged`](super::StopReason::Converged)
/// as soon as a single step changes the component by less than `tolerance`.
/// The settled state is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateMonitor {
    component: String,
    tolerance: f64,
}

impl SteadyStateMonitor {
    /// Stops once a step changes `component` by less than `tolerance`.
    #[must_use]
    pub fn new(component: impl Into<String>, tolerance: f64) -> Self {
        Self {
            component: component.into(),
            tolerance,
        }
    }

    /// Returns the watched component.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the per-step change that counts as settled.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl EventMonitor for SteadyStateMonitor {
    fn validate(&self, schema: &Schema) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        require_component(schema, &self.component)
    }

    fn check(&mut self, trajectory: &Trajectory, next: &StateVector) -> Check {
        let previous = trajectory.last().state.get(&self.component);
        match (previous, next.get(&self.component)) {
            (Some(before), Some(after)) if (after - before).abs() < self.tolerance => {
                Check::converged()
            }
            _ => Check::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strand_core::Sample;

    fn temperature(value: f64) -> StateVector {
        let schema = Schema::builder().free("temperature").build().unwrap();
        StateVector::new(schema, 0.0, vec![value]).unwrap()
    }

    #[test]
    fn converges_when_a_step_barely_moves() {
        let trajectory = Trajectory::new(Sample::new(temperature(30.0), None));
        let mut monitor = SteadyStateMonitor::new("temperature", 1e-3);

        assert_eq!(monitor.check(&trajectory, &temperature(29.0)), Check::Continue);
        assert_eq!(
            monitor.check(&trajectory, &temperature(29.9995)),
            Check::converged()
        );
    }

    #[test]
    fn tolerance_must_be_positive() {
        let schema = temperature(0.0).schema().clone();

        assert_eq!(
            SteadyStateMonitor::new("temperature", 0.0).validate(&schema),
            Err(ConfigError::Tolerance)
        );
        assert!(SteadyStateMonitor::new("temperature", 1e-6).validate(&schema).is_ok());
    }
}
