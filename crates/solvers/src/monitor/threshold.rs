use serde::{Deserialize, Serialize};
use strand_core::{Schema, StateVector, Trajectory};

use crate::ConfigError;

use super::{Check, EventMonitor, require_component};

/// Which side of the threshold ends the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Stop once the component is at or below the threshold.
    #[default]
    Below,

    /// Stop once the component is at or above the threshold.
    Above,
}

/// What happens to the state that crossed the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crossing {
    /// Drop the crossing state; the last retained state is still in bounds.
    #[default]
    Discard,

    /// Append the crossing state before stopping.
    Retain,
}

/// Stops a run when a component reaches a threshold, such as a projectile
/// hitting the ground.
///
/// The event is named after the component.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMonitor {
    component: String,
    threshold: f64,
    direction: Direction,
    crossing: Crossing,
}

impl ThresholdMonitor {
    /// Creates a monitor with an explicit direction and crossing policy.
    #[must_use]
    pub fn new(
        component: impl Into<String>,
        threshold: f64,
        direction: Direction,
        crossing: Crossing,
    ) -> Self {
        Self {
            component: component.into(),
            threshold,
            direction,
            crossing,
        }
    }

    /// Stops when `component <= threshold`, discarding the crossing state.
    #[must_use]
    pub fn below(component: impl Into<String>, threshold: f64) -> Self {
        Self::new(component, threshold, Direction::Below, Crossing::Discard)
    }

    /// Stops when `component >= threshold`, discarding the crossing state.
    #[must_use]
    pub fn above(component: impl Into<String>, threshold: f64) -> Self {
        Self::new(component, threshold, Direction::Above, Crossing::Discard)
    }

    /// Sets whether the crossing state is kept.
    #[must_use]
    pub fn with_crossing(mut self, crossing: Crossing) -> Self {
        self.crossing = crossing;
        self
    }

    /// Returns the watched component.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the value that ends the run.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns which side of the threshold ends the run.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns whether the crossing state is kept.
    #[must_use]
    pub fn crossing(&self) -> Crossing {
        self.crossing
    }

    fn crossed(&self, value: f64) -> bool {
        match self.direction {
            Direction::Below => value <= self.threshold,
            Direction::Above => value >= self.threshold,
        }
    }
}

impl EventMonitor for ThresholdMonitor {
    fn validate(&self, schema: &Schema) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() {
            return Err(ConfigError::Threshold);
        }
        require_component(schema, &self.component)
    }

    fn check(&mut self, _trajectory: &Trajectory, next: &StateVector) -> Check {
        match next.get(&self.component) {
            Some(value) if self.crossed(value) => {
                Check::event(self.component.clone(), self.crossing == Crossing::Retain)
            }
            _ => Check::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strand_core::Sample;

    fn height(value: f64) -> StateVector {
        let schema = Schema::builder().pair("height", "velocity").build().unwrap();
        StateVector::new(schema, 0.0, vec![value, -1.0]).unwrap()
    }

    fn start() -> Trajectory {
        Trajectory::new(Sample::new(height(10.0), None))
    }

    #[test]
    fn below_fires_at_and_under_the_threshold() {
        let mut monitor = ThresholdMonitor::below("height", 0.0);

        assert_eq!(monitor.check(&start(), &height(0.1)), Check::Continue);
        assert_eq!(
            monitor.check(&start(), &height(0.0)),
            Check::event("height", false)
        );
        assert_eq!(
            monitor.check(&start(), &height(-0.3)),
            Check::event("height", false)
        );
    }

    #[test]
    fn above_can_retain_the_crossing_state() {
        let mut monitor = ThresholdMonitor::above("height", 5.0).with_crossing(Crossing::Retain);

        assert_eq!(monitor.check(&start(), &height(4.9)), Check::Continue);
        assert_eq!(
            monitor.check(&start(), &height(5.5)),
            Check::event("height", true)
        );
    }

    #[test]
    fn validation_requires_a_known_component_and_finite_threshold() {
        let schema = height(0.0).schema().clone();

        assert!(ThresholdMonitor::below("height", 0.0).validate(&schema).is_ok());
        assert_eq!(
            ThresholdMonitor::below("altitude", 0.0).validate(&schema),
            Err(ConfigError::UnknownComponent("altitude".into()))
        );
        assert_eq!(
            ThresholdMonitor::below("height", f64::NAN).validate(&schema),
            Err(ConfigError::Threshold)
        );
    }
}
