use std::sync::Arc;

use strand_core::{
    DerivativeLaw, Diagnostics, DomainError, InvariantTracker, Rates, Schema, StateError,
    StateVector,
};

use crate::{
    layout::conform,
    parameter::{ParameterError, non_negative, positive},
};

/// A mass on a linear spring with optional viscous damping.
///
/// Components: `position`, `velocity`.
///
/// ```text
/// a = -(k/m)·x - (b/m)·v
/// ```
///
/// With zero damping the oscillator is lossless, which makes it the standard
/// check of how well a scheme conserves energy.
#[derive(Debug, Clone)]
pub struct Spring {
    mass: f64,
    stiffness: f64,
    damping: f64,
    schema: Arc<Schema>,
}

impl Spring {
    /// Creates an undamped spring.
    ///
    /// # Errors
    ///
    /// Returns an error if `mass` or `stiffness` is not finite and positive.
    pub fn new(mass: f64, stiffness: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            mass: positive("mass", mass)?,
            stiffness: positive("stiffness", stiffness)?,
            damping: 0.0,
            schema: Schema::builder().pair("position", "velocity").build()?,
        })
    }

    /// Sets the viscous damping coefficient `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if `damping` is negative or not finite.
    pub fn with_damping(mut self, damping: f64) -> Result<Self, ParameterError> {
        self.damping = non_negative("damping", damping)?;
        Ok(self)
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the undamped angular frequency `sqrt(k/m)`.
    #[must_use]
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Builds a state at time zero.
    ///
    /// # Errors
    ///
    /// Never fails for this law's schema; the `Result` mirrors
    /// [`StateVector::new`].
    pub fn state(&self, position: f64, velocity: f64) -> Result<StateVector, StateError> {
        StateVector::new(Arc::clone(&self.schema), 0.0, vec![position, velocity])
    }
}

impl DerivativeLaw for Spring {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("spring", &self.schema, state)?;
        let [x, v] = [state.value(0), state.value(1)];
        let acceleration = -(self.stiffness * x + self.damping * v) / self.mass;
        Ok(Rates::from([acceleration]))
    }
}

impl InvariantTracker for Spring {
    fn record(&self, state: &StateVector) -> Diagnostics {
        if !state.conforms_to(&self.schema) {
            return Diagnostics::new();
        }
        let [x, v] = [state.value(0), state.value(1)];
        Diagnostics::energy(0.5 * self.mass * v * v, 0.5 * self.stiffness * x * x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn acceleration_opposes_displacement_and_motion() {
        let spring = Spring::new(2.0, 8.0).unwrap().with_damping(0.5).unwrap();
        let state = spring.state(1.0, 2.0).unwrap();

        let rates = spring.rates(&state, 0.0).unwrap();

        // -(8·1 + 0.5·2) / 2
        assert_relative_eq!(rates.values()[0], -4.5);
        assert_relative_eq!(spring.natural_frequency(), 2.0);
    }

    #[test]
    fn energy_splits_kinetic_and_potential() {
        let spring = Spring::new(1.0, 4.0).unwrap();
        let diagnostics = spring.record(&spring.state(0.5, 1.0).unwrap());

        assert_relative_eq!(diagnostics.total_energy().unwrap(), 0.5 + 0.5);
    }

    #[test]
    fn state_of_another_law_is_rejected() {
        let spring = Spring::new(1.0, 1.0).unwrap();
        let schema = Schema::builder().free("temperature").build().unwrap();
        let state = StateVector::new(schema, 0.0, vec![20.0]).unwrap();

        let err = spring.rates(&state, 0.0).unwrap_err();
        assert_eq!(err.law(), "spring");
        assert!(spring.record(&state).is_empty());
    }

    #[test]
    fn rejects_bad_constants() {
        assert_eq!(
            Spring::new(0.0, 1.0).unwrap_err(),
            ParameterError::NonPositive("mass")
        );
        assert_eq!(
            Spring::new(1.0, 1.0)
                .unwrap()
                .with_damping(-0.1)
                .unwrap_err(),
            ParameterError::Negative("damping")
        );
    }
}
