use std::sync::Arc;

use strand_core::{
    DerivativeLaw, Diagnostics, DomainError, InvariantTracker, Rates, Schema, StateError,
    StateVector,
};

use crate::{
    layout::conform,
    parameter::{ParameterError, positive},
};

/// Two masses on a line, each tied to a wall and to each other by identical
/// springs.
///
/// Components: `position_1`, `velocity_1`, `position_2`, `velocity_2`.
///
/// ```text
/// a₁ = -(k/m₁)·(2x₁ - x₂)
/// a₂ = -(k/m₂)·(2x₂ - x₁)
/// ```
#[derive(Debug, Clone)]
pub struct CoupledOscillators {
    stiffness: f64,
    masses: [f64; 2],
    schema: Arc<Schema>,
}

impl CoupledOscillators {
    /// # Errors
    ///
    /// Returns an error if any constant is not finite and positive.
    pub fn new(stiffness: f64, mass_1: f64, mass_2: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            stiffness: positive("stiffness", stiffness)?,
            masses: [positive("mass_1", mass_1)?, positive("mass_2", mass_2)?],
            schema: Schema::builder()
                .pair("position_1", "velocity_1")
                .pair("position_2", "velocity_2")
                .build()?,
        })
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Builds a state at time zero with both masses at rest.
    ///
    /// # Errors
    ///
    /// Never fails for this law's schema.
    pub fn displaced(&self, position_1: f64, position_2: f64) -> Result<StateVector, StateError> {
        StateVector::new(
            Arc::clone(&self.schema),
            0.0,
            vec![position_1, 0.0, position_2, 0.0],
        )
    }
}

impl DerivativeLaw for CoupledOscillators {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("coupled oscillators", &self.schema, state)?;
        let (x1, x2) = (state.value(0), state.value(2));
        let [m1, m2] = self.masses;
        Ok(Rates::from([
            -(self.stiffness / m1) * (2.0 * x1 - x2),
            -(self.stiffness / m2) * (2.0 * x2 - x1),
        ]))
    }
}

impl InvariantTracker for CoupledOscillators {
    fn record(&self, state: &StateVector) -> Diagnostics {
        if !state.conforms_to(&self.schema) {
            return Diagnostics::new();
        }
        let [x1, v1, x2, v2] = [0, 1, 2, 3].map(|i| state.value(i));
        let [m1, m2] = self.masses;

        let kinetic = 0.5 * (m1 * v1 * v1 + m2 * v2 * v2);
        let stretch = x2 - x1;
        let potential = 0.5 * self.stiffness * (x1 * x1 + stretch * stretch + x2 * x2);
        Diagnostics::energy(kinetic, potential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn equal_displacement_stretches_only_wall_springs() {
        let law = CoupledOscillators::new(10.0, 1.5, 2.0).unwrap();
        let state = law.displaced(0.1, 0.1).unwrap();
        let rates = law.rates(&state, 0.0).unwrap();

        assert_relative_eq!(rates.values()[0], -(10.0 / 1.5) * 0.1);
        assert_relative_eq!(rates.values()[1], -(10.0 / 2.0) * 0.1);

        let diagnostics = law.record(&state);
        assert_relative_eq!(
            diagnostics.total_energy().unwrap(),
            0.5 * 10.0 * 0.02,
            epsilon = 1e-12
        );
    }
}
