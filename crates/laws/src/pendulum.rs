use std::sync::Arc;

use strand_core::{
    DerivativeLaw, Diagnostics, DomainError, InvariantTracker, Rates, Schema, StateError,
    StateVector,
};

use crate::{
    layout::conform,
    parameter::{ParameterError, positive},
};

/// A simple pendulum without the small-angle approximation.
///
/// Components: `angle` (radians), `angular_velocity`.
///
/// ```text
/// α = -(g/L)·sin θ
/// ```
///
/// Energies are per unit bob mass.
#[derive(Debug, Clone)]
pub struct Pendulum {
    gravity: f64,
    length: f64,
    schema: Arc<Schema>,
}

impl Pendulum {
    /// # Errors
    ///
    /// Returns an error if `gravity` or `length` is not finite and positive.
    pub fn new(gravity: f64, length: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            gravity: positive("gravity", gravity)?,
            length: positive("length", length)?,
            schema: Schema::builder().pair("angle", "angular_velocity").build()?,
        })
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Builds a state at time zero from an angle in degrees.
    ///
    /// # Errors
    ///
    /// Never fails for this law's schema.
    pub fn released_at(&self, degrees: f64) -> Result<StateVector, StateError> {
        StateVector::new(Arc::clone(&self.schema), 0.0, vec![degrees.to_radians(), 0.0])
    }
}

impl DerivativeLaw for Pendulum {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("pendulum", &self.schema, state)?;
        let angle = state.value(0);
        Ok(Rates::from([-(self.gravity / self.length) * angle.sin()]))
    }
}

impl InvariantTracker for Pendulum {
    fn record(&self, state: &StateVector) -> Diagnostics {
        if !state.conforms_to(&self.schema) {
            return Diagnostics::new();
        }
        let [angle, omega] = [state.value(0), state.value(1)];
        let speed = self.length * omega;
        Diagnostics::energy(
            0.5 * speed * speed,
            self.gravity * self.length * (1.0 - angle.cos()),
        )
    }
}
