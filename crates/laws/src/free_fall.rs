use std::sync::Arc;

use strand_core::{
    DerivativeLaw, Diagnostics, DomainError, InvariantTracker, Rates, Schema, StateError,
    StateVector,
};

use crate::{
    layout::conform,
    parameter::{ParameterError, non_negative, positive},
};

/// Vertical motion under uniform gravity with optional quadratic drag.
///
/// Components: `height`, `velocity` (positive upward).
///
/// ```text
/// a = -g - (k/m)·|v|·v
/// ```
///
/// Drag always opposes the motion. Energies are per unit mass.
#[derive(Debug, Clone)]
pub struct FreeFall {
    gravity: f64,
    drag: f64,
    schema: Arc<Schema>,
}

impl FreeFall {
    /// Creates a drag-free fall with gravitational acceleration `gravity`.
    ///
    /// # Errors
    ///
    /// Returns an error if `gravity` is not finite and positive.
    pub fn new(gravity: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            gravity: positive("gravity", gravity)?,
            drag: 0.0,
            schema: Schema::builder().pair("height", "velocity").build()?,
        })
    }

    /// Sets the drag coefficient per unit mass, `k/m`.
    ///
    /// # Errors
    ///
    /// Returns an error if `drag` is negative or not finite.
    pub fn with_drag(mut self, drag: f64) -> Result<Self, ParameterError> {
        self.drag = non_negative("drag", drag)?;
        Ok(self)
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the speed at which drag balances gravity, if there is drag.
    #[must_use]
    pub fn terminal_speed(&self) -> Option<f64> {
        (self.drag > 0.0).then(|| (self.gravity / self.drag).sqrt())
    }

    /// Builds a state at time zero.
    ///
    /// # Errors
    ///
    /// Never fails for this law's schema.
    pub fn dropped_from(&self, height: f64, velocity: f64) -> Result<StateVector, StateError> {
        StateVector::new(Arc::clone(&self.schema), 0.0, vec![height, velocity])
    }
}

impl DerivativeLaw for FreeFall {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("free fall", &self.schema, state)?;
        let v = state.value(1);
        Ok(Rates::from([-self.gravity - self.drag * v.abs() * v]))
    }
}

impl InvariantTracker for FreeFall {
    fn record(&self, state: &StateVector) -> Diagnostics {
        if !state.conforms_to(&self.schema) {
            return Diagnostics::new();
        }
        let [height, v] = [state.value(0), state.value(1)];
        Diagnostics::energy(0.5 * v * v, self.gravity * height)
    }
}
