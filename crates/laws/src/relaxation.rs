use std::sync::Arc;

use strand_core::{DerivativeLaw, DomainError, Rates, Schema, StateError, StateVector};

use crate::{
    layout::conform,
    parameter::{ParameterError, finite, positive},
};

/// Exponential relaxation toward a fixed target, `dT/dt = -k·(T - T_target)`.
///
/// Covers Newton's law of cooling and a capacitor charging from a supply
/// through a resistor.
#[derive(Debug, Clone)]
pub struct Relaxation {
    rate: f64,
    target: f64,
    schema: Arc<Schema>,
}

impl Relaxation {
    /// # Errors
    ///
    /// Returns an error if `rate` is not finite and positive, `target` is not
    /// finite, or the component name is empty.
    pub fn new(component: &str, rate: f64, target: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            rate: positive("rate", rate)?,
            target: finite("target", target)?,
            schema: Schema::builder().free(component).build()?,
        })
    }

    /// A body's `temperature` cooling toward `ambient`.
    ///
    /// # Errors
    ///
    /// Returns an error if a constant is out of range.
    pub fn newton_cooling(cooling_constant: f64, ambient: f64) -> Result<Self, ParameterError> {
        Self::new("temperature", cooling_constant, ambient)
    }

    /// Capacitor `voltage` charging toward `supply`.
    ///
    /// # Errors
    ///
    /// Returns an error if a constant is out of range.
    pub fn capacitor_charging(
        resistance: f64,
        capacitance: f64,
        supply: f64,
    ) -> Result<Self, ParameterError> {
        let tau = positive("resistance", resistance)? * positive("capacitance", capacitance)?;
        Self::new("voltage", 1.0 / tau, supply)
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the value the component relaxes toward.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Exact solution `T_target + (T₀ - T_target)·e^(-kt)`.
    #[must_use]
    pub fn analytic(&self, initial: f64, time: f64) -> f64 {
        self.target + (initial - self.target) * (-self.rate * time).exp()
    }

    /// Builds a state at time zero.
    ///
    /// # Errors
    ///
    /// Never fails for this law's schema.
    pub fn state(&self, initial: f64) -> Result<StateVector, StateError> {
        StateVector::new(Arc::clone(&self.schema), 0.0, vec![initial])
    }
}

impl DerivativeLaw for Relaxation {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("relaxation", &self.schema, state)?;
        Ok(Rates::from([-self.rate * (state.value(0) - self.target)]))
    }
}
