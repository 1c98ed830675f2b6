use std::sync::Arc;

use strand_core::{DerivativeLaw, DomainError, Rates, Schema, StateError, StateVector};

use crate::{
    layout::conform,
    parameter::{ParameterError, positive},
};

/// First-order exponential decay of a single quantity, `dN/dt = -λ·N`.
///
/// The same law describes radioactive decay, Beer-Lambert absorption (with
/// depth as the independent variable), and a capacitor discharging through
/// a resistor (`λ = 1/RC`).
#[derive(Debug, Clone)]
pub struct Decay {
    rate: f64,
    schema: Arc<Schema>,
}

impl Decay {
    /// Creates a decay law for a free component named `component`.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is not finite and positive or the name is
    /// empty.
    pub fn new(component: &str, rate: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            rate: positive("rate", rate)?,
            schema: Schema::builder().free(component).build()?,
        })
    }

    /// Radioactive decay of a count of `nuclei`.
    ///
    /// # Errors
    ///
    /// Returns an error if `decay_constant` is not finite and positive.
    pub fn radioactive(decay_constant: f64) -> Result<Self, ParameterError> {
        Self::new("nuclei", decay_constant)
    }

    /// Attenuation of beam `intensity` with depth.
    ///
    /// # Errors
    ///
    /// Returns an error if `attenuation` is not finite and positive.
    pub fn absorption(attenuation: f64) -> Result<Self, ParameterError> {
        Self::new("intensity", attenuation)
    }

    /// Capacitor `voltage` discharging through a resistor.
    ///
    /// # Errors
    ///
    /// Returns an error if either constant is not finite and positive.
    pub fn discharge(resistance: f64, capacitance: f64) -> Result<Self, ParameterError> {
        let tau = positive("resistance", resistance)? * positive("capacitance", capacitance)?;
        Self::new("voltage", 1.0 / tau)
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the decay constant.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Exact solution `N₀·e^(-λt)`.
    #[must_use]
    pub fn analytic(&self, initial: f64, time: f64) -> f64 {
        initial * (-self.rate * time).exp()
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

impl DerivativeLaw for Decay {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("decay", &self.schema, state)?;
        Ok(Rates::from([-self.rate * state.value(0)]))
    }
}
