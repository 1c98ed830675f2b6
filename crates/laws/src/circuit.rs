use std::sync::Arc;

use strand_core::{
    DerivativeLaw, Diagnostics, DomainError, InvariantTracker, Rates, Schema, StateError,
    StateVector,
};

use crate::{
    layout::conform,
    parameter::{ParameterError, finite, non_negative, positive},
};

/// A sinusoidal source `V(t) = V₀·cos(ωt)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drive {
    pub amplitude: f64,
    pub angular_frequency: f64,
}

impl Drive {
    /// Returns the source voltage at `time`.
    #[must_use]
    pub fn voltage(&self, time: f64) -> f64 {
        self.amplitude * (self.angular_frequency * time).cos()
    }
}

/// A resistor, inductor and capacitor in series with an AC source.
///
/// Components: `charge` paired with `current`.
///
/// ```text
/// dI/dt = (V₀·cos ωt - R·I - Q/C) / L
/// ```
///
/// This is the one reference law whose rate depends on time.
#[derive(Debug, Clone)]
pub struct SeriesRlc {
    resistance: f64,
    inductance: f64,
    capacitance: f64,
    drive: Drive,
    schema: Arc<Schema>,
}

impl SeriesRlc {
    /// # Errors
    ///
    /// Returns an error if the inductance or capacitance is not finite and
    /// positive, the resistance is negative, or the drive is not finite.
    pub fn new(
        resistance: f64,
        inductance: f64,
        capacitance: f64,
        drive: Drive,
    ) -> Result<Self, ParameterError> {
        finite("amplitude", drive.amplitude)?;
        finite("angular_frequency", drive.angular_frequency)?;
        Ok(Self {
            resistance: non_negative("resistance", resistance)?,
            inductance: positive("inductance", inductance)?,
            capacitance: positive("capacitance", capacitance)?,
            drive,
            schema: Schema::builder().pair("charge", "current").build()?,
        })
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Angular frequency `1/sqrt(LC)` of the undriven, undamped circuit.
    #[must_use]
    pub fn resonant_frequency(&self) -> f64 {
        1.0 / (self.inductance * self.capacitance).sqrt()
    }

    /// Builds a state at time zero.
    ///
    /// # Errors
    ///
    /// Never fails for this law's schema.
    pub fn state(&self, charge: f64, current: f64) -> Result<StateVector, StateError> {
        StateVector::new(Arc::clone(&self.schema), 0.0, vec![charge, current])
    }
}

impl DerivativeLaw for SeriesRlc {
    fn rates(&self, state: &StateVector, time: f64) -> Result<Rates, DomainError> {
        conform("series RLC", &self.schema, state)?;
        let [charge, current] = [state.value(0), state.value(1)];
        let emf = self.drive.voltage(time)
            - self.resistance * current
            - charge / self.capacitance;
        Ok(Rates::from([emf / self.inductance]))
    }
}

impl InvariantTracker for SeriesRlc {
    fn record(&self, state: &StateVector) -> Diagnostics {
        if !state.conforms_to(&self.schema) {
            return Diagnostics::new();
        }
        let [charge, current] = [state.value(0), state.value(1)];
        Diagnostics::energy(
            0.5 * self.inductance * current * current,
            0.5 * charge * charge / self.capacitance,
        )
    }
}
