use std::{f64::consts::PI, sync::Arc};

use strand_core::{
    ANGULAR_MOMENTUM, DerivativeLaw, Diagnostics, DomainError, InvariantTracker, Rates, Schema,
    StateError, StateVector,
};

use crate::{
    layout::conform,
    parameter::{ParameterError, positive},
};

/// The shape of an orbit, judged from its specific mechanical energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitKind {
    Bound,
    Parabolic,
    Hyperbolic,
}

impl OrbitKind {
    /// Classifies an orbit by its total energy.
    ///
    /// Negative energy is bound. Otherwise energy within `tolerance` of zero
    /// is parabolic and anything else escapes.
    #[must_use]
    pub fn classify(energy: f64, tolerance: f64) -> Self {
        if energy < 0.0 {
            Self::Bound
        } else if energy.abs() <= tolerance {
            Self::Parabolic
        } else {
            Self::Hyperbolic
        }
    }
}

/// A planet moving around a star fixed at the origin.
///
/// Components: `position_x`, `velocity_x`, `position_y`, `velocity_y`.
///
/// ```text
/// a = -GM·r / |r|³
/// ```
///
/// The field is singular at the origin, where [`DerivativeLaw::rates`]
/// returns a [`DomainError`]. With a softening length `ε` the denominator
/// becomes `(|r|² + ε²)^(3/2)` and the law is defined everywhere.
#[derive(Debug, Clone)]
pub struct CentralGravity {
    gm: f64,
    mass: f64,
    softening: Option<f64>,
    schema: Arc<Schema>,
}

impl CentralGravity {
    /// Creates the field of a star with gravitational parameter `gm` acting
    /// on a planet of mass `mass`.
    ///
    /// # Errors
    ///
    /// Returns an error if either constant is not finite and positive.
    pub fn new(gm: f64, mass: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            gm: positive("gm", gm)?,
            mass: positive("mass", mass)?,
            softening: None,
            schema: Schema::builder()
                .pair("position_x", "velocity_x")
                .pair("position_y", "velocity_y")
                .build()?,
        })
    }

    /// The Sun in astronomical units and years (`GM = 4π²`) pulling on an
    /// Earth-mass planet.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` mirrors [`CentralGravity::new`].
    pub fn solar() -> Result<Self, ParameterError> {
        Self::new(4.0 * PI * PI, 3e-6)
    }

    /// # Errors
    ///
    /// Returns an error if `length` is not finite and positive.
    pub fn with_softening(mut self, length: f64) -> Result<Self, ParameterError> {
        self.softening = Some(positive("softening", length)?);
        Ok(self)
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Speed of a circular orbit at distance `radius`.
    #[must_use]
    pub fn circular_speed(&self, radius: f64) -> f64 {
        (self.gm / radius).sqrt()
    }

    /// Builds a state at time zero.
    ///
    /// # Errors
    ///
    /// Never fails for this law's schema.
    pub fn state(&self, position: [f64; 2], velocity: [f64; 2]) -> Result<StateVector, StateError> {
        StateVector::new(
            Arc::clone(&self.schema),
            0.0,
            vec![position[0], velocity[0], position[1], velocity[1]],
        )
    }

    fn squared_distance(&self, x: f64, y: f64) -> f64 {
        let eps = self.softening.unwrap_or(0.0);
        x * x + y * y + eps * eps
    }
}

impl DerivativeLaw for CentralGravity {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("central gravity", &self.schema, state)?;
        let (x, y) = (state.value(0), state.value(2));
        let r2 = self.squared_distance(x, y);
        if r2 == 0.0 {
            return Err(DomainError::new(
                "central gravity",
                "zero separation from the attracting body",
            ));
        }

        let scale = -self.gm / (r2 * r2.sqrt());
        Ok(Rates::from([scale * x, scale * y]))
    }
}

impl InvariantTracker for CentralGravity {
    fn record(&self, state: &StateVector) -> Diagnostics {
        if !state.conforms_to(&self.schema) {
            return Diagnostics::new();
        }
        let [x, vx, y, vy] = [0, 1, 2, 3].map(|i| state.value(i));
        let kinetic = 0.5 * self.mass * (vx * vx + vy * vy);
        let potential = -self.gm * self.mass / self.squared_distance(x, y).sqrt();
        Diagnostics::energy(kinetic, potential)
            .with(ANGULAR_MOMENTUM, self.mass * (x * vy - y * vx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn pull_points_at_the_star() {
        let law = CentralGravity::new(8.0, 1.0).unwrap();
        let rates = law.rates(&law.state([2.0, 0.0], [0.0, 0.0]).unwrap(), 0.0).unwrap();

        assert_relative_eq!(rates.values()[0], -2.0);
        assert_relative_eq!(rates.values()[1], 0.0);
    }

    #[test]
    fn origin_is_outside_the_domain_unless_softened() {
        let law = CentralGravity::solar().unwrap();
        let origin = law.state([0.0, 0.0], [1.0, 0.0]).unwrap();

        let err = law.rates(&origin, 0.0).unwrap_err();
        assert_eq!(err.law(), "central gravity");

        let softened = law.with_softening(0.1).unwrap();
        let rates = softened.rates(&origin, 0.0).unwrap();
        assert!(rates.values().iter().all(|r| *r == 0.0));
    }

    #[test]
    fn circular_orbit_is_bound_and_carries_angular_momentum() {
        let law = CentralGravity::solar().unwrap();
        let v = law.circular_speed(1.0);
        let diagnostics = law.record(&law.state([1.0, 0.0], [0.0, v]).unwrap());

        let energy = diagnostics.total_energy().unwrap();
        assert_relative_eq!(energy, -0.5 * law.gm * law.mass, max_relative = 1e-12);
        assert_eq!(OrbitKind::classify(energy, 1e-12), OrbitKind::Bound);
        assert_relative_eq!(
            diagnostics.get(ANGULAR_MOMENTUM).unwrap(),
            law.mass * v,
            max_relative = 1e-12
        );
    }

    #[test]
    fn classifies_by_energy_sign() {
        assert_eq!(OrbitKind::classify(-1.0, 1e-3), OrbitKind::Bound);
        assert_eq!(OrbitKind::classify(5e-4, 1e-3), OrbitKind::Parabolic);
        assert_eq!(OrbitKind::classify(1.0, 1e-3), OrbitKind::Hyperbolic);
    }
}
