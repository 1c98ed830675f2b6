use std::sync::Arc;

use strand_core::{
    DerivativeLaw, Diagnostics, DomainError, InvariantTracker, Rates, Schema, StateError,
    StateVector,
};

use crate::{
    layout::conform,
    parameter::{ParameterError, finite, non_negative, positive},
};

/// Lift from a spinning ball, `F = S·(ω × v)` with spin about the z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnus {
    pub coefficient: f64,
    pub spin: f64,
}

/// A projectile in the vertical plane.
///
/// Components: `position_x`, `velocity_x`, `position_y`, `velocity_y`.
///
/// ```text
/// a = -(c/m)·|v|·v + (S/m)·(ω × v) - g·ŷ
/// ```
///
/// With no drag and no spin the path is the textbook parabola.
#[derive(Debug, Clone)]
pub struct Projectile {
    mass: f64,
    gravity: f64,
    drag: f64,
    magnus: Option<Magnus>,
    schema: Arc<Schema>,
}

impl Projectile {
    /// # Errors
    ///
    /// Returns an error if `mass` or `gravity` is not finite and positive.
    pub fn new(mass: f64, gravity: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            mass: positive("mass", mass)?,
            gravity: positive("gravity", gravity)?,
            drag: 0.0,
            magnus: None,
            schema: Schema::builder()
                .pair("position_x", "velocity_x")
                .pair("position_y", "velocity_y")
                .build()?,
        })
    }

    /// Sets the quadratic drag coefficient `c`.
    ///
    /// # Errors
    ///
    /// Returns an error if `drag` is negative or not finite.
    pub fn with_drag(mut self, drag: f64) -> Result<Self, ParameterError> {
        self.drag = non_negative("drag", drag)?;
        Ok(self)
    }

    /// Adds Magnus lift.
    ///
    /// # Errors
    ///
    /// Returns an error if the coefficient is negative or the spin is not
    /// finite.
    pub fn with_magnus(mut self, magnus: Magnus) -> Result<Self, ParameterError> {
        non_negative("magnus_coefficient", magnus.coefficient)?;
        finite("spin", magnus.spin)?;
        self.magnus = Some(magnus);
        Ok(self)
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Builds a state at the origin, launched at `speed` and `angle` degrees
    /// above the horizontal.
    ///
    /// # Errors
    ///
    /// Never fails for this law's schema.
    pub fn launch(&self, speed: f64, angle: f64) -> Result<StateVector, StateError> {
        let (sin, cos) = angle.to_radians().sin_cos();
        StateVector::new(
            Arc::clone(&self.schema),
            0.0,
            vec![0.0, speed * cos, 0.0, speed * sin],
        )
    }
}

impl DerivativeLaw for Projectile {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("projectile", &self.schema, state)?;
        let (vx, vy) = (state.value(1), state.value(3));
        let drag = self.drag * vx.hypot(vy) / self.mass;

        let mut ax = -drag * vx;
        let mut ay = -drag * vy - self.gravity;

        if let Some(Magnus { coefficient, spin }) = self.magnus {
            let lift = coefficient / self.mass;
            ax += lift * -spin * vy;
            ay += lift * spin * vx;
        }

        Ok(Rates::from([ax, ay]))
    }
}

impl InvariantTracker for Projectile {
    fn record(&self, state: &StateVector) -> Diagnostics {
        if !state.conforms_to(&self.schema) {
            return Diagnostics::new();
        }
        let (vx, y, vy) = (state.value(1), state.value(2), state.value(3));
        Diagnostics::energy(
            0.5 * self.mass * (vx * vx + vy * vy),
            self.mass * self.gravity * y,
        )
    }
}
