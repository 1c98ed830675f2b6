use std::sync::Arc;

use strand_core::{
    DerivativeLaw, Diagnostics, DomainError, InvariantTracker, Rates, Schema, StateError,
    StateVector,
};

use crate::{
    layout::conform,
    parameter::{ParameterError, finite, positive},
};

/// A mass in the plane tethered to fixed anchors by identical springs.
///
/// Components: `position_x`, `velocity_x`, `position_y`, `velocity_y`.
///
/// Each spring pulls along the line to its anchor with force
/// `-k·(d - L₀)·d̂`. When the mass sits exactly on an anchor the direction
/// `d̂` is undefined; that spring then contributes **zero force**, and the
/// law stays defined everywhere.
#[derive(Debug, Clone)]
pub struct AnchoredSprings {
    mass: f64,
    stiffness: f64,
    natural_length: f64,
    anchors: Vec<[f64; 2]>,
    schema: Arc<Schema>,
}

impl AnchoredSprings {
    /// # Errors
    ///
    /// Returns an error if a constant is out of range or an anchor is not
    /// finite.
    pub fn new(
        mass: f64,
        stiffness: f64,
        natural_length: f64,
        anchors: Vec<[f64; 2]>,
    ) -> Result<Self, ParameterError> {
        for [x, y] in &anchors {
            finite("anchor", *x)?;
            finite("anchor", *y)?;
        }
        Ok(Self {
            mass: positive("mass", mass)?,
            stiffness: positive("stiffness", stiffness)?,
            natural_length: positive("natural_length", natural_length)?,
            anchors,
            schema: Schema::builder()
                .pair("position_x", "velocity_x")
                .pair("position_y", "velocity_y")
                .build()?,
        })
    }

    /// Four anchors one natural length above, below, right, and left of the
    /// origin.
    ///
    /// # Errors
    ///
    /// Returns an error if a constant is out of range.
    pub fn square(mass: f64, stiffness: f64, natural_length: f64) -> Result<Self, ParameterError> {
        let l = natural_length;
        Self::new(
            mass,
            stiffness,
            natural_length,
            vec![[0.0, l], [0.0, -l], [l, 0.0], [-l, 0.0]],
        )
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
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

    fn offsets(&self, state: &StateVector) -> impl Iterator<Item = (f64, f64, f64)> {
        let (x, y) = (state.value(0), state.value(2));
        self.anchors.iter().map(move |[ax, ay]| {
            let (dx, dy) = (x - ax, y - ay);
            (dx, dy, dx.hypot(dy))
        })
    }
}

impl DerivativeLaw for AnchoredSprings {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("anchored springs", &self.schema, state)?;
        let (mut fx, mut fy) = (0.0, 0.0);
        for (dx, dy, distance) in self.offsets(state) {
            if distance == 0.0 {
                continue;
            }
            let pull = -self.stiffness * (distance - self.natural_length) / distance;
            fx += pull * dx;
            fy += pull * dy;
        }
        Ok(Rates::from([fx / self.mass, fy / self.mass]))
    }
}

impl InvariantTracker for AnchoredSprings {
    fn record(&self, state: &StateVector) -> Diagnostics {
        if !state.conforms_to(&self.schema) {
            return Diagnostics::new();
        }
        let (vx, vy) = (state.value(1), state.value(3));
        let kinetic = 0.5 * self.mass * (vx * vx + vy * vy);
        let potential = self
            .offsets(state)
            .map(|(_, _, distance)| {
                let stretch = distance - self.natural_length;
                0.5 * self.stiffness * stretch * stretch
            })
            .sum();
        Diagnostics::energy(kinetic, potential)
    }
}
