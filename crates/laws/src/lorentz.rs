use std::sync::Arc;

use strand_core::{
    DerivativeLaw, Diagnostics, DomainError, InvariantTracker, Rates, Schema, StateError,
    StateVector,
};

use crate::{
    layout::conform,
    parameter::{ParameterError, finite, finite_vector, positive},
};

const PROTON_CHARGE: f64 = 1.6e-19;
const PROTON_MASS: f64 = 1.67e-27;

/// A charged particle in uniform electric and magnetic fields.
///
/// Components: `position_{x,y,z}` each paired with `velocity_{x,y,z}`.
///
/// ```text
/// a = (q/m)·(E + v × B)
/// ```
///
/// The magnetic force does no work, so the kinetic plus electric potential
/// energy `-q·E·r` is conserved.
#[derive(Debug, Clone)]
pub struct Lorentz {
    charge: f64,
    mass: f64,
    electric: [f64; 3],
    magnetic: [f64; 3],
    schema: Arc<Schema>,
}

impl Lorentz {
    /// # Errors
    ///
    /// Returns an error if `mass` is not finite and positive, or if the
    /// charge or a field is not finite.
    pub fn new(
        charge: f64,
        mass: f64,
        electric: [f64; 3],
        magnetic: [f64; 3],
    ) -> Result<Self, ParameterError> {
        Ok(Self {
            charge: finite("charge", charge)?,
            mass: positive("mass", mass)?,
            electric: finite_vector("electric", electric)?,
            magnetic: finite_vector("magnetic", magnetic)?,
            schema: Schema::builder()
                .pair("position_x", "velocity_x")
                .pair("position_y", "velocity_y")
                .pair("position_z", "velocity_z")
                .build()?,
        })
    }

    /// A proton in the given fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is not finite.
    pub fn proton(electric: [f64; 3], magnetic: [f64; 3]) -> Result<Self, ParameterError> {
        Self::new(PROTON_CHARGE, PROTON_MASS, electric, magnetic)
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Cyclotron angular frequency `|q|·|B|/m`.
    #[must_use]
    pub fn cyclotron_frequency(&self) -> f64 {
        let [bx, by, bz] = self.magnetic;
        self.charge.abs() * (bx * bx + by * by + bz * bz).sqrt() / self.mass
    }

    /// Builds a state at the origin moving with `velocity`.
    ///
    /// # Errors
    ///
    /// Never fails for this law's schema.
    pub fn launched(&self, velocity: [f64; 3]) -> Result<StateVector, StateError> {
        let [vx, vy, vz] = velocity;
        StateVector::new(
            Arc::clone(&self.schema),
            0.0,
            vec![0.0, vx, 0.0, vy, 0.0, vz],
        )
    }

    fn split(state: &StateVector) -> ([f64; 3], [f64; 3]) {
        let v = state.values();
        ([v[0], v[2], v[4]], [v[1], v[3], v[5]])
    }
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

impl DerivativeLaw for Lorentz {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("Lorentz", &self.schema, state)?;
        let (_, velocity) = Self::split(state);
        let magnetic = cross(velocity, self.magnetic);
        let scale = self.charge / self.mass;
        Ok(Rates::from(
            [0, 1, 2].map(|i| scale * (self.electric[i] + magnetic[i])),
        ))
    }
}

impl InvariantTracker for Lorentz {
    fn record(&self, state: &StateVector) -> Diagnostics {
        if !state.conforms_to(&self.schema) {
            return Diagnostics::new();
        }
        let (position, velocity) = Self::split(state);
        let speed_squared: f64 = velocity.iter().map(|v| v * v).sum();
        let work: f64 = (0..3).map(|i| self.electric[i] * position[i]).sum();
        Diagnostics::energy(0.5 * self.mass * speed_squared, -self.charge * work)
    }
}
