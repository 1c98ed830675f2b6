use std::sync::Arc;

use strand_core::{DerivativeLaw, DomainError, Rates, Schema, StateError, StateVector};

use crate::{
    layout::conform,
    parameter::{ParameterError, finite, positive},
};

/// Thermal properties of a substance that freezes at a single temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Specific heat of the liquid, J/(kg·K).
    pub liquid_heat_capacity: f64,
    /// Specific heat of the solid, J/(kg·K).
    pub solid_heat_capacity: f64,
    /// Latent heat of fusion, J/kg.
    pub latent_heat: f64,
    pub melting_point: f64,
}

impl Material {
    /// Paraffin wax.
    #[must_use]
    pub fn paraffin() -> Self {
        Self {
            liquid_heat_capacity: 2100.0,
            solid_heat_capacity: 1800.0,
            latent_heat: 200_000.0,
            melting_point: 70.0,
        }
    }
}

/// Which branch of [`Solidification`] applies to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Liquid,
    Solidifying,
    Solid,
}

/// Newton cooling of a melt through its freezing point.
///
/// Components: `temperature` and `latent_heat_removed`, both free.
///
/// Above the melting point the liquid cools sensibly. Once it reaches the
/// melting point the temperature holds while heat `h·A·(T - T_a)` drains the
/// latent heat `m·L`. After that the solid cools with its own heat capacity.
///
/// The plateau sits at the first temperature a step lands on at or below the
/// melting point, so a coarse step freezes slightly below it.
#[derive(Debug, Clone)]
pub struct Solidification {
    mass: f64,
    material: Material,
    conductance: f64,
    ambient: f64,
    schema: Arc<Schema>,
}

impl Solidification {
    /// Creates the law for `mass` of `material` losing heat through
    /// `conductance` (`h·A`, W/K) to surroundings at `ambient`.
    ///
    /// # Errors
    ///
    /// Returns an error if a constant is out of range.
    pub fn new(
        mass: f64,
        material: Material,
        conductance: f64,
        ambient: f64,
    ) -> Result<Self, ParameterError> {
        positive("liquid_heat_capacity", material.liquid_heat_capacity)?;
        positive("solid_heat_capacity", material.solid_heat_capacity)?;
        positive("latent_heat", material.latent_heat)?;
        finite("melting_point", material.melting_point)?;
        Ok(Self {
            mass: positive("mass", mass)?,
            material,
            conductance: positive("conductance", conductance)?,
            ambient: finite("ambient", ambient)?,
            schema: Schema::builder()
                .free("temperature")
                .free("latent_heat_removed")
                .build()?,
        })
    }

    /// Half a kilogram of paraffin in a room at 25 °C.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` mirrors [`Solidification::new`].
    pub fn wax() -> Result<Self, ParameterError> {
        Self::new(0.5, Material::paraffin(), 1.7 * 0.1, 25.0)
    }

    /// Returns the schema of the states this law applies to.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Total heat that must leave the melt to freeze it.
    #[must_use]
    pub fn latent_capacity(&self) -> f64 {
        self.mass * self.material.latent_heat
    }

    /// Returns the phase implied by a state's temperature and removed latent heat.
    #[must_use]
    pub fn phase(&self, state: &StateVector) -> Phase {
        let [temperature, removed] = [state.value(0), state.value(1)];
        if temperature > self.material.melting_point {
            Phase::Liquid
        } else if removed < self.latent_capacity() {
            Phase::Solidifying
        } else {
            Phase::Solid
        }
    }

    /// Builds a fully molten state at time zero.
    ///
    /// # Errors
    ///
    /// Never fails for this law's schema.
    pub fn molten_at(&self, temperature: f64) -> Result<StateVector, StateError> {
        StateVector::new(Arc::clone(&self.schema), 0.0, vec![temperature, 0.0])
    }
}

impl DerivativeLaw for Solidification {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        conform("solidification", &self.schema, state)?;
        let heat_loss = self.conductance * (state.value(0) - self.ambient);
        let sensible = |heat_capacity: f64| -heat_loss / (self.mass * heat_capacity);

        Ok(Rates::from(match self.phase(state) {
            Phase::Liquid => [sensible(self.material.liquid_heat_capacity), 0.0],
            Phase::Solidifying => [0.0, heat_loss],
            Phase::Solid => [sensible(self.material.solid_heat_capacity), 0.0],
        }))
    }
}
