use crate::{
    Schema,
    state::{StateError, collect_named},
};

/// Instantaneous rates of change returned by a [`DerivativeLaw`].
///
/// Rates hold one value per *rate component* of the schema (every component
/// that is not a position), in schema order. Positions never appear here:
/// integrators advance them from their paired velocities.
///
/// [`DerivativeLaw`]: crate::DerivativeLaw
#[derive(Debug, Clone, PartialEq)]
pub struct Rates {
    values: Vec<f64>,
}

impl Rates {
    /// Creates rates listed in rate-component order.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Creates rates from `(name, rate)` pairs.
    ///
    /// The names must be exactly the schema's rate components.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is not a rate component (including position
    /// names), appears twice, or a rate component is left out.
    pub fn from_named<'a>(
        schema: &Schema,
        pairs: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, StateError> {
        let slots = collect_named(
            schema.rate_count(),
            |name| schema.index_of(name).and_then(|i| schema.rate_slot(i)),
            pairs,
        )?;

        let values = slots
            .into_iter()
            .zip(schema.rate_names())
            .map(|(value, name)| value.ok_or_else(|| StateError::MissingComponent(name.to_owned())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { values })
    }

    /// Returns the rates in rate-component order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of rates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether there are no rates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f64>> for Rates {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[f64; N]> for Rates {
    fn from(values: [f64; N]) -> Self {
        Self::new(values.to_vec())
    }
}
