use std::sync::Arc;

use thiserror::Error;

use crate::Schema;

/// Errors that can occur when constructing a [`StateVector`] or [`Rates`].
///
/// [`Rates`]: crate::Rates
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("expected {expected} values, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("unknown component: {0}")]
    UnknownComponent(String),

    #[error("missing value for component: {0}")]
    MissingComponent(String),

    #[error("component given more than once: {0}")]
    DuplicateComponent(String),
}

/// An immutable snapshot of every component of a system at one time.
///
/// Stepping never mutates a state; it produces a new one with
/// [`StateVector::advance`]. States share their [`Schema`] through an `Arc`,
/// so cloning a state copies only its values.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    schema: Arc<Schema>,
    time: f64,
    values: Vec<f64>,
}

impl StateVector {
    /// Creates a state from values listed in schema order.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DimensionMismatch`] if the number of values does
    /// not match the schema.
    pub fn new(schema: Arc<Schema>, time: f64, values: Vec<f64>) -> Result<Self, StateError> {
        if values.len() != schema.len() {
            return Err(StateError::DimensionMismatch {
                expected: schema.len(),
                found: values.len(),
            });
        }
        Ok(Self {
            schema,
            time,
            values,
        })
    }

    /// Creates a state from `(name, value)` pairs in any order.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is not in the schema, appears twice, or a
    /// schema component has no value.
    pub fn from_named<'a>(
        schema: Arc<Schema>,
        time: f64,
        pairs: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, StateError> {
        let values = collect_named(schema.len(), |name| schema.index_of(name), pairs)?
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                value.ok_or_else(|| {
                    StateError::MissingComponent(schema.components()[i].name().to_owned())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            schema,
            time,
            values,
        })
    }

    /// Returns the schema shared by every state of a run.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the simulation time of this snapshot.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns whether this state is laid out by `schema`.
    ///
    /// States sharing the same `Arc` match without comparing components.
    #[must_use]
    pub fn conforms_to(&self, schema: &Schema) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.schema), schema) || *self.schema == *schema
    }

    /// Returns all values in schema order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Returns the value of the named component.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.schema.index_of(name).map(|i| self.values[i])
    }

    /// Returns the value at a schema index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Returns the first component whose value is NaN or infinite.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(&str, f64)> {
        self.values
            .iter()
            .zip(self.schema.components())
            .find(|(value, _)| !value.is_finite())
            .map(|(value, component)| (component.name(), *value))
    }

    /// Returns the state `dt` later, with values produced by `update`.
    ///
    /// `update` receives a copy of the current values to overwrite in place,
    /// so the new state always has the same schema and dimension.
    #[must_use]
    pub fn advance(&self, dt: f64, update: impl FnOnce(&mut [f64])) -> Self {
        let mut values = self.values.clone();
        update(&mut values);
        Self {
            schema: Arc::clone(&self.schema),
            time: self.time + dt,
            values,
        }
    }
}

/// Places `(name, value)` pairs into schema slots.
pub(crate) fn collect_named<'a>(
    len: usize,
    slot_of: impl Fn(&str) -> Option<usize>,
    pairs: impl IntoIterator<Item = (&'a str, f64)>,
) -> Result<Vec<Option<f64>>, StateError> {
    let mut values = vec![None; len];
    for (name, value) in pairs {
        let slot = slot_of(name).ok_or_else(|| StateError::UnknownComponent(name.to_owned()))?;
        if values[slot].replace(value).is_some() {
            return Err(StateError::DuplicateComponent(name.to_owned()));
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn oscillator() -> Arc<Schema> {
        Schema::builder().pair("position", "velocity").build().unwrap()
    }

    #[test]
    fn named_values_land_in_schema_order() {
        let state =
            StateVector::from_named(oscillator(), 0.5, [("velocity", -1.0), ("position", 2.0)])
                .unwrap();

        assert_eq!(state.values(), &[2.0, -1.0]);
        assert_eq!(state.get("velocity"), Some(-1.0));
        assert_eq!(state.get("height"), None);
        assert_relative_eq!(state.time(), 0.5);
    }

    #[test]
    fn named_construction_rejects_bad_keys() {
        let missing = StateVector::from_named(oscillator(), 0.0, [("position", 1.0)]);
        assert_eq!(
            missing,
            Err(StateError::MissingComponent("velocity".into()))
        );

        let unknown = StateVector::from_named(
            oscillator(),
            0.0,
            [("position", 1.0), ("velocity", 0.0), ("spin", 3.0)],
        );
        assert_eq!(unknown, Err(StateError::UnknownComponent("spin".into())));

        let twice = StateVector::from_named(
            oscillator(),
            0.0,
            [("position", 1.0), ("position", 2.0), ("velocity", 0.0)],
        );
        assert_eq!(twice, Err(StateError::DuplicateComponent("position".into())));
    }

    #[test]
    fn dimension_must_match_schema() {
        let err = StateVector::new(oscillator(), 0.0, vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            StateError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn advance_leaves_the_receiver_untouched() {
        let state = StateVector::new(oscillator(), 1.0, vec![1.0, 2.0]).unwrap();
        let next = state.advance(0.25, |values| values[0] += 10.0);

        assert_eq!(state.values(), &[1.0, 2.0]);
        assert_eq!(next.values(), &[11.0, 2.0]);
        assert_relative_eq!(next.time(), 1.25);
        assert!(Arc::ptr_eq(state.schema(), next.schema()));
    }

    #[test]
    fn finds_non_finite_components() {
        let state = StateVector::new(oscillator(), 0.0, vec![1.0, f64::NAN]).unwrap();
        let (name, value) = state.first_non_finite().unwrap();
        assert_eq!(name, "velocity");
        assert!(value.is_nan());

        let finite = StateVector::new(oscillator(), 0.0, vec![1.0, 2.0]).unwrap();
        assert!(finite.first_non_finite().is_none());
    }
}
