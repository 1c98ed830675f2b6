use thiserror::Error;

use crate::{Rates, StateVector};

/// A law evaluated at a state where it is undefined.
///
/// For example, an inverse-square force at zero separation. Laws return this
/// instead of a finite-but-wrong rate; runs that hit it stop and report it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{law} is undefined here: {reason}")]
pub struct DomainError {
    law: &'static str,
    reason: String,
}

impl DomainError {
    /// Creates a domain error for the named law.
    pub fn new(law: &'static str, reason: impl Into<String>) -> Self {
        Self {
            law,
            reason: reason.into(),
        }
    }

    /// Returns the name of the law that failed.
    #[must_use]
    pub fn law(&self) -> &'static str {
        self.law
    }

    /// Returns why the law is undefined at the state.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// The right-hand side of a first-order system.
///
/// A derivative law captures its physical constants at construction and maps
/// a state and time to the rates of the state's rate components (see
/// [`Rates`]). Laws must be pure: the same state and time always produce the
/// same rates, so one law can be stepped under any scheme for comparison.
pub trait DerivativeLaw {
    /// Computes the rates at `state` and `time`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the law is undefined at this state.
    fn rates(&self, state: &StateVector, time: f64) -> Result<Rates, DomainError>;
}

/// Blanket implementation for law closures.
impl<F> DerivativeLaw for F
where
    F: Fn(&StateVector, f64) -> Result<Rates, DomainError>,
{
    fn rates(&self, state: &StateVector, time: f64) -> Result<Rates, DomainError> {
        self(state, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Schema;

    #[test]
    fn closures_are_laws() {
        let schema = Schema::builder().free("amount").build().unwrap();
        let state = StateVector::new(schema, 0.0, vec![4.0]).unwrap();

        let halve = |state: &StateVector, _time: f64| -> Result<Rates, DomainError> {
            Ok(Rates::from([-0.5 * state.value(0)]))
        };

        assert_eq!(halve.rates(&state, 0.0).unwrap().values(), &[-2.0]);
    }

    #[test]
    fn domain_error_names_the_law() {
        let err = DomainError::new("gravity", "zero separation");
        assert_eq!(err.law(), "gravity");
        assert_eq!(err.to_string(), "gravity is undefined here: zero separation");
    }
}
