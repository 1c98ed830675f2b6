use strand_core::SchemaError;
use thiserror::Error;

/// Errors that can occur when constructing a law from physical constants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("{0} must be finite and positive")]
    NonPositive(&'static str),

    #[error("{0} must be finite and non-negative")]
    Negative(&'static str),

    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::NonPositive(name))
    }
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::Negative(name))
    }
}

pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NonFinite(name))
    }
}

pub(crate) fn finite_vector(
    name: &'static str,
    value: [f64; 3],
) -> Result<[f64; 3], ParameterError> {
    if value.iter().all(|v| v.is_finite()) {
        Ok(value)
    } else {
        Err(ParameterError::NonFinite(name))
    }
}
