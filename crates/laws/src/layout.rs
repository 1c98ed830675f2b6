use strand_core::{DomainError, Schema, StateVector};

/// Rejects a state laid out for a different law.
pub(crate) fn conform(
    law: &'static str,
    schema: &Schema,
    state: &StateVector,
) -> Result<(), DomainError> {
    if state.conforms_to(schema) {
        Ok(())
    } else {
        Err(DomainError::new(law, "state does not match the law's schema"))
    }
}
