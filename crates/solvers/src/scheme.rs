//! Explicit single-step schemes.
//!
//! Both schemes evaluate the law once, at the start of the step, and advance
//! every rate component the same way:
//!
//! ```text
//! c_{n+1} = c_n + rate_n * dt
//! ```
//!
//! They differ only in how positions follow their paired velocities:
//!
//! ```text
//! Euler:        x_{n+1} = x_n + v_n * dt
//! Euler-Cromer: x_{n+1} = x_n + v_{n+1} * dt
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use strand_core::{DerivativeLaw, DomainError, Role, StateVector};
use thiserror::Error;

/// Which explicit scheme advances positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemeKind {
    /// Forward Euler.
    #[default]
    Euler,

    /// Semi-implicit Euler, which keeps oscillator energy bounded.
    EulerCromer,
}

impl SchemeKind {
    /// Both schemes, in comparison order.
    pub const ALL: [SchemeKind; 2] = [SchemeKind::Euler, SchemeKind::EulerCromer];

    /// Returns the name used in settings files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SchemeKind::Euler => "euler",
            SchemeKind::EulerCromer => "euler-cromer",
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while taking a single step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("law returned {found} rates, schema expects {expected}")]
    RateMismatch { expected: usize, found: usize },
}

/// Advances `state` by one step of size `dt`.
///
/// The returned state has the same schema and its time is `state.time() + dt`.
///
/// # Errors
///
/// Returns [`StepError::Domain`] if the law is undefined at `state`, or
/// [`StepError::RateMismatch`] if it returns the wrong number of rates.
pub fn step<L>(
    state: &StateVector,
    dt: f64,
    law: &L,
    scheme: SchemeKind,
) -> Result<StateVector, StepError>
where
    L: DerivativeLaw + ?Sized,
{
    let rates = law.rates(state, state.time())?;
    let schema = state.schema();
    if rates.len() != schema.rate_count() {
        return Err(StepError::RateMismatch {
            expected: schema.rate_count(),
            found: rates.len(),
        });
    }

    let old = state.values();
    let rates = rates.values();

    Ok(state.advance(dt, |values| {
        // Rate components first, so Euler-Cromer can read the new velocities.
        for (i, value) in values.iter_mut().enumerate() {
            if let Some(slot) = schema.rate_slot(i) {
                *value = old[i] + rates[slot] * dt;
            }
        }

        for (i, component) in schema.components().iter().enumerate() {
            if let Role::Position { velocity } = component.role() {
                let v = match scheme {
                    SchemeKind::Euler => old[velocity],
                    SchemeKind::EulerCromer => values[velocity],
                };
                values[i] = old[i] + v * dt;
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use strand_core::{Rates, Schema};
    use strand_laws::{Relaxation, Spring};

    fn fall(_state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        Ok(Rates::from([-10.0]))
    }

    fn falling_body(height: f64, velocity: f64) -> StateVector {
        let schema = Schema::builder().pair("height", "velocity").build().unwrap();
        StateVector::new(schema, 0.0, vec![height, velocity]).unwrap()
    }

    #[test]
    fn euler_moves_with_the_old_velocity() {
        let next = step(&falling_body(100.0, 2.0), 0.5, &fall, SchemeKind::Euler).unwrap();

        assert_relative_eq!(next.value(0), 101.0);
        assert_relative_eq!(next.value(1), -3.0);
        assert_relative_eq!(next.time(), 0.5);
    }

    #[test]
    fn euler_cromer_moves_with_the_new_velocity() {
        let next = step(&falling_body(100.0, 2.0), 0.5, &fall, SchemeKind::EulerCromer).unwrap();

        assert_relative_eq!(next.value(0), 98.5);
        assert_relative_eq!(next.value(1), -3.0);
    }

    #[test]
    fn free_components_are_identical_under_both_schemes() {
        let law = Relaxation::newton_cooling(0.1, 25.0).unwrap();
        let state = law.state(100.0).unwrap();

        let euler = step(&state, 0.5, &law, SchemeKind::Euler).unwrap();
        let cromer = step(&state, 0.5, &law, SchemeKind::EulerCromer).unwrap();

        assert_eq!(euler, cromer);
        assert_relative_eq!(euler.value(0), 100.0 - 0.5 * 7.5, epsilon = 1e-12);
    }

    #[test]
    fn input_state_is_left_untouched() {
        let state = falling_body(1.0, 0.0);
        let before = state.clone();

        let _ = step(&state, 0.1, &fall, SchemeKind::EulerCromer).unwrap();

        assert_eq!(state, before);
    }

    #[test]
    fn wrong_rate_count_is_rejected() {
        let too_many =
            |_: &StateVector, _: f64| -> Result<Rates, DomainError> { Ok(Rates::from([1.0, 2.0])) };

        let err = step(&falling_body(0.0, 0.0), 0.1, &too_many, SchemeKind::Euler).unwrap_err();

        assert_eq!(
            err,
            StepError::RateMismatch {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn domain_errors_pass_through() {
        let undefined = |_: &StateVector, _: f64| -> Result<Rates, DomainError> {
            Err(DomainError::new("test", "always"))
        };

        let err = step(&falling_body(0.0, 0.0), 0.1, &undefined, SchemeKind::Euler).unwrap_err();

        assert!(matches!(err, StepError::Domain(e) if e.reason() == "always"));
    }

    #[test]
    fn scheme_names_parse_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            scheme: SchemeKind,
        }

        let parsed: Wrapper = toml::from_str(r#"scheme = "euler-cromer""#).unwrap();
        assert_eq!(parsed.scheme, SchemeKind::EulerCromer);
        assert_eq!(SchemeKind::Euler.to_string(), "euler");
    }

    proptest! {
        #[test]
        fn schemes_share_velocities_and_differ_only_in_positions(
            position in -10.0..10.0_f64,
            velocity in -10.0..10.0_f64,
            mass in 0.1..10.0_f64,
            stiffness in 0.1..10.0_f64,
            dt in 1e-4..0.5_f64,
        ) {
            let spring = Spring::new(mass, stiffness).unwrap();
            let state = spring.state(position, velocity).unwrap();

            let euler = step(&state, dt, &spring, SchemeKind::Euler).unwrap();
            let cromer = step(&state, dt, &spring, SchemeKind::EulerCromer).unwrap();

            prop_assert_eq!(euler.value(1), cromer.value(1));
            prop_assert_eq!(euler.value(0), position + velocity * dt);
            prop_assert_eq!(cromer.value(0), position + cromer.value(1) * dt);
            prop_assert!(Arc::ptr_eq(euler.schema(), state.schema()));
        }
    }
}
