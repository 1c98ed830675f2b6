//! Core traits and types for the Strand integration engine.
//!
//! This crate defines the shared abstractions that solvers, laws, and
//! observers build on:
//!
//! - [`Schema`]: the named, ordered components of a simulated system
//! - [`StateVector`]: an immutable snapshot of component values at a time
//! - [`DerivativeLaw`]: maps a state to the [`Rates`] of its rate components
//! - [`InvariantTracker`]: computes [`Diagnostics`] such as total energy
//! - [`Trajectory`]: the append-only record produced by a run

mod diagnostics;
mod law;
mod rates;
mod schema;
mod state;
mod trajectory;

pub use diagnostics::{
    ANGULAR_MOMENTUM, Diagnostics, InvariantTracker, KINETIC_ENERGY, POTENTIAL_ENERGY,
    TOTAL_ENERGY,
};
pub use law::{DerivativeLaw, DomainError};
pub use rates::Rates;
pub use schema::{Component, Role, Schema, SchemaBuilder, SchemaError};
pub use state::{StateError, StateVector};
pub use trajectory::{Sample, Trajectory};
