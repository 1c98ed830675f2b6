//! Explicit integration and run orchestration for Strand.
//!
//! - [`step`] advances a state once under a [`SchemeKind`]
//! - [`run`] repeats steps under an [`EventMonitor`] and an optional
//!   [`InvariantTracker`](strand_core::InvariantTracker), producing a
//!   [`Solution`]
//! - [`refine`] halves the step until an observable converges
//! - [`compare_schemes`] solves one problem under both schemes
//! - [`Settings`] describes a run in TOML

pub mod monitor;

mod compare;
mod refine;
mod run;
mod scheme;
mod settings;

pub use compare::{Comparison, compare_schemes};
pub use monitor::{
    Check, Crossing, Direction, EventMonitor, SteadyStateMonitor, Stop, StopReason,
    ThresholdMonitor,
};
pub use refine::{Estimate, RefineConfig, RefineError, RefineStatus, Refined, refine};
pub use run::{
    Config, ConfigError, Failure, Solution, TerminationReason, run, run_unmonitored,
    run_with_settings,
};
pub use scheme::{SchemeKind, StepError, step};
pub use settings::{Settings, SettingsError};
