//! Reference derivative laws for the Strand integration engine.
//!
//! Each law captures its physical constants at construction, owns the schema
//! of the states it applies to, and offers a helper for building initial
//! states. Laws with a meaningful energy also implement
//! [`InvariantTracker`](strand_core::InvariantTracker).
//!
//! # Mechanics
//!
//! - [`Spring`]: damped harmonic oscillator
//! - [`Pendulum`]: simple pendulum at large amplitude
//! - [`CoupledOscillators`]: two masses joined by three springs
//! - [`AnchoredSprings`]: a mass tethered to fixed anchors in the plane
//! - [`FreeFall`]: vertical fall with optional quadratic drag
//! - [`Projectile`]: planar flight with drag and Magnus lift
//! - [`CentralGravity`]: a planet around a fixed star
//! - [`Lorentz`]: a charged particle in uniform fields
//!
//! # Transport and circuits
//!
//! - [`Decay`]: exponential decay (radioactivity, absorption, discharge)
//! - [`Relaxation`]: relaxation toward a target (Newton cooling, charging)
//! - [`SeriesRlc`]: driven series RLC circuit
//! - [`Solidification`]: cooling through a phase change

mod anchored;
mod circuit;
mod coupled;
mod decay;
mod free_fall;
mod gravity;
mod layout;
mod lorentz;
mod oscillator;
mod parameter;
mod pendulum;
mod phase_change;
mod projectile;
mod relaxation;

pub use anchored::AnchoredSprings;
pub use circuit::{Drive, SeriesRlc};
pub use coupled::CoupledOscillators;
pub use decay::Decay;
pub use free_fall::FreeFall;
pub use gravity::{CentralGravity, OrbitKind};
pub use lorentz::Lorentz;
pub use oscillator::Spring;
pub use parameter::ParameterError;
pub use pendulum::Pendulum;
pub use phase_change::{Material, Phase, Solidification};
pub use projectile::{Magnus, Projectile};
pub use relaxation::Relaxation;
