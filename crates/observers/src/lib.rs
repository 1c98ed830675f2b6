//! Consumers of Strand trajectories.
//!
//! Nothing here influences a run. Each type reads a finished
//! [`Trajectory`](strand_core::Trajectory) and presents it:
//!
//! - [`Table`]: an aligned text table, optionally decimated
//! - [`Series`]: `(x, y)` arrays to hand to an external plotter
//! - [`Summary`]: headline metrics such as peak, elapsed time, and energy drift
//!
//! Columns and axes are named the same way everywhere: `time`, any schema
//! component, or any diagnostic the run recorded.

mod axis;
mod metrics;
mod series;
mod table;

pub use axis::{TIME, UnknownColumn};
pub use metrics::{Peak, Summary};
pub use series::Series;
pub use table::Table;
