//! Energy drift of a spring and a pendulum under both schemes.
//!
//! Prints `time`, Euler energy, and Euler-Cromer energy as whitespace
//! separated columns, ready to pipe into a plotting tool.
//!
//! # Usage
//!
//! ```text
//! cargo run --example energy -- spring
//! cargo run --example energy -- pendulum 0.05
//! ```

use std::error::Error;

use strand_core::{DerivativeLaw, InvariantTracker, StateVector, TOTAL_ENERGY};
use strand_laws::{Pendulum, Spring};
use strand_observers::{Series, Summary};
use strand_solvers::{Config, compare_schemes};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "spring".into());
    let dt = match std::env::args().nth(2) {
        Some(arg) => arg.parse::<f64>()?,
        None => 0.01,
    };
    let config = Config::new(dt, 2000)?;

    match mode.as_str() {
        "spring" => {
            let spring = Spring::new(1.0, 1.0)?;
            report(&spring, &spring.state(1.0, 0.0)?, config)
        }
        "pendulum" => {
            let pendulum = Pendulum::new(9.81, 1.0)?;
            report(&pendulum, &pendulum.released_at(60.0)?, config)
        }
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: energy [spring|pendulum] [dt]");
            std::process::exit(1);
        }
    }
}

fn report<L>(law: &L, initial: &StateVector, config: Config) -> Result<(), Box<dyn Error>>
where
    L: DerivativeLaw + InvariantTracker,
{
    let comparison = compare_schemes(law, initial, config, (), law)?;

    let euler = Series::over_time(&comparison.euler.trajectory, TOTAL_ENERGY)?;
    let cromer = Series::over_time(&comparison.euler_cromer.trajectory, TOTAL_ENERGY)?;

    println!("time euler euler-cromer");
    for ((t, e), (_, c)) in euler.points().zip(cromer.points()) {
        println!("{t:.4} {e:.6} {c:.6}");
    }

    for (scheme, solution) in comparison.iter() {
        let summary = Summary::of(solution);
        eprintln!(
            "{scheme}: max drift {:.3e}, monotonic growth {}",
            summary.max_energy_drift()?,
            summary.grows_monotonically(TOTAL_ENERGY)?
        );
    }
    Ok(())
}
