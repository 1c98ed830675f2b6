//! An Earth-like orbit around the Sun, in AU and years.
//!
//! Starts on a circular orbit and integrates for the given number of years
//! (default 5). Euler spirals outward while Euler-Cromer closes the orbit and
//! holds angular momentum.
//!
//! # Usage
//!
//! ```text
//! cargo run --example orbit
//! cargo run --example orbit -- 20
//! ```

use std::error::Error;

use strand_core::{ANGULAR_MOMENTUM, TOTAL_ENERGY};
use strand_laws::{CentralGravity, OrbitKind};
use strand_observers::{Series, Summary};
use strand_solvers::{Config, compare_schemes};
use tracing_subscriber::EnvFilter;

const STEPS_PER_YEAR: usize = 1000;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let years = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u32>()?,
        None => 5,
    };

    let sun = CentralGravity::solar()?;
    let initial = sun.state([1.0, 0.0], [0.0, sun.circular_speed(1.0)])?;
    let config = Config::spanning(f64::from(years), usize::try_from(years)? * STEPS_PER_YEAR)?;

    let comparison = compare_schemes(&sun, &initial, config, (), &sun)?;

    for (scheme, solution) in comparison.iter() {
        let summary = Summary::of(solution);
        let energy = summary.final_value(TOTAL_ENERGY)?;
        let path = Series::new(&solution.trajectory, "position_x", "position_y")?;
        let radius = path
            .points()
            .last()
            .map_or(f64::NAN, |(x, y)| x.hypot(y));

        println!("# {scheme}");
        println!("final radius:           {radius:.4} AU");
        println!("energy drift:           {:.2e}", summary.max_energy_drift()?);
        println!(
            "angular momentum change: {:.2e}",
            summary.change(ANGULAR_MOMENTUM)?
        );
        println!(
            "orbit:                  {:?}",
            OrbitKind::classify(energy, 1e-9)
        );
        println!();
    }

    Ok(())
}
