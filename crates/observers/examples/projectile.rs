//! A baseball's flight under both schemes.
//!
//! Launches a ball with drag and backspin and runs until it lands. With no
//! argument the run uses built-in settings; pass a TOML settings file to
//! override the scheme, step, and event.
//!
//! # Usage
//!
//! ```text
//! cargo run --example projectile
//! cargo run --example projectile -- flight.toml
//! RUST_LOG=strand_solvers=debug cargo run --example projectile
//! ```

use std::error::Error;

use strand_core::TOTAL_ENERGY;
use strand_laws::{Magnus, Projectile};
use strand_observers::{Summary, Table};
use strand_solvers::{Direction, SchemeKind, Settings, run_with_settings};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let ball = Projectile::new(0.145, 9.81)?
        .with_drag(0.0013)?
        .with_magnus(Magnus {
            coefficient: 0.0005,
            spin: 200.0,
        })?;
    let initial = ball.launch(45.0, 35.0)?;

    let schemes = match std::env::args().nth(1) {
        Some(path) => vec![Settings::load(path)?],
        None => SchemeKind::ALL
            .into_iter()
            .map(|scheme| {
                Settings::new(scheme, 0.01, 10_000)
                    .with_event("position_y", 0.0, Direction::Below)
            })
            .collect(),
    };

    for settings in &schemes {
        let solution = run_with_settings(&ball, initial.clone(), settings, &ball)?;
        let summary = Summary::of(&solution);

        println!("# {} ({:?})", settings.scheme, solution.reason);
        println!(
            "{}",
            Table::with_columns(
                &solution.trajectory,
                &["time", "position_x", "position_y", TOTAL_ENERGY]
            )?
            .every(50)
            .precision(3)
        );
        println!("range:       {:.2} m", summary.change("position_x")?);
        println!("apex:        {:.2} m", summary.peak("position_y")?.value);
        println!("flight time: {:.2} s", summary.elapsed());
        println!("energy lost: {:.2} J", -summary.energy_change()?);
        println!();
    }

    Ok(())
}
