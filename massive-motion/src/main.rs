//! Headless massive-motion demo.
//!
//! Seeds a star and a population of comets into one positional list
//! (the variant is picked from configuration), then runs a fixed number
//! of ticks, spawning, moving, and culling bodies through the list
//! contract alone. Rendering is somebody else's job; this binary logs.

mod body;
mod config;
mod sim;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::sim::Simulation;

#[derive(Debug, Parser)]
#[command(name = "massive-motion")]
#[command(about = "Headless celestial-body simulation over swappable list layouts")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "massive-motion.toml")]
    config: PathBuf,

    /// Simulation ticks to run before exiting.
    #[arg(short, long, default_value_t = 300)]
    ticks: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    info!(
        list = %config.list,
        width = config.window_size_x,
        height = config.window_size_y,
        delay_ms = config.timer_delay_ms,
        "configuration loaded"
    );

    let delay = Duration::from_millis(config.timer_delay_ms);
    let mut sim = Simulation::new(config);

    for tick in 0..args.ticks {
        sim.tick();
        debug!(tick, bodies = sim.body_count(), "tick complete");
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    info!(bodies = sim.body_count(), ticks = args.ticks, "simulation finished");
}
