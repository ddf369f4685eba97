//! # Seedbed
//!
//! Headless host for the Seedbed garden simulation.
//!
//! Drives a [`SharedSimulation`] with a fixed-timestep loop and a scripted
//! farmer, logs simulation events, and prints the final snapshot as JSON.
//!
//! Usage: `seedbed [config.toml] [simulated-seconds]`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod farmer;
mod timing;

use anyhow::{Context, Result};
use seedbed_sim::prelude::*;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::farmer::AutoFarmer;
use crate::timing::FixedStep;

/// Default config file.
const DEFAULT_CONFIG_PATH: &str = "seedbed.toml";
/// Default simulated run length (two in-game days).
const DEFAULT_RUN_SECONDS: f32 = 600.0;
/// Seed used when the config does not set one.
const DEMO_SEED: u64 = 42;
/// Synthetic frame length fed to the fixed-step loop.
const FRAME_DT: f32 = 1.0 / 30.0;
/// Frames between farmer rounds.
const FRAMES_PER_ROUND: u32 = 60;

/// Main entry point.
fn main() -> Result<()> {
    init_tracing()?;

    info!("Seedbed starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut args = env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let run_seconds = match args.next() {
        Some(text) => text
            .parse::<f32>()
            .with_context(|| format!("invalid run length {text:?}"))?,
        None => DEFAULT_RUN_SECONDS,
    };

    let mut config = SimulationConfig::load_or_default(&config_path);
    config.seed.get_or_insert(DEMO_SEED);

    let shared = SharedSimulation::new(Simulation::new(config));
    run(&shared, run_seconds);

    let snapshot = shared.snapshot();
    println!(
        "{}",
        snapshot
            .to_json_pretty()
            .context("failed to serialize snapshot")?
    );

    info!("Seedbed shutdown complete");
    Ok(())
}

/// Install the log subscriber; `SEEDBED_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() -> Result<()> {
    let json = env::var("SEEDBED_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let (json_layer, text_layer) = if json {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (None, Some(fmt::layer().with_writer(std::io::stderr)))
    };

    tracing_subscriber::registry()
        .with(json_layer)
        .with(text_layer)
        .with(EnvFilter::from_default_env().add_directive("seedbed=info".parse()?))
        .init();
    Ok(())
}

/// Run the fixed-step loop for `run_seconds` of simulated time.
fn run(shared: &SharedSimulation, run_seconds: f32) {
    let farmer = AutoFarmer::default();
    let mut step = FixedStep::default();
    let fixed_dt = step.fixed_dt();
    let frames = (run_seconds.max(0.0) / FRAME_DT).ceil() as u64;

    for frame in 0..frames {
        let steps = step.accumulate(FRAME_DT);
        shared.with(|sim| {
            for _ in 0..steps {
                sim.tick(fixed_dt);
            }

            if frame % u64::from(FRAMES_PER_ROUND) == 0 {
                let report = farmer.play_round(sim);
                debug!(
                    "Round at {:.1}s (step alpha {:.2}): {report:?}",
                    sim.elapsed(),
                    step.alpha()
                );
            }

            for event in sim.drain_events() {
                log_event(&event);
            }
        });
    }

    let sim = shared.lock();
    let stats = sim.stats();
    info!(
        "Finished day {}: {} plants harvested for {} money ({} mutated), balance {}",
        sim.day(),
        stats.plants_harvested,
        stats.harvest_earnings,
        stats.mutated_harvested,
        sim.economy().money()
    );
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::StageAdvanced { .. } | SimEvent::PlantHarvested { .. } => {
            debug!("{event:?}");
        },
        SimEvent::PlantMutated { pos, mutation } => {
            info!("Plant at {pos} mutated: {}", mutation.name());
        },
        _ => info!("{event:?}"),
    }
}
