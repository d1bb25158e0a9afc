//! lander-sim - run one catalog scenario from the command line

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lander_sim::scenario;
use lander_sim::sim::EventKind;
use lander_sim::{SimConfig, Simulation};

#[derive(Parser)]
#[command(name = "lander-sim")]
#[command(about = "Planetary lander descent simulator")]
#[command(version)]
struct Cli {
    /// Scenario index (see --list)
    #[arg(default_value_t = 1)]
    scenario: usize,

    /// Force the autopilot on regardless of the scenario default
    #[arg(short, long)]
    autopilot: bool,

    /// TOML file overriding planet, lander and gain constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many simulated seconds
    #[arg(long)]
    max_time: Option<f64>,

    /// Write time/altitude/speed samples to this CSV file
    #[arg(short, long)]
    telemetry: Option<PathBuf>,

    /// List scenarios and exit
    #[arg(short, long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if cli.list {
        for (i, description) in scenario::descriptions().enumerate() {
            println!("{i}: {description}");
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(max_time) = cli.max_time {
        config.max_time = max_time;
    }

    let mut sim = Simulation::new(config, cli.scenario)
        .with_context(|| format!("starting scenario {}", cli.scenario))?;
    if cli.autopilot {
        sim.set_autopilot(true);
    }

    let ticks = sim.run(usize::MAX)?;

    let outcome = sim.events().iter().rev().find_map(|e| match e.kind {
        EventKind::Touchdown { crashed, descent_rate, ground_speed } => {
            Some((crashed, descent_rate, ground_speed))
        }
        _ => None,
    });
    let state = sim.state();
    match outcome {
        Some((crashed, descent_rate, ground_speed)) => tracing::info!(
            ticks,
            time = state.time,
            crashed,
            descent_rate,
            ground_speed,
            fuel = state.fuel,
            "mission over"
        ),
        None => tracing::info!(
            ticks,
            time = state.time,
            altitude = state.altitude,
            speed = state.speed(),
            fuel = state.fuel,
            "time limit reached"
        ),
    }

    if let Some(path) = &cli.telemetry {
        sim.telemetry()
            .write_csv_file(path)
            .with_context(|| format!("writing telemetry {}", path.display()))?;
    }

    Ok(())
}
