use std::error::Error;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use conquest_app::cli::CliArgs;
use conquest_app::runner;
use conquest_core::config::GameConfig;
use conquest_sim::engine::{SimConfig, SimulationEngine};
use conquest_sim::scenario::Scenario;

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let rules = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::skirmish(args.difficulty.into()),
    };

    let config = SimConfig {
        seed: args.seed,
        time_scale: args.time_scale,
        rules,
    };
    let engine = SimulationEngine::from_scenario(config, &scenario)?;
    info!(
        seed = args.seed,
        planets = scenario.planets.len(),
        operators = scenario.operators.len(),
        realtime = args.realtime,
        "starting run"
    );

    let opening = args.opening_commands();
    let snapshot = if args.realtime {
        runner::run_realtime(engine, opening, args.ticks)?
    } else {
        runner::run_headless(engine, opening, args.ticks)
    };

    runner::report(&snapshot);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}
