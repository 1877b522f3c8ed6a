//! Replay a recorded tick file through the estimator.
//!
//! Usage: `tickfilter-replay <ticks.json> [config.json]`
//!
//! The tick file is a JSON array of `{"time", "price", "volume"}` objects.
//! The report is printed to stdout as JSON.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tickfilter_core::{Config, Tick};
use tickfilter_replay::ReplaySimulator;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(ticks_path) = args.next().map(PathBuf::from) else {
        bail!("usage: tickfilter-replay <ticks.json> [config.json]");
    };

    let config = match args.next() {
        Some(path) => Config::from_path(&path).with_context(|| format!("loading config {path}"))?,
        None => Config::default(),
    };

    let raw = std::fs::read_to_string(&ticks_path)
        .with_context(|| format!("reading {}", ticks_path.display()))?;
    let ticks: Vec<Tick> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing ticks from {}", ticks_path.display()))?;

    let simulator = ReplaySimulator::new(&config)?;
    let report = simulator.run(&ticks)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
