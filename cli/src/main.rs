//! CSMA/CD contention simulator CLI
//!
//! # Example
//!
//! ```bash
//! # Single run from a parameter file, statistics written to output.txt
//! csma run input.txt --seed 42
//!
//! # Station-count study over the default grid, CSVs under out/
//! csma sweep --out-dir out
//! ```

mod report;
mod units;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use csma_core::{SimConfig, Simulation, SweepConfig, SweepRunner};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;
use units::to_si;

#[derive(Parser, Debug)]
#[command(name = "csma")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one configuration read from a parameter file
    Run(RunArgs),
    /// Sweep the station count across initial-window and packet-length series
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Parameter file (`N`, `L`, `R`, `M`, `T` lines, or JSON with a .json extension)
    input: PathBuf,

    /// Statistics file
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Also write the full run statistics as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Packet length for the default and initial-window series
    #[arg(short = 'l', long, default_value = "20")]
    packet_len: u64,

    /// Initial backoff window for the default and packet-length series
    #[arg(short = 'r', long, default_value = "8")]
    initial_window: u32,

    /// Failed attempts before a packet is dropped
    #[arg(short = 'm', long, default_value = "6")]
    max_retry: u32,

    /// Ticks per run
    #[arg(short = 't', long, default_value = "50000")]
    duration: u64,

    /// Smallest station count
    #[arg(long, default_value = "5")]
    min_stations: u32,

    /// Largest station count (inclusive)
    #[arg(long, default_value = "500")]
    max_stations: u32,

    /// Initial windows to sweep, comma separated
    #[arg(long, value_delimiter = ',', default_value = "1,2,4,8,16")]
    windows: Vec<u32>,

    /// Packet lengths to sweep, comma separated
    #[arg(long, value_delimiter = ',', default_value = "20,40,60,80,100")]
    lengths: Vec<u64>,

    /// Directory receiving one CSV per series
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,csma_core=info,csma=info")),
        )
        .init();

    match Cli::parse().command {
        Command::Run(args) => run(args),
        Command::Sweep(args) => sweep(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let config = SimConfig::load(&args.input)
        .with_context(|| format!("invalid parameters in {}", args.input.display()))?;
    let seed = args.seed.unwrap_or_else(rand::random);

    info!(
        stations = config.stations,
        packet_len = config.packet_len,
        ranges = ?config.ranges,
        max_retry = config.max_retry,
        duration = config.duration,
        seed,
        "Starting simulation"
    );

    let mut sim = Simulation::seeded(&config, seed)?;
    let stats = sim.run();

    info!("Simulation finished in {}s", to_si(stats.elapsed.as_secs_f64()));
    info!("Dropped {} packets", stats.total_dropped());

    report::write_output(&args.output, &stats)?;
    if let Some(path) = &args.json {
        report::write_json(path, &stats)?;
    }
    info!(output = %args.output.display(), "Statistics written");
    Ok(())
}

fn sweep(args: SweepArgs) -> Result<()> {
    let config = SweepConfig {
        packet_len: args.packet_len,
        initial_window: args.initial_window,
        max_retry: args.max_retry,
        duration: args.duration,
        min_stations: args.min_stations,
        max_stations: args.max_stations,
        window_levels: csma_core::DEFAULT_WINDOW_LEVELS,
        initial_windows: args.windows,
        packet_lens: args.lengths,
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, series = 1 + config.initial_windows.len() + config.packet_lens.len(), "Starting sweep");

    let runner = SweepRunner::new(config, seed).context("invalid sweep grid")?;
    let start = Instant::now();
    let all = runner.run_all()?;

    for series in &all {
        let path = report::write_csv(&args.out_dir, series)?;
        info!(series = %series.spec.kind, path = %path.display(), "Series written");
    }
    info!("Runtime (total): {}s", to_si(start.elapsed().as_secs_f64()));
    Ok(())
}
