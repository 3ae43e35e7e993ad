//! # SCATTER Headless Driver
//!
//! Steps the simulation for a fixed number of frames without a renderer
//! and logs frame statistics.
//!
//! ```bash
//! # Default scene: 1M objects, 20 targets, 600 frames at 60 Hz
//! scatter
//!
//! # From a config file, with overrides
//! scatter --config config/scatter.toml --frames 120 --regular 250000
//!
//! # Per-frame logs
//! RUST_LOG=scatter_core=debug scatter --frames 10
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use scatter::core::{RenderRecord, SimResult, Simulation, SimulationConfig, WorldBounds};

#[derive(Parser, Debug)]
#[command(name = "scatter")]
#[command(about = "Run the SCATTER avoidance simulation headless")]
struct Args {
    /// TOML config file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value = "600")]
    frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of regular objects
    #[arg(long)]
    regular: Option<usize>,

    /// Override the number of avoid targets
    #[arg(long)]
    targets: Option<usize>,

    /// Log a stats line every N frames (0 disables)
    #[arg(long, default_value = "60")]
    report_every: u64,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scatter=info,scatter_core=info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(args: &Args) -> SimResult<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            SimulationConfig::from_toml_file(path)?
        }
        None => SimulationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(regular) = args.regular {
        config.regular_count = regular;
    }
    if let Some(targets) = args.targets {
        config.target_count = targets;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> SimResult<()> {
    let config = load_config(args)?;
    let mut sim = Simulation::initialize(WorldBounds::default(), config)?;
    let mut records = vec![RenderRecord::default(); sim.record_count()];

    info!(
        records = sim.record_count(),
        frames = args.frames,
        dt = args.dt,
        "running headless"
    );

    let mut total_us = 0u64;
    let mut total_hits = 0usize;
    for _ in 0..args.frames {
        let _ = sim.update(&mut records, args.dt);
        let stats = sim.last_stats();
        total_us += stats.total_us();
        total_hits += stats.avoid_hits;

        if args.report_every > 0 && stats.frame % args.report_every == 0 {
            info!(
                frame = stats.frame,
                avoid_hits = stats.avoid_hits,
                move_us = stats.move_us,
                resolve_us = stats.resolve_us,
                export_us = stats.export_us,
                "frame stats"
            );
        }
    }

    if sim.frame() > 0 {
        info!(
            frames = sim.frame(),
            avg_frame_us = total_us / sim.frame(),
            total_hits,
            "run complete"
        );
    }
    sim.destroy();
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
