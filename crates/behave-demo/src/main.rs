//! behave-demo: drives the arena behavior with a fixed-step clock.
//!
//! ```text
//! behave-demo --seed 3 --dt 0.02
//! behave-demo --config arena.json -v
//! ```

mod arena;

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use behave_bt::{Behavior, BehaviorConfig, BtStatus, Iterations, SharedTraceSink, TickTime, LOG_EVENT};
use behave_core::tick::DEFAULT_STEP_SECONDS;

use crate::arena::Arena;

#[derive(Parser)]
#[command(name = "behave-demo")]
#[command(about = "Run the arena behavior tree until it completes", version)]
struct Cli {
    /// Maximum number of ticks before giving up
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,

    /// Seconds of elapsed time fed to every tick
    #[arg(long, default_value_t = DEFAULT_STEP_SECONDS)]
    dt: f64,

    /// Root iterations; overrides the config file
    #[arg(long)]
    iterations: Option<u32>,

    /// Seed for spawn placement and strike outcomes
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// JSON behavior config (`{"root": "Root", "iterations": {"count": 1}}`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    fmt().with_env_filter(filter).with_target(false).init();

    ensure!(cli.dt > 0.0, "--dt must be positive, got {}", cli.dt);

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BehaviorConfig::default(),
    };
    if let Some(count) = cli.iterations {
        config.iterations = Iterations::Count(count);
    }

    let sink = SharedTraceSink::new();
    let events = sink.log();
    let mut behavior = arena::trees(cli.seed)?
        .into_iter()
        .fold(Behavior::builder(Arena::new(cli.seed)), |b, tree| b.tree(tree))
        .config(config)
        .sink(Box::new(sink))
        .build()
        .context("assembling arena behavior")?;

    tracing::info!(
        root = behavior.root_name(),
        trees = behavior.trees().len(),
        seed = cli.seed,
        "starting"
    );

    let mut time = TickTime::new(cli.dt, cli.dt, cli.dt);
    let mut printed = 0;
    let mut status = BtStatus::Running;
    for _ in 0..cli.ticks {
        status = behavior.tick(time);

        let log = events.borrow();
        for event in log.events[printed..].iter().filter(|e| e.tag == LOG_EVENT) {
            println!("[{:>6}] {}", event.tick, event.message);
        }
        printed = log.events.len();
        drop(log);

        if status.is_done() {
            break;
        }
        time = time.advance(cli.dt);
    }

    let arena = behavior.context();
    println!();
    println!("Outcome: {status:?} after {} ticks ({:.2}s)", behavior.tick_count(), time.accumulated);
    println!("Enemies spawned: {}", arena.spawned);
    println!("Enemies defeated: {}", arena.defeated);
    println!("Player health: {}", arena.player_health.max(0));

    if status.is_running() {
        tracing::warn!(ticks = cli.ticks, "tick limit reached before the behavior completed");
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<BehaviorConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
