//! Multiverse batch runner
//!
//! Run with: cargo run -p multiverse --release
//!
//! Examples:
//!   cargo run -p multiverse -- --realities 16 --steps 200
//!   cargo run -p multiverse -- --config multiverse.toml --output output/
//!   cargo run -p multiverse -- --preset classic --print-config

use clap::Parser;
use ideology_core::Preset;
use multiverse::config::DEFAULT_RUN_CONFIG_PATH;
use multiverse::{Multiverse, RunConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Runs independent realities of the ideology dynamics model
#[derive(Parser, Debug)]
#[command(name = "multiverse")]
#[command(about = "Batch runs of the ideology dynamics model")]
struct Args {
    /// Run configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Agents per reality
    #[arg(long)]
    agents: Option<usize>,

    /// Steps per reality
    #[arg(long)]
    steps: Option<u64>,

    /// Seed of reality 0
    #[arg(long)]
    seed: Option<u64>,

    /// Number of realities
    #[arg(long)]
    realities: Option<u32>,

    /// Anchor preset (extended or classic)
    #[arg(long)]
    preset: Option<Preset>,

    /// Record a row every this many steps
    #[arg(long)]
    sample_every: Option<u64>,

    /// Directory for series.jsonl and summary.json
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn resolve(&self) -> Result<RunConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::load_or_default(Path::new(DEFAULT_RUN_CONFIG_PATH))?,
        };

        if let Some(agents) = self.agents {
            config.agents = agents;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(realities) = self.realities {
            config.realities = realities;
        }
        if let Some(preset) = self.preset {
            config.model.preset = preset;
        }
        if let Some(sample_every) = self.sample_every {
            config.sample_every = sample_every;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = args.resolve()?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let multiverse = Multiverse::new(config)?;
    let report = multiverse.run()?;
    println!("{}", report.format_table());

    if let Some(dir) = &args.output {
        report.write_to(dir)?;
    }

    Ok(())
}
