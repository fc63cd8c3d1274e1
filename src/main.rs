use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use primordia::simulation::ecosystem::Ecosystem;
use primordia::simulation::params::Params;
use primordia::simulation::stats::PopulationStats;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "primordia",
    version,
    about = "Run a headless hormone-modulated artificial life simulation"
)]
struct Cli {
    /// JSON parameter file; defaults are used for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the RNG seed from the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// Time step per tick.
    #[arg(long, default_value_t = 1.0)]
    dt: f32,

    /// Run the generational selector every N ticks (0 disables it).
    #[arg(long, default_value_t = 1_000)]
    generation_every: u64,

    /// Write a population snapshot here when the run ends.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Resume from a population snapshot instead of a fresh world.
    #[arg(long)]
    load: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if !(cli.dt > 0.0 && cli.dt.is_finite()) {
        bail!("--dt must be a positive number, got {}", cli.dt);
    }

    let mut ecosystem = build_world(&cli)?;
    info!(
        entities = ecosystem.entities.len(),
        food = ecosystem.food.len(),
        generation = ecosystem.generation,
        "starting simulation"
    );

    for tick in 1..=cli.ticks {
        ecosystem.tick(cli.dt);

        if cli.generation_every > 0 && tick % cli.generation_every == 0 {
            let stats = ecosystem.next_generation();
            info!(
                generation = ecosystem.generation,
                count = stats.count,
                mean_fitness = stats.mean_fitness,
                max_fitness = stats.max_fitness,
                mean_age = stats.mean_age,
                food_eaten = stats.total_food_eaten,
                "generation summary"
            );
        }
    }

    let stats = PopulationStats::collect(&ecosystem);
    info!(
        ticks = ecosystem.ticks,
        time = ecosystem.time,
        count = stats.count,
        mean_fitness = stats.mean_fitness,
        max_fitness = stats.max_fitness,
        best_recorded = ecosystem.history.best_fitness(),
        food = stats.food_count,
        waste = stats.waste_count,
        "simulation finished"
    );

    if let Some(path) = &cli.save {
        ecosystem
            .save_to_file(path)
            .with_context(|| format!("failed to save snapshot to {}", path.display()))?;
    }

    Ok(())
}

fn build_world(cli: &Cli) -> Result<Ecosystem> {
    if let Some(path) = &cli.load {
        return Ecosystem::load_from_file(path)
            .with_context(|| format!("failed to load snapshot from {}", path.display()));
    }

    let mut params = match &cli.config {
        Some(path) => Params::from_json_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => Params::default(),
    };
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }

    Ecosystem::new(params).context("invalid simulation parameters")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
