//! Headless simulation runner.

use anyhow::{Context, Result};
use clap::Parser;
use glade_lib::model::config::AppConfig;
use glade_lib::model::creature::Species;
use glade_lib::model::world::{DeathCause, LiveEvent, World};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Agent-based ecosystem simulation")]
struct Args {
    /// Path to the TOML config; created with defaults if missing.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to run.
    #[arg(short, long, default_value_t = 10_000)]
    ticks: u64,

    /// Override the RNG seed from the config.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log a population summary every N ticks.
    #[arg(long, default_value_t = 100)]
    stats_every: u64,

    /// Print the final population stats as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config))?;
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }

    let mut world = World::new(config)?;
    tracing::info!(
        creatures = world.creatures.len(),
        food = world.food.len(),
        water_bodies = world.water.len(),
        seed = ?world.config.world.seed,
        "world initialized"
    );

    for _ in 0..args.ticks {
        let events = world.update();
        for event in events {
            log_event(&event);
        }
        if args.stats_every > 0 && world.tick % args.stats_every == 0 {
            let stats = &world.stats;
            tracing::info!(
                tick = stats.tick,
                creatures = stats.total_creatures,
                food = stats.food_count,
                "population"
            );
            for species in Species::ALL {
                let entry = stats.species(species);
                tracing::info!(
                    species = species.label(),
                    count = entry.count,
                    mean_speed = ?entry.mean_speed,
                    mean_sense = ?entry.mean_sense,
                    "species"
                );
            }
        }
        if world.creatures.is_empty() {
            tracing::info!(tick = world.tick, "ecosystem extinct, stopping");
            break;
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&world.stats)?);
    }
    Ok(())
}

fn log_event(event: &LiveEvent) {
    match event {
        LiveEvent::Birth { id, species } => {
            tracing::debug!(%id, species = species.label(), "birth");
        }
        LiveEvent::Death { id, species, cause } => {
            let cause = match cause {
                DeathCause::Starved => "starved",
                DeathCause::Hunted => "hunted",
            };
            tracing::debug!(%id, species = species.label(), cause, "death");
        }
        LiveEvent::FoodConsumed { id, by } => {
            tracing::debug!(food = %id, %by, "food consumed");
        }
    }
}
