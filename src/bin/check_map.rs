use anyhow::{bail, Context};
use clap::Parser;
use maze_obstacles::{Config, Terrain};
use std::{path::PathBuf, time::Instant};

#[derive(Parser)]
#[command(author, version, about = "Trace the wall obstacles of a world file", long_about = None)]
struct Cli {
    /// World file to check
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Tile size in pixels; overrides the configuration file
    #[arg(long)]
    tile_size: Option<i32>,

    /// Maximum number of tiles per traced obstacle; overrides the configuration file
    #[arg(long)]
    iteration_cap: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let mut config = Config::load_or_default().context("loading configuration")?;
    if let Some(tile_size) = cli.tile_size {
        config.tile_size = tile_size;
    }
    if let Some(iteration_cap) = cli.iteration_cap {
        config.iteration_cap = iteration_cap;
    }

    let terrain = Terrain::load(&cli.file, config)
        .with_context(|| format!("loading {}", cli.file.display()))?;

    let start = Instant::now();
    let obstacles = terrain.obstacles();
    let elapsed = start.elapsed();

    let closed = obstacles.iter().filter(|obstacle| obstacle.is_closed()).count();
    println!(
        "{}: {}x{} tiles, {} obstacles ({} closed, {} open) in {:?}",
        cli.file.display(),
        terrain.grid().rows(),
        terrain.grid().cols(),
        obstacles.len(),
        closed,
        obstacles.len() - closed,
        elapsed,
    );
    if let Some(house) = terrain.house_origin() {
        println!("house origin: {}", house);
    }

    let errors = terrain.tracing_errors();
    for tile in errors {
        println!("unexpected terrain at {}: {}", tile, terrain.grid()[*tile]);
    }
    if !errors.is_empty() {
        bail!("{} tracing errors", errors.len());
    }

    Ok(())
}
