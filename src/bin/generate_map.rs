use anyhow::Context;
use clap::Parser;
use elevation_pathfinder::grid::ElevationGrid;
use elevation_pathfinder::utils::grid_to_string;
use log::info;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Writes a random elevation map data file", long_about = None)]
struct Args {
    /// Number of columns
    #[clap(long)]
    width: usize,

    /// Number of rows
    #[clap(long)]
    height: usize,

    /// Highest elevation that may be generated (lowest is 0)
    #[clap(long, default_value_t = 5000)]
    max_elevation: i32,

    /// Seed for the random number generator; the same seed gives the same map
    #[clap(long, default_value_t = 514514)]
    seed: u64,

    /// Path of the map data file to write
    output_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let grid = ElevationGrid::random_with_seed(args.height, args.width, args.max_elevation, args.seed)
        .context("Invalid map dimensions")?;

    fs::write(&args.output_file, grid_to_string(&grid))
        .with_context(|| format!("Failed to write {}", args.output_file.display()))?;
    info!(
        "Wrote {}x{} map (seed {}) to {}",
        args.height,
        args.width,
        args.seed,
        args.output_file.display()
    );
    Ok(())
}
