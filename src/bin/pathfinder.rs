use anyhow::Context;
use clap::Parser;
use elevation_pathfinder::pathfinder::{Pathfinder, PathfinderConfig};
use elevation_pathfinder::render::{Color, Palette};
use elevation_pathfinder::solver::{Strategy, TieBreak};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the map data file (ncols / nrows header, then one row per line)
    data_file: PathBuf,

    /// Path of the image to write (PNG)
    output_file: PathBuf,

    /// Search strategy
    #[clap(short, long, value_enum, default_value_t = Strategy::Tabulated)]
    strategy: Strategy,

    /// How equal-cost moves are ordered
    #[clap(short, long, value_enum, default_value_t = TieBreak::Inherited)]
    tie_break: TieBreak,

    /// Color of every start row's path, as R,G,B
    #[clap(long, default_value_t = Color::BLUE)]
    all_paths_color: Color,

    /// Color of the best path, as R,G,B
    #[clap(long, default_value_t = Color::YELLOW)]
    best_path_color: Color,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = PathfinderConfig::new(&args.data_file, &args.output_file)
        .with_strategy(args.strategy)
        .with_tie_break(args.tie_break)
        .with_palette(Palette {
            all_paths: args.all_paths_color,
            best_path: args.best_path_color,
        });

    let report = Pathfinder::new(config)
        .run()
        .with_context(|| format!("Failed to find paths for {}", args.data_file.display()))?;

    println!("Strategy: {}", report.strategy);
    println!("Best start row: {}", report.best_row);
    println!("Best path cost: {}", report.best_cost);
    println!("Image written to {}", args.output_file.display());
    Ok(())
}
