//! End-to-end run: load a map, search it, and save the rendered image.
use crate::error::PathfinderError;
use crate::grid::ElevationGrid;
use crate::render::{draw_map, draw_paths, ImageSink, Palette, RasterSink};
use crate::solver::{solve, SearchOutcome, Strategy, TieBreak};
use crate::utils::load_grid;
use log::info;
use std::path::PathBuf;

/// Settings for one run.
#[derive(Clone, Debug)]
pub struct PathfinderConfig {
    /// Map data file to read.
    pub data_file: PathBuf,
    /// Image file to write.
    pub output_file: PathBuf,
    pub strategy: Strategy,
    pub tie_break: TieBreak,
    pub palette: Palette,
}

impl PathfinderConfig {
    /// Creates a config using the tabulated strategy, inherited tie-breaks and the default palette.
    pub fn new(data_file: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        PathfinderConfig {
            data_file: data_file.into(),
            output_file: output_file.into(),
            strategy: Strategy::Tabulated,
            tie_break: TieBreak::default(),
            palette: Palette::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub strategy: Strategy,
    pub best_row: usize,
    pub best_cost: u64,
    /// Total path cost for every start row.
    pub row_costs: Vec<u64>,
}

impl From<&SearchOutcome> for RunReport {
    fn from(outcome: &SearchOutcome) -> Self {
        RunReport {
            strategy: outcome.strategy,
            best_row: outcome.best_row,
            best_cost: outcome.best_cost(),
            row_costs: outcome.row_costs.clone(),
        }
    }
}

/// Runs the configured search and rendering.
pub struct Pathfinder {
    config: PathfinderConfig,
}

impl Pathfinder {
    pub fn new(config: PathfinderConfig) -> Self {
        Pathfinder { config }
    }

    /// Loads the map, draws it, searches it, overlays the paths and saves the image.
    ///
    /// Any load or dimension error aborts the run before the output file is touched.
    pub fn run(&self) -> Result<RunReport, PathfinderError> {
        let grid = load_grid(&self.config.data_file)?;
        let mut sink = ImageSink::for_grid(&grid);
        let report = self.run_on_grid(&grid, &mut sink);
        sink.save(&self.config.output_file)?;
        info!("Saved image to {}", self.config.output_file.display());
        Ok(report)
    }

    /// Draws `grid`, runs the configured strategy once, and overlays its paths on `sink`.
    pub fn run_on_grid(&self, grid: &ElevationGrid, sink: &mut impl RasterSink) -> RunReport {
        draw_map(grid, sink);
        let outcome = solve(grid, self.config.strategy, self.config.tie_break);
        draw_paths(&outcome, &self.config.palette, sink);
        RunReport::from(&outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    #[test]
    fn test_config_builders() {
        let palette = Palette {
            all_paths: Color::new(1, 2, 3),
            best_path: Color::new(4, 5, 6),
        };
        let config = PathfinderConfig::new("map.dat", "map.png")
            .with_strategy(Strategy::Recursive)
            .with_tie_break(TieBreak::Uniform)
            .with_palette(palette);
        assert_eq!(config.data_file, PathBuf::from("map.dat"));
        assert_eq!(config.output_file, PathBuf::from("map.png"));
        assert_eq!(config.strategy, Strategy::Recursive);
        assert_eq!(config.tie_break, TieBreak::Uniform);
        assert_eq!(config.palette, palette);
    }

    #[test]
    fn test_run_on_grid_reports_best_row() {
        let grid =
            ElevationGrid::from_rows(vec![vec![1, 5, 1], vec![2, 2, 2], vec![9, 1, 9]]).unwrap();
        for strategy in [Strategy::Recursive, Strategy::Tabulated] {
            let pathfinder =
                Pathfinder::new(PathfinderConfig::new("in", "out").with_strategy(strategy));
            let mut sink = ImageSink::for_grid(&grid);
            let report = pathfinder.run_on_grid(&grid, &mut sink);
            assert_eq!(report.strategy, strategy);
            assert_eq!(report.best_row, 1);
            assert_eq!(report.best_cost, 0);
            assert_eq!(report.row_costs, vec![1, 0, 7]);
            assert_eq!(sink.pixel(1, 0), Color::YELLOW);
        }
    }

    #[test]
    fn test_run_fails_on_missing_input_without_output() {
        let output = std::env::temp_dir().join(format!(
            "elevation_pathfinder_missing_{}.png",
            std::process::id()
        ));
        let pathfinder = Pathfinder::new(PathfinderConfig::new(
            "/nonexistent/elevation/map.dat",
            &output,
        ));
        let err = pathfinder.run().unwrap_err();
        assert!(err.is_load_failure());
        assert!(!output.exists());
    }
}
