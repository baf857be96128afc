//! # Elevation Pathfinder Library
//!
//! This library finds west-to-east paths across a grid of elevation samples
//! that minimise the total climb and descent, and draws them over a grayscale
//! rendering of the terrain.
//!
//! It is used by two binaries:
//! - `pathfinder`: reads a map data file, runs one search strategy, and
//!   writes a PNG with every start row's path and the best path highlighted.
//! - `generate_map`: writes a reproducible random map data file.
//!
//! Two search strategies share one move set and cost model and always agree
//! on the optimal cost:
//! - a recursive top-down search that accumulates a cost per start row, and
//! - a tabulated bottom-up search that fills cost and direction tables once
//!   and reconstructs paths from them.
//!
//! ## Modules
//! - `grid`: the elevation grid (`ElevationGrid`), the step cost, and move directions.
//! - `solver`: strategy selection, tie-break policy, `Path`, and best-row selection.
//! - `recursive`: the recursive search.
//! - `tabulated`: the tabulated (dynamic programming) search.
//! - `render`: grayscale map drawing and path overlays onto a `RasterSink`.
//! - `pathfinder`: run configuration and the end-to-end run.
//! - `utils`: reading and writing the map data text format.
//! - `error`: load and precondition errors.
//!
//! ## Example
//! ```
//! use elevation_pathfinder::grid::ElevationGrid;
//! use elevation_pathfinder::solver::{solve, Strategy, TieBreak};
//!
//! let grid = ElevationGrid::from_rows(vec![vec![1, 5, 1], vec![2, 2, 2], vec![9, 1, 9]]).unwrap();
//! let outcome = solve(&grid, Strategy::Tabulated, TieBreak::Inherited);
//! assert_eq!(outcome.best_row, 1);
//! assert_eq!(outcome.best_cost(), 0);
//! ```

pub mod error;
pub mod grid;
pub mod pathfinder;
pub mod recursive;
pub mod render;
pub mod solver;
pub mod tabulated;
pub mod utils;
