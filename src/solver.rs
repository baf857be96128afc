use crate::grid::{Direction, ElevationGrid};
use crate::recursive::RecursiveSearch;
use crate::tabulated::TabulatedSearch;
use log::{debug, info, log_enabled, trace, Level};
use std::fmt;

/// Which search strategy a run uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Top-down enumeration from each start row.
    Recursive,
    /// Bottom-up dynamic programming over a cost table.
    Tabulated,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Recursive => f.write_str("recursive"),
            Strategy::Tabulated => f.write_str("tabulated"),
        }
    }
}

/// How equal-cost candidate moves are ordered.
///
/// Both policies yield the same optimal costs. They can differ in which of
/// several equally cheap paths gets drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TieBreak {
    /// Each strategy keeps its own order: the recursive search prefers
    /// east, south-east, north-east; the tabulated search prefers
    /// south-east, north-east, east.
    #[default]
    Inherited,
    /// Both strategies prefer east, south-east, north-east.
    Uniform,
}

impl TieBreak {
    /// Returns the move order, most preferred first, that `strategy` uses under this policy.
    pub fn priority(self, strategy: Strategy) -> [Direction; 3] {
        use Direction::*;
        match (self, strategy) {
            (TieBreak::Inherited, Strategy::Tabulated) => [SouthEast, NorthEast, East],
            _ => [East, SouthEast, NorthEast],
        }
    }
}

/// Picks the cheapest move out of (`row`, `col`).
///
/// `successor_cost` gives the cost already known for a target cell; the total
/// for a move is its step cost plus that value. Candidates are visited in
/// `priority` order and only a strictly cheaper one replaces the current pick,
/// so earlier directions win ties. Returns `None` in the last column.
pub(crate) fn cheapest_move(
    grid: &ElevationGrid,
    row: usize,
    col: usize,
    priority: &[Direction; 3],
    mut successor_cost: impl FnMut(usize) -> u64,
) -> Option<(Direction, u64)> {
    let mut best: Option<(Direction, u64)> = None;
    for &dir in priority {
        if let Some((next_row, step)) = grid.step(row, col, dir) {
            let total = step.saturating_add(successor_cost(next_row));
            if best.map_or(true, |(_, cost)| total < cost) {
                best = Some((dir, total));
            }
        }
    }
    best
}

/// A west-to-east traversal of the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    /// `(row, column)` cells from column 0 to the last column, one per column.
    pub cells: Vec<(usize, usize)>,
    /// Sum of the step costs between consecutive cells.
    pub cost: u64,
}

/// Result of running one search strategy over a grid.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub strategy: Strategy,
    /// Total path cost for every start row.
    pub row_costs: Vec<u64>,
    /// One path per start row, in row order.
    pub paths: Vec<Path>,
    /// Start row with the lowest cost (lowest index on ties).
    pub best_row: usize,
    /// Path from `best_row`, produced by the strategy's own best-path pass.
    pub best: Path,
}

impl SearchOutcome {
    pub fn best_path(&self) -> &Path {
        &self.best
    }

    pub fn best_cost(&self) -> u64 {
        self.row_costs[self.best_row]
    }
}

/// Returns the index of the first minimum in `costs`, or `None` if it is empty.
///
/// # Examples
/// ```
/// use elevation_pathfinder::solver::best_start_row;
/// assert_eq!(best_start_row(&[7, 3, 9, 3]), Some(1));
/// assert_eq!(best_start_row(&[]), None);
/// ```
pub fn best_start_row(costs: &[u64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (row, &cost) in costs.iter().enumerate() {
        if best.map_or(true, |b| cost < costs[b]) {
            best = Some(row);
        }
    }
    best
}

/// Runs `strategy` over `grid`, collecting the path for every start row and
/// then the best path in a separate pass.
///
/// The recursive search replays the best row's path without adding to its
/// accumulator. The tabulated search reconstructs it from the same tables
/// used for every other row, so the fill runs once.
pub fn solve(grid: &ElevationGrid, strategy: Strategy, tie_break: TieBreak) -> SearchOutcome {
    let priority = tie_break.priority(strategy);
    info!(
        "Searching {}x{} grid with {} strategy ({:?} tie-break)",
        grid.height(),
        grid.width(),
        strategy,
        tie_break
    );

    let (row_costs, paths, best_row, best) = match strategy {
        Strategy::Recursive => {
            let mut search = RecursiveSearch::new(grid, priority);
            let paths = search.walk_all_rows();
            let row_costs = search.row_costs().to_vec();
            // A valid grid has at least one row, so there is always a minimum.
            let best_row = best_start_row(&row_costs).unwrap_or(0);
            let best = search.replay(best_row);
            (row_costs, paths, best_row, best)
        }
        Strategy::Tabulated => {
            let tables = TabulatedSearch::new(grid, priority).fill();
            if log_enabled!(Level::Trace) {
                trace!("Direction table:\n{}", tables.direction_dump());
            }
            let best_row = tables.best_row();
            (
                tables.start_costs(),
                tables.all_paths(),
                best_row,
                tables.best_path(),
            )
        }
    };

    debug!("Per-row costs: {:?}", row_costs);
    info!(
        "Best start row {} with cost {}",
        best_row, row_costs[best_row]
    );

    SearchOutcome {
        strategy,
        row_costs,
        paths,
        best_row,
        best,
    }
}
