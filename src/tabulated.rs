//! Bottom-up tabulated search.
//!
//! [`TabulatedSearch::fill`] makes one pass over the grid from the last column
//! back to column 0 and produces a [`DpTables`]: the cheapest remaining cost
//! of every cell and the move that achieves it. Path reconstruction only reads
//! those tables, so all paths and the best path are drawn from a single fill.
use crate::grid::{Direction, ElevationGrid};
use crate::solver::{best_start_row, cheapest_move, Path};
use log::debug;

/// Fill phase of the tabulated search.
pub struct TabulatedSearch<'g> {
    grid: &'g ElevationGrid,
    priority: [Direction; 3],
}

impl<'g> TabulatedSearch<'g> {
    /// Creates a search over `grid`. Equal-cost moves are resolved in `priority` order.
    pub fn new(grid: &'g ElevationGrid, priority: [Direction; 3]) -> Self {
        TabulatedSearch { grid, priority }
    }

    /// Fills the cost and direction tables.
    ///
    /// The last column is the base case with cost 0 and no direction. Columns
    /// are then filled right to left, each cell storing the minimum of
    /// `step_cost + cost[target]` over its valid moves. Runs in
    /// `O(height * width)` and depends only on the grid and the priority.
    pub fn fill(&self) -> DpTables<'g> {
        let grid = self.grid;
        let (height, width) = (grid.height(), grid.width());
        let mut costs = vec![0u64; height * width];
        let mut directions = vec![None; height * width];

        for col in (0..grid.last_column()).rev() {
            for row in 0..height {
                let next = &costs;
                let picked = cheapest_move(grid, row, col, &self.priority, |next_row| {
                    next[next_row * width + col + 1]
                });
                if let Some((dir, cost)) = picked {
                    costs[row * width + col] = cost;
                    directions[row * width + col] = Some(dir);
                }
            }
        }
        debug!("Filled {}x{} cost table", height, width);

        DpTables {
            grid,
            costs,
            directions,
        }
    }
}

/// Immutable output of [`TabulatedSearch::fill`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DpTables<'g> {
    grid: &'g ElevationGrid,
    costs: Vec<u64>,
    directions: Vec<Option<Direction>>,
}

impl<'g> DpTables<'g> {
    /// Cheapest cost from (`row`, `col`) to the last column.
    pub fn cost(&self, row: usize, col: usize) -> u64 {
        self.costs[row * self.grid.width() + col]
    }

    /// Move chosen at (`row`, `col`); `None` in the last column.
    pub fn direction(&self, row: usize, col: usize) -> Option<Direction> {
        self.directions[row * self.grid.width() + col]
    }

    /// Column 0 of the cost table: the total cost of each start row.
    pub fn start_costs(&self) -> Vec<u64> {
        (0..self.grid.height()).map(|row| self.cost(row, 0)).collect()
    }

    /// Start row with the lowest total cost, lowest index on ties.
    pub fn best_row(&self) -> usize {
        best_start_row(&self.start_costs()).unwrap_or(0)
    }

    /// Follows the direction table from (`start_row`, 0) to the last column.
    pub fn reconstruct(&self, start_row: usize) -> Path {
        let mut row = start_row;
        let mut cells = Vec::with_capacity(self.grid.width());
        cells.push((row, 0));
        for col in 0..self.grid.last_column() {
            let Some(next_row) = self
                .direction(row, col)
                .and_then(|dir| dir.target_row(row, self.grid.height()))
            else {
                break;
            };
            row = next_row;
            cells.push((row, col + 1));
        }
        Path {
            cells,
            cost: self.cost(start_row, 0),
        }
    }

    /// Reconstructs the path from every start row, in row order.
    pub fn all_paths(&self) -> Vec<Path> {
        (0..self.grid.height())
            .map(|row| self.reconstruct(row))
            .collect()
    }

    /// Reconstructs the path from [`DpTables::best_row`].
    pub fn best_path(&self) -> Path {
        self.reconstruct(self.best_row())
    }

    /// Renders the direction table as rows of `e`/`n`/`s` tags, `.` in the last column.
    ///
    /// `solve` logs this at trace level after the fill.
    pub fn direction_dump(&self) -> String {
        let width = self.grid.width();
        self.directions
            .chunks_exact(width)
            .map(|row| {
                row.iter()
                    .map(|dir| dir.map_or('.', Direction::to_char))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::step_cost;

    const SOUTH_FIRST: [Direction; 3] = [Direction::SouthEast, Direction::NorthEast, Direction::East];

    fn grid(rows: Vec<Vec<i32>>) -> ElevationGrid {
        ElevationGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_last_column_is_base_case() {
        let g = grid(vec![vec![3, 1, 4, 1], vec![5, 9, 2, 6], vec![5, 3, 5, 8]]);
        let tables = TabulatedSearch::new(&g, SOUTH_FIRST).fill();
        for row in 0..g.height() {
            assert_eq!(tables.cost(row, 3), 0);
            assert_eq!(tables.direction(row, 3), None);
            assert!(tables.direction(row, 0).is_some());
        }
    }

    #[test]
    fn test_width_two_costs_are_single_steps() {
        // East is the cheapest move from every row, so column 0 holds
        // |e[r][0] - e[r][1]|.
        let g = grid(vec![vec![5, 6], vec![20, 18], vec![40, 43]]);
        let tables = TabulatedSearch::new(&g, SOUTH_FIRST).fill();
        for row in 0..g.height() {
            assert_eq!(
                tables.cost(row, 0),
                step_cost(g.elevation(row, 0), g.elevation(row, 1))
            );
            assert_eq!(tables.direction(row, 0), Some(Direction::East));
        }

        // A diagonal step is taken when it is cheaper.
        let g = grid(vec![vec![1, 4], vec![7, 7], vec![2, 9]]);
        let tables = TabulatedSearch::new(&g, SOUTH_FIRST).fill();
        assert_eq!(tables.start_costs(), vec![3, 0, 5]);
        assert_eq!(tables.direction(2, 0), Some(Direction::NorthEast));
    }

    #[test]
    fn test_routes_around_row_transition() {
        // Row 1 drops to 0 in column 2. At (1, 1) the candidates are:
        //   east       |2 - 0| + 4 = 6
        //   north-east |2 - 3| + 1 = 2
        //   south-east |2 - 3| + 1 = 2
        // so the path leaves row 1 there, and south-east wins the tie.
        let g = grid(vec![vec![1, 5, 3, 4], vec![2, 2, 0, 4], vec![1, 5, 3, 4]]);
        let tables = TabulatedSearch::new(&g, SOUTH_FIRST).fill();
        assert_eq!(tables.cost(1, 2), 4);
        assert_eq!(tables.cost(1, 1), 2);
        assert_eq!(tables.direction(1, 1), Some(Direction::SouthEast));
        assert_eq!(tables.direction(0, 1), Some(Direction::East));
        assert_eq!(tables.direction(2, 1), Some(Direction::East));
        assert_eq!(tables.direction(1, 0), Some(Direction::East));
        assert_eq!(tables.start_costs(), vec![3, 2, 3]);
        assert_eq!(tables.best_row(), 1);

        let best = tables.best_path();
        assert_eq!(best.cells, vec![(1, 0), (1, 1), (2, 2), (1, 3)]);
        assert_eq!(best.cost, 2);
        assert_eq!(tables.direction_dump(), "ses.\ness.\nnen.");
    }

    #[test]
    fn test_fill_is_idempotent() {
        let g = ElevationGrid::random_with_seed(9, 14, 50, 7).unwrap();
        let search = TabulatedSearch::new(&g, SOUTH_FIRST);
        assert_eq!(search.fill(), search.fill());
    }

    #[test]
    fn test_single_row_grid() {
        let g = grid(vec![vec![10, 4, 4, 12]]);
        let tables = TabulatedSearch::new(&g, SOUTH_FIRST).fill();
        assert_eq!(tables.start_costs(), vec![14]);
        let path = tables.best_path();
        assert_eq!(path.cells, vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(tables.direction_dump(), "eee.");
    }

    #[test]
    fn test_concrete_scenario_selects_middle_row() {
        let g = grid(vec![vec![1, 5, 1], vec![2, 2, 2], vec![9, 1, 9]]);
        let tables = TabulatedSearch::new(&g, SOUTH_FIRST).fill();
        assert_eq!(tables.start_costs(), vec![1, 0, 7]);
        assert_eq!(tables.best_row(), 1);
        let best = tables.best_path();
        assert_eq!(best.cost, 0);
        assert_eq!(best.cells, vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_reconstructed_cost_matches_table() {
        let g = ElevationGrid::random_with_seed(6, 10, 30, 99).unwrap();
        let tables = TabulatedSearch::new(&g, SOUTH_FIRST).fill();
        for path in tables.all_paths() {
            let walked: u64 = path
                .cells
                .windows(2)
                .map(|w| step_cost(g.elevation(w[0].0, w[0].1), g.elevation(w[1].0, w[1].1)))
                .sum();
            assert_eq!(walked, path.cost);
        }
    }
}
