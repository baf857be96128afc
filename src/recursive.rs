//! Top-down search that enumerates moves from each start row.
//!
//! The cheapest remaining cost of a cell is zero in the last column and
//! otherwise the minimum over its moves of `step_cost + cost(target)`. Cells
//! are solved depth-first on an explicit work stack, so grids of any width can
//! be searched without growing the call stack, and each solved cell is
//! remembered so shared suffixes are enumerated only once.
use crate::grid::{Direction, ElevationGrid};
use crate::solver::{cheapest_move, Path};
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Choice {
    /// Cheapest cost from this cell to the last column.
    cost: u64,
    /// Move achieving `cost`; `None` in the last column.
    next: Option<Direction>,
}

/// Recursive search state for one grid.
///
/// `row_costs` is the per-start-row accumulator: it starts at zero and each
/// call to [`RecursiveSearch::walk_from`] adds the step costs of that row's
/// path to its entry.
pub struct RecursiveSearch<'g> {
    grid: &'g ElevationGrid,
    priority: [Direction; 3],
    solved: Vec<Option<Choice>>,
    row_costs: Vec<u64>,
}

impl<'g> RecursiveSearch<'g> {
    /// Creates a search over `grid`. Equal-cost moves are resolved in `priority` order.
    pub fn new(grid: &'g ElevationGrid, priority: [Direction; 3]) -> Self {
        RecursiveSearch {
            grid,
            priority,
            solved: vec![None; grid.height() * grid.width()],
            row_costs: vec![0; grid.height()],
        }
    }

    /// Accumulated path cost for every start row walked so far.
    pub fn row_costs(&self) -> &[u64] {
        &self.row_costs
    }

    /// Walks every start row from top to bottom, resetting the accumulator first.
    pub fn walk_all_rows(&mut self) -> Vec<Path> {
        self.row_costs.iter_mut().for_each(|cost| *cost = 0);
        (0..self.grid.height())
            .map(|row| self.walk_from(row))
            .collect()
    }

    /// Walks the cheapest path starting at (`start_row`, 0), adding each step
    /// cost to the accumulator entry for `start_row`.
    pub fn walk_from(&mut self, start_row: usize) -> Path {
        self.solve(start_row, 0);
        let (path, steps) = self.trace(start_row);
        for step in steps {
            self.row_costs[start_row] += step;
        }
        debug!(
            "Row {} walked with cost {}",
            start_row, self.row_costs[start_row]
        );
        path
    }

    /// Returns the path from `start_row` again without touching the accumulator.
    pub fn replay(&mut self, start_row: usize) -> Path {
        self.solve(start_row, 0);
        self.trace(start_row).0
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.grid.width() + col
    }

    fn solve(&mut self, row: usize, col: usize) -> Choice {
        let grid = self.grid;
        let last = grid.last_column();
        let mut stack = vec![(row, col)];

        while let Some(&(r, c)) = stack.last() {
            let idx = self.index(r, c);
            if self.solved[idx].is_some() {
                stack.pop();
                continue;
            }
            if c == last {
                self.solved[idx] = Some(Choice {
                    cost: 0,
                    next: None,
                });
                stack.pop();
                continue;
            }

            let mut pending = false;
            for dir in Direction::ALL {
                if let Some(next_row) = dir.target_row(r, grid.height()) {
                    if self.solved[self.index(next_row, c + 1)].is_none() {
                        stack.push((next_row, c + 1));
                        pending = true;
                    }
                }
            }
            if pending {
                continue;
            }

            let solved = &self.solved;
            let width = grid.width();
            let choice = match cheapest_move(grid, r, c, &self.priority, |next_row| {
                solved[next_row * width + c + 1].map_or(u64::MAX, |choice| choice.cost)
            }) {
                Some((dir, cost)) => Choice {
                    cost,
                    next: Some(dir),
                },
                None => Choice {
                    cost: 0,
                    next: None,
                },
            };
            self.solved[idx] = Some(choice);
            stack.pop();
        }

        let idx = self.index(row, col);
        self.solved[idx].unwrap_or(Choice {
            cost: 0,
            next: None,
        })
    }

    /// Follows solved moves from (`start_row`, 0), returning the path and its step costs.
    fn trace(&self, start_row: usize) -> (Path, Vec<u64>) {
        let mut row = start_row;
        let mut cells = Vec::with_capacity(self.grid.width());
        let mut steps = Vec::with_capacity(self.grid.last_column());
        cells.push((row, 0));

        for col in 0..self.grid.last_column() {
            let next = self.solved[self.index(row, col)].and_then(|choice| choice.next);
            let Some((next_row, step)) = next.and_then(|dir| self.grid.step(row, col, dir)) else {
                break;
            };
            steps.push(step);
            row = next_row;
            cells.push((row, col + 1));
        }

        let cost = steps.iter().sum();
        (Path { cells, cost }, steps)
    }
}
