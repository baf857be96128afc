//! Elevation grid storage, the step cost model, and the move set.
//!
//! This module defines the data shared by every search strategy:
//! - `ElevationGrid`: the immutable `height x width` matrix of elevation samples.
//! - `step_cost`: the cost of moving between two adjacent cells.
//! - `Direction`: the three eastward moves a traversal can make.
use crate::error::PathfinderError;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Returns the cost of stepping from a cell at elevation `a` to one at elevation `b`.
///
/// The cost is the absolute elevation difference. It is computed in `u64` so
/// that it is defined for every pair of `i32` inputs.
///
/// # Examples
///
/// ```
/// use elevation_pathfinder::grid::step_cost;
/// assert_eq!(step_cost(3, 7), 4);
/// assert_eq!(step_cost(7, 3), 4);
/// assert_eq!(step_cost(i32::MIN, i32::MAX), u32::MAX as u64);
/// ```
pub fn step_cost(a: i32, b: i32) -> u64 {
    a.abs_diff(b) as u64
}

/// One eastward move from a cell in column `c` to a cell in column `c + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Same row.
    East,
    /// One row up (towards row 0).
    NorthEast,
    /// One row down (towards row `height - 1`).
    SouthEast,
}

impl Direction {
    /// Every direction, in declaration order.
    pub const ALL: [Direction; 3] = [Direction::East, Direction::NorthEast, Direction::SouthEast];

    /// Returns the row reached by taking this move from `row` in a grid of `height` rows,
    /// or `None` if the move would leave the grid.
    ///
    /// ```
    /// use elevation_pathfinder::grid::Direction;
    /// assert_eq!(Direction::NorthEast.target_row(0, 3), None);
    /// assert_eq!(Direction::SouthEast.target_row(0, 3), Some(1));
    /// assert_eq!(Direction::SouthEast.target_row(2, 3), None);
    /// ```
    pub fn target_row(self, row: usize, height: usize) -> Option<usize> {
        let target = match self {
            Direction::East => Some(row),
            Direction::NorthEast => row.checked_sub(1),
            Direction::SouthEast => row.checked_add(1),
        }?;
        (target < height).then_some(target)
    }

    /// Single-character tag, used in debug dumps of the direction table.
    pub fn to_char(self) -> char {
        match self {
            Direction::East => 'e',
            Direction::NorthEast => 'n',
            Direction::SouthEast => 's',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::East => "east",
            Direction::NorthEast => "north-east",
            Direction::SouthEast => "south-east",
        };
        f.write_str(name)
    }
}

/// Immutable rectangular matrix of elevation samples, stored row-major.
///
/// A grid always satisfies `height >= 1` and `width >= 2`, since a traversal
/// needs at least one row and two columns. Constructors enforce this and
/// return [`PathfinderError::Precondition`] otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElevationGrid {
    height: usize,
    width: usize,
    cells: Vec<i32>,
}

impl ElevationGrid {
    /// Smallest number of rows a grid may have.
    pub const MIN_HEIGHT: usize = 1;
    /// Smallest number of columns a grid may have.
    pub const MIN_WIDTH: usize = 2;

    /// Creates a grid from row-major `cells`.
    ///
    /// # Errors
    /// Returns [`PathfinderError::Precondition`] if `height < 1`, `width < 2`,
    /// or `cells.len() != height * width`.
    pub fn new(height: usize, width: usize, cells: Vec<i32>) -> Result<Self, PathfinderError> {
        if height < Self::MIN_HEIGHT
            || width < Self::MIN_WIDTH
            || height.checked_mul(width) != Some(cells.len())
        {
            return Err(PathfinderError::Precondition { height, width });
        }
        Ok(ElevationGrid {
            height,
            width,
            cells,
        })
    }

    /// Creates a grid from a list of rows.
    ///
    /// The width is taken from the first row; every other row must match it.
    ///
    /// # Examples
    /// ```
    /// use elevation_pathfinder::grid::ElevationGrid;
    /// let grid = ElevationGrid::from_rows(vec![vec![1, 5, 1], vec![2, 2, 2]]).unwrap();
    /// assert_eq!(grid.height(), 2);
    /// assert_eq!(grid.width(), 3);
    /// assert_eq!(grid.elevation(1, 2), 2);
    ///
    /// assert!(ElevationGrid::from_rows(vec![vec![1]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, PathfinderError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(PathfinderError::Precondition { height, width });
        }
        Self::new(height, width, rows.into_iter().flatten().collect())
    }

    /// Creates a grid of random elevations in `0..=max_elevation`.
    ///
    /// The same seed always produces the same grid, which keeps generated maps
    /// and benchmarks reproducible.
    pub fn random_with_seed(
        height: usize,
        width: usize,
        max_elevation: i32,
        seed: u64,
    ) -> Result<Self, PathfinderError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let upper = max_elevation.max(0);
        let cells = (0..height.saturating_mul(width))
            .map(|_| rng.gen_range(0..=upper))
            .collect();
        Self::new(height, width, cells)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Index of the last column, where every traversal ends.
    pub fn last_column(&self) -> usize {
        self.width - 1
    }

    /// Returns the elevation at (`row`, `col`).
    ///
    /// # Panics
    /// Panics if the coordinates are outside the grid.
    pub fn elevation(&self, row: usize, col: usize) -> i32 {
        assert!(col < self.width, "column {col} out of bounds");
        self.cells[row * self.width + col]
    }

    /// Returns one row of elevations.
    pub fn row(&self, row: usize) -> &[i32] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Iterates over the rows of the grid from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.cells.chunks_exact(self.width)
    }

    /// Returns the lowest and highest elevation in the grid.
    pub fn min_max(&self) -> (i32, i32) {
        self.cells
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), &e| (lo.min(e), hi.max(e)))
    }

    /// Returns the row reached and the step cost of moving `dir` from (`row`, `col`),
    /// or `None` when the move leaves the grid or `col` is already the last column.
    pub fn step(&self, row: usize, col: usize, dir: Direction) -> Option<(usize, u64)> {
        if col >= self.last_column() {
            return None;
        }
        let next_row = dir.target_row(row, self.height)?;
        let cost = step_cost(self.elevation(row, col), self.elevation(next_row, col + 1));
        Some((next_row, cost))
    }
}
