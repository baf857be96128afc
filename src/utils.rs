use crate::error::{LoadError, PathfinderError};
use crate::grid::ElevationGrid;
use log::info;
use std::fs;
use std::path::Path;

/// Parses map data text into an `ElevationGrid`.
///
/// The expected layout is:
/// - line 1: the number of columns (e.g. `ncols 844`);
/// - line 2: the number of rows (e.g. `nrows 480`);
/// - every following non-blank line: one row of whitespace-separated integer elevations.
///
/// On the two header lines, the last token that parses as a number is the
/// value, so any label around it is ignored.
///
/// # Returns
/// * `Ok(ElevationGrid)` if the text is well formed.
/// * `Err(PathfinderError::Load(_))` if a header is missing or has no number, an
///   elevation token is not an integer, a row has the wrong number of values,
///   or the number of rows differs from the header.
/// * `Err(PathfinderError::Precondition { .. })` if the declared grid has fewer
///   than 1 row or 2 columns.
///
/// # Examples
/// ```
/// use elevation_pathfinder::utils::grid_from_str;
///
/// let text = "ncols 3\nnrows 2\n1 5 1\n2 2 2\n";
/// let grid = grid_from_str(text).unwrap();
/// assert_eq!(grid.width(), 3);
/// assert_eq!(grid.height(), 2);
/// assert_eq!(grid.elevation(0, 1), 5);
///
/// assert!(grid_from_str("ncols 3\nnrows 2\n1 5 1\n").is_err());
/// ```
pub fn grid_from_str(s: &str) -> Result<ElevationGrid, PathfinderError> {
    let mut lines = s.lines().enumerate().map(|(i, line)| (i + 1, line));

    let width = parse_header(lines.next(), "ncols", 1)?;
    let height = parse_header(lines.next(), "nrows", 2)?;

    // Sized by the rows read, not by the header.
    let mut cells = Vec::new();
    let mut rows_found = 0;

    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let mut found = 0;
        for token in line.split_whitespace() {
            let value = token
                .parse::<i32>()
                .map_err(|_| LoadError::InvalidElevation {
                    line: line_no,
                    token: token.to_string(),
                })?;
            cells.push(value);
            found += 1;
        }
        if found != width {
            return Err(LoadError::RowLength {
                line: line_no,
                expected: width,
                found,
            }
            .into());
        }
        rows_found += 1;
    }

    if rows_found != height {
        return Err(LoadError::RowCount {
            expected: height,
            found: rows_found,
        }
        .into());
    }

    ElevationGrid::new(height, width, cells)
}

fn parse_header(
    line: Option<(usize, &str)>,
    name: &'static str,
    expected_line: usize,
) -> Result<usize, LoadError> {
    let (line_no, content) = line.ok_or(LoadError::MissingHeader {
        name,
        line: expected_line,
    })?;
    content
        .split_whitespace()
        .filter_map(|token| token.parse::<usize>().ok())
        .last()
        .ok_or_else(|| LoadError::InvalidHeader {
            name,
            line: line_no,
            content: content.to_string(),
        })
}

/// Reads and parses a map data file.
///
/// See [`grid_from_str`] for the format.
pub fn load_grid(path: &Path) -> Result<ElevationGrid, PathfinderError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = grid_from_str(&text)?;
    info!(
        "Loaded {} rows x {} columns from {}",
        grid.height(),
        grid.width(),
        path.display()
    );
    Ok(grid)
}

/// Formats a grid in the text layout read by [`grid_from_str`].
pub fn grid_to_string(grid: &ElevationGrid) -> String {
    let mut out = format!("ncols {}\nnrows {}\n", grid.width(), grid.height());
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(i32::to_string).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_str_valid() {
        let text = "ncols         4\nnrows         3\n1 2 3 4\n  5 6 7 8  \n\n-9 1 2 3\n";
        let grid = grid_from_str(text).unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.row(1), &[5, 6, 7, 8]);
        assert_eq!(grid.elevation(2, 0), -9);
    }

    #[test]
    fn test_grid_from_str_bare_numeric_headers() {
        let grid = grid_from_str("2\n1\n10 20\n").unwrap();
        assert_eq!((grid.height(), grid.width()), (1, 2));
    }

    #[test]
    fn test_grid_from_str_missing_header() {
        let result = grid_from_str("ncols 3\n");
        assert!(matches!(
            result,
            Err(PathfinderError::Load(LoadError::MissingHeader { name: "nrows", line: 2 }))
        ));
    }

    #[test]
    fn test_grid_from_str_header_without_number() {
        let result = grid_from_str("ncols many\nnrows 1\n1 2\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid ncols header on line 1"));
    }

    #[test]
    fn test_grid_from_str_invalid_elevation() {
        let result = grid_from_str("ncols 2\nnrows 2\n1 2\n3 x\n");
        assert!(matches!(
            result,
            Err(PathfinderError::Load(LoadError::InvalidElevation { line: 4, ref token })) if token == "x"
        ));
    }

    #[test]
    fn test_grid_from_str_row_length_mismatch() {
        let result = grid_from_str("ncols 3\nnrows 2\n1 2 3\n4 5\n");
        assert!(matches!(
            result,
            Err(PathfinderError::Load(LoadError::RowLength {
                line: 4,
                expected: 3,
                found: 2
            }))
        ));
    }

    #[test]
    fn test_grid_from_str_row_count_mismatch() {
        let too_few = grid_from_str("ncols 2\nnrows 3\n1 2\n3 4\n");
        assert!(matches!(
            too_few,
            Err(PathfinderError::Load(LoadError::RowCount { expected: 3, found: 2 }))
        ));
        let too_many = grid_from_str("ncols 2\nnrows 1\n1 2\n3 4\n");
        assert!(matches!(
            too_many,
            Err(PathfinderError::Load(LoadError::RowCount { expected: 1, found: 2 }))
        ));
    }

    #[test]
    fn test_grid_from_str_oversized_header_is_load_error() {
        for text in [
            "ncols 4000000000\nnrows 4000000000\n1 2\n",
            "ncols 100000\nnrows 100000\n1 2\n",
        ] {
            assert!(matches!(
                grid_from_str(text),
                Err(PathfinderError::Load(LoadError::RowLength { line: 3, found: 2, .. }))
            ));
        }
        assert!(matches!(
            grid_from_str("ncols 2\nnrows 4000000000\n1 2\n"),
            Err(PathfinderError::Load(LoadError::RowCount { found: 1, .. }))
        ));
    }

    #[test]
    fn test_grid_from_str_rejects_single_column() {
        let result = grid_from_str("ncols 1\nnrows 2\n4\n5\n");
        assert!(matches!(
            result,
            Err(PathfinderError::Precondition { height: 2, width: 1 })
        ));
    }

    #[test]
    fn test_grid_to_string_reparses() {
        let grid = ElevationGrid::from_rows(vec![vec![1, -2, 3], vec![40, 50, 60]]).unwrap();
        let text = grid_to_string(&grid);
        assert_eq!(text, "ncols 3\nnrows 2\n1 -2 3\n40 50 60\n");
        assert_eq!(grid_from_str(&text).unwrap(), grid);
    }

    #[test]
    fn test_load_grid_missing_file() {
        let result = load_grid(Path::new("/nonexistent/elevation/map.dat"));
        assert!(matches!(
            result,
            Err(PathfinderError::Load(LoadError::Io { .. }))
        ));
    }
}
