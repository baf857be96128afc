//! Error types for loading elevation data and running a path search.
//!
//! Two failure classes exist:
//! - [`LoadError`]: the map data could not be read or is malformed.
//! - [`PathfinderError::Precondition`]: the grid is too small to contain a traversal.
//!
//! Both are fatal for a run; nothing is written to the output image when either occurs.

use std::path::PathBuf;

/// Failure to read or parse a map data source.
///
/// Line numbers are 1-based and refer to the line of the source text
/// that triggered the error.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to read map data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing {name} header on line {line}")]
    MissingHeader { name: &'static str, line: usize },

    #[error("invalid {name} header on line {line}: {content:?}")]
    InvalidHeader {
        name: &'static str,
        line: usize,
        content: String,
    },

    #[error("invalid elevation {token:?} on line {line}")]
    InvalidElevation { line: usize, token: String },

    #[error("row on line {line} has {found} values (expected {expected})")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} rows of elevation data, found {found}")]
    RowCount { expected: usize, found: usize },
}

/// Top-level error for a pathfinder run.
#[derive(thiserror::Error, Debug)]
pub enum PathfinderError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("grid must have at least 1 row and 2 columns, got {height} rows and {width} columns")]
    Precondition { height: usize, width: usize },

    #[error("failed to save image to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PathfinderError {
    /// Returns `true` for errors raised before any search began.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, PathfinderError::Load(_))
    }
}
