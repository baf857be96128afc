//! Drawing the elevation map and path overlays.
//!
//! Everything here writes through the [`RasterSink`] trait, a write-only
//! pixel target addressed by grid `(row, column)`. [`ImageSink`] is the PNG
//! backed implementation used by the command-line tool.
use crate::error::PathfinderError;
use crate::grid::ElevationGrid;
use crate::solver::{Path, SearchOutcome};
use image::RgbImage;
use log::{debug, warn};
use std::fmt;
use std::path::Path as FsPath;
use std::str::FromStr;

/// Gray level used for every cell when the whole grid has one elevation.
pub const FLAT_GRAY: u8 = 128;

/// An 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    pub const fn gray(level: u8) -> Self {
        Color::new(level, level, level)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parses `"R,G,B"`, e.g. `"255,255,0"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected R,G,B but found {:?}", s));
        }
        let mut channels = [0u8; 3];
        for (channel, part) in channels.iter_mut().zip(&parts) {
            *channel = part
                .parse::<u8>()
                .map_err(|_| format!("invalid color channel {:?} in {:?}", part, s))?;
        }
        Ok(Color::new(channels[0], channels[1], channels[2]))
    }
}

/// Colors used for path overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Color of every start row's path.
    pub all_paths: Color,
    /// Color of the best path, drawn last.
    pub best_path: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            all_paths: Color::BLUE,
            best_path: Color::YELLOW,
        }
    }
}

/// A write-only pixel target addressed by grid coordinates.
pub trait RasterSink {
    fn set(&mut self, row: usize, column: usize, red: u8, green: u8, blue: u8);

    fn set_color(&mut self, row: usize, column: usize, color: Color) {
        self.set(row, column, color.red, color.green, color.blue);
    }
}

/// Maps `elevation` linearly from `[min, max]` onto `[0, 255]`, truncating.
///
/// Returns [`FLAT_GRAY`] when `min == max`.
///
/// ```
/// use elevation_pathfinder::render::grayscale_level;
/// assert_eq!(grayscale_level(0, 0, 10), 0);
/// assert_eq!(grayscale_level(10, 0, 10), 255);
/// assert_eq!(grayscale_level(5, 0, 10), 127);
/// assert_eq!(grayscale_level(3, 3, 3), 128);
/// ```
pub fn grayscale_level(elevation: i32, min: i32, max: i32) -> u8 {
    if max <= min {
        return FLAT_GRAY;
    }
    let offset = i64::from(elevation) - i64::from(min);
    let range = i64::from(max) - i64::from(min);
    (offset.clamp(0, range) * 255 / range) as u8
}

/// Draws every cell of `grid` as a gray level scaled between its lowest and highest elevation.
pub fn draw_map(grid: &ElevationGrid, sink: &mut impl RasterSink) {
    let (min, max) = grid.min_max();
    if min == max {
        warn!("Grid is flat (every elevation is {}); drawing uniform gray", min);
    }
    for (row, values) in grid.rows().enumerate() {
        for (col, &elevation) in values.iter().enumerate() {
            sink.set_color(row, col, Color::gray(grayscale_level(elevation, min, max)));
        }
    }
}

/// Draws one path in `color`.
pub fn draw_path(path: &Path, color: Color, sink: &mut impl RasterSink) {
    for &(row, col) in &path.cells {
        sink.set_color(row, col, color);
    }
}

/// Draws every start row's path, then the best path on top of them.
pub fn draw_paths(outcome: &SearchOutcome, palette: &Palette, sink: &mut impl RasterSink) {
    for path in &outcome.paths {
        draw_path(path, palette.all_paths, sink);
    }
    draw_path(outcome.best_path(), palette.best_path, sink);
    debug!(
        "Drew {} paths, best from row {}",
        outcome.paths.len(),
        outcome.best_row
    );
}

/// A [`RasterSink`] backed by an in-memory RGB image, one pixel per grid cell.
pub struct ImageSink {
    image: RgbImage,
}

impl ImageSink {
    /// Creates a black image with one pixel per cell of `grid`.
    pub fn for_grid(grid: &ElevationGrid) -> Self {
        ImageSink {
            image: RgbImage::new(grid.width() as u32, grid.height() as u32),
        }
    }

    /// Returns the color at (`row`, `column`).
    pub fn pixel(&self, row: usize, column: usize) -> Color {
        let image::Rgb([red, green, blue]) = *self.image.get_pixel(column as u32, row as u32);
        Color::new(red, green, blue)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Writes the image to `path`; the format follows the file extension.
    pub fn save(&self, path: &FsPath) -> Result<(), PathfinderError> {
        self.image
            .save(path)
            .map_err(|source| PathfinderError::Save {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl RasterSink for ImageSink {
    fn set(&mut self, row: usize, column: usize, red: u8, green: u8, blue: u8) {
        self.image
            .put_pixel(column as u32, row as u32, image::Rgb([red, green, blue]));
    }
}
