//! Errors

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the rasterizer, compositors and buffers
#[derive(Error, Debug)]
pub enum Error {
    /// Operation is not implemented, i.e. stroking
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Row cursor does not point at a cell of the row
    #[error("cell cursor {cursor} invalid for row {y} with {len} cells")]
    CellCursor { y: i64, cursor: usize, len: usize },

    /// Edge walker produced a row outside of the row store
    #[error("row {y} outside of rows {min}..={max}")]
    RowOutOfRange { y: i64, min: i64, max: i64 },

    /// Polygon points requested beyond the end of the coordinate array
    #[error("polygon of {count} points at offset {offset} exceeds {len} coordinates")]
    PolygonRange { offset: usize, count: usize, len: usize },

    /// Sub-view does not fit inside its parent
    #[error("view ({x},{y}) {width}x{height} outside of {parent_width}x{parent_height}")]
    ViewBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        parent_width: usize,
        parent_height: usize,
    },

    /// Writing an image failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
