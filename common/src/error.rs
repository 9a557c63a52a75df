use crate::geom::coord::GridCoord;
use std::path::PathBuf;
use thiserror::Error;

/// Recoverable failures while reading or writing a pin descriptor.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no coordinates for pin in record `{record}`")]
    MissingCoordinates { record: String },

    #[error("invalid coordinate value in record `{record}`")]
    InvalidCoordinate { record: String },

    #[error("pin ({x}, {y}) lies outside the {size}x{size} grid")]
    OutOfBounds { x: u32, y: u32, size: u32 },

    #[error("descriptor contains no pins")]
    Empty,
}

/// A broken internal contract. Never recovered from: callers log it and abort.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("nodes {a} and {b} are not grid-adjacent")]
    NotAdjacent { a: GridCoord, b: GridCoord },

    #[error("node {at} is already occupied")]
    Occupied { at: GridCoord },

    #[error("node {at} is not a pseudo-node")]
    NotPseudo { at: GridCoord },

    #[error("node {at} is outside the grid")]
    OutOfGrid { at: GridCoord },

    #[error("closest pin not found within a {size}x{size} grid")]
    NoClosestPin { size: u32 },
}
