//! Error type shared by every grid operation

use thiserror::Error;

use crate::{TilePos, TileSize};

/// Result alias for grid operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Failures raised by grid construction, access, and encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position ({}, {}) is outside the {width}x{height} grid", .pos.x, .pos.y)]
    OutOfBounds {
        pos: TilePos,
        width: usize,
        height: usize,
    },
    #[error(
        "rectangle at ({}, {}) of size {}x{} does not fit the {width}x{height} grid",
        .origin.x, .origin.y, .size.width, .size.height
    )]
    RectOutOfBounds {
        origin: TilePos,
        size: TileSize,
        width: usize,
        height: usize,
    },
    /// The byte stream ended before every cell was produced.
    #[error("stream ended at byte {offset} after {cells} of {expected} cells")]
    UnexpectedEof {
        offset: usize,
        cells: usize,
        expected: usize,
    },
    /// A run token asked for more cells than the grid has left.
    #[error("run of {count} at byte {offset} overflows the grid ({remaining} cells left)")]
    RunOverflow {
        offset: usize,
        count: usize,
        remaining: usize,
    },
    /// Tile values must fit in 7 bits to be encoded.
    #[error("tile {value} at ({}, {}) exceeds the encodable maximum of 127", .pos.x, .pos.y)]
    TileOutOfRange { pos: TilePos, value: u8 },
    #[error("pattern of {actual} tiles does not match the {}x{} pattern size", .expected.width, .expected.height)]
    PatternSize { expected: TileSize, actual: usize },
    #[error("pattern size must be at least 1x1")]
    EmptyPattern,
}
