//! Coordinate and size types for addressing grid cells
//!
//! A cell can be named either as `(x, y)` or as `(row, col)`; both forms
//! resolve to the same [`TilePos`] with `row == y` and `col == x`.

use serde::{Deserialize, Serialize};

/// A cell position, `x` is the column and `y` is the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: usize,
    pub y: usize,
}

impl TilePos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Build a position from the `(row, col)` form
    pub const fn from_row_col(row: usize, col: usize) -> Self {
        Self { x: col, y: row }
    }

    pub const fn row(self) -> usize {
        self.y
    }

    pub const fn col(self) -> usize {
        self.x
    }

    /// Offset by `(dx, dy)`, wrapping around a `width` x `height` torus.
    ///
    /// Assumes `self` already lies inside the torus.
    pub fn wrapping_offset(self, dx: isize, dy: isize, width: usize, height: usize) -> Self {
        let x = (self.x as isize + dx).rem_euclid(width as isize) as usize;
        let y = (self.y as isize + dy).rem_euclid(height as isize) as usize;
        Self { x, y }
    }

    /// The four orthogonal neighbours (up, down, left, right) on a torus
    pub fn wrapping_neighbors(self, width: usize, height: usize) -> [TilePos; 4] {
        [
            self.wrapping_offset(0, -1, width, height),
            self.wrapping_offset(0, 1, width, height),
            self.wrapping_offset(-1, 0, width, height),
            self.wrapping_offset(1, 0, width, height),
        ]
    }
}

impl From<(usize, usize)> for TilePos {
    /// Interprets the tuple as `(x, y)`
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl From<TilePos> for (usize, usize) {
    fn from(pos: TilePos) -> Self {
        (pos.x, pos.y)
    }
}

/// Width and height of a rectangle or pattern, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileSize {
    pub width: usize,
    pub height: usize,
}

impl TileSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of cells covered
    pub const fn area(self) -> usize {
        self.width * self.height
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(usize, usize)> for TileSize {
    /// Interprets the tuple as `(width, height)`
    fn from((width, height): (usize, usize)) -> Self {
        Self { width, height }
    }
}
