//! Handle to a single grid cell

use crate::{Result, TileGrid, TilePos};

/// A mutable view of one cell of a [`TileGrid`]
///
/// The handle borrows the grid for as long as it lives and stores no tile of
/// its own; reads and writes go straight to the grid.
#[derive(Debug)]
pub struct TileCell<'a, const W: usize, const H: usize> {
    grid: &'a mut TileGrid<W, H>,
    pos: TilePos,
}

impl<'a, const W: usize, const H: usize> TileCell<'a, W, H> {
    /// Callers must pass a position inside the grid
    pub(crate) fn new_unchecked(grid: &'a mut TileGrid<W, H>, pos: TilePos) -> Self {
        debug_assert!(grid.contains(pos));
        Self { grid, pos }
    }

    pub fn pos(&self) -> TilePos {
        self.pos
    }

    pub fn x(&self) -> usize {
        self.pos.x
    }

    pub fn y(&self) -> usize {
        self.pos.y
    }

    pub fn get(&self) -> u8 {
        self.grid[self.pos]
    }

    pub fn set(&mut self, value: u8) {
        self.grid[self.pos] = value;
    }

    /// Read-only access to the owning grid, e.g. to inspect neighbours
    pub fn grid(&self) -> &TileGrid<W, H> {
        &*self.grid
    }
}

impl<const W: usize, const H: usize> TileGrid<W, H> {
    /// Borrow a handle to the cell at `pos`
    pub fn cell(&mut self, pos: impl Into<TilePos>) -> Result<TileCell<'_, W, H>> {
        let pos = pos.into();
        Self::index_of(pos)?;
        Ok(TileCell::new_unchecked(self, pos))
    }
}
