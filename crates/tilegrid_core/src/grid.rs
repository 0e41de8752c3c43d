//! The fixed-size tile grid

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{codec, GridError, Result, TilePos, TileSize};

/// Default grid width, in cells
pub const GRID_WIDTH: usize = 64;
/// Default grid height, in cells
pub const GRID_HEIGHT: usize = 64;

/// A `W` x `H` grid of byte tiles
///
/// Cells are stored row-major (`y * W + x`) in a buffer that always holds
/// exactly `W * H` values, so every in-range position has a defined tile.
/// Every accessor that takes a position checks it against the grid bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileGrid<const W: usize = GRID_WIDTH, const H: usize = GRID_HEIGHT> {
    cells: Box<[u8]>,
}

impl<const W: usize, const H: usize> TileGrid<W, H> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = H;
    pub const CELL_COUNT: usize = W * H;

    /// Create a grid with every cell set to `value`
    pub fn filled(value: u8) -> Self {
        Self {
            cells: vec![value; W * H].into_boxed_slice(),
        }
    }

    /// Create a grid by computing each cell from its position
    pub fn from_fn(mut f: impl FnMut(TilePos) -> u8) -> Self {
        let cells = (0..W * H).map(|i| f(Self::pos_of(i))).collect();
        Self { cells }
    }

    /// Decode a grid from a compressed stream.
    ///
    /// Fails with [`GridError::UnexpectedEof`] if the stream runs out before
    /// every cell is produced. Trailing bytes are ignored.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_prefix(data).map(|(grid, _)| grid)
    }

    /// Decode a grid and report how many bytes its tokens occupied
    pub fn decode_prefix(data: &[u8]) -> Result<(Self, usize)> {
        let mut cells = vec![0u8; W * H].into_boxed_slice();
        let consumed = codec::decode_into(data, &mut cells)?;
        tracing::trace!(consumed, available = data.len(), "decoded {}x{} grid", W, H);
        Ok((Self { cells }, consumed))
    }

    /// Encode the grid into the compressed stream, terminator included.
    ///
    /// Fails with [`GridError::TileOutOfRange`] if any cell exceeds
    /// [`MAX_TILE`](crate::MAX_TILE).
    pub fn encode(&self) -> Result<Vec<u8>> {
        let bytes = codec::encode(&self.cells, W)?;
        tracing::trace!(len = bytes.len(), "encoded {}x{} grid", W, H);
        Ok(bytes)
    }

    pub const fn width(&self) -> usize {
        W
    }

    pub const fn height(&self) -> usize {
        H
    }

    pub const fn size(&self) -> TileSize {
        TileSize::new(W, H)
    }

    /// Check whether a position lies inside the grid
    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x < W && pos.y < H
    }

    pub fn get(&self, pos: impl Into<TilePos>) -> Result<u8> {
        let index = Self::index_of(pos.into())?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, pos: impl Into<TilePos>, value: u8) -> Result<()> {
        let index = Self::index_of(pos.into())?;
        self.cells[index] = value;
        Ok(())
    }

    /// Set every cell of the half-open rectangle at `origin` to `value`.
    ///
    /// The rectangle does not wrap. Nothing is written if it leaves the grid.
    pub fn fill_rect(&mut self, origin: TilePos, size: TileSize, value: u8) -> Result<()> {
        Self::check_rect(origin, size)?;
        for y in origin.y..origin.y + size.height {
            let start = y * W + origin.x;
            self.cells[start..start + size.width].fill(value);
        }
        Ok(())
    }

    /// Copy one row of tiles into the grid starting at `origin`
    pub fn write_row(&mut self, origin: TilePos, row: &[u8]) -> Result<()> {
        Self::check_rect(origin, TileSize::new(row.len(), 1))?;
        let start = origin.y * W + origin.x;
        self.cells[start..start + row.len()].copy_from_slice(row);
        Ok(())
    }

    /// Copy a block of rows into the grid, row `i` landing at `origin.y + i`.
    ///
    /// Rows may differ in length; each is written as its own row copy. Every
    /// row is checked before anything is written.
    pub fn write_block<R: AsRef<[u8]>>(&mut self, origin: TilePos, rows: &[R]) -> Result<()> {
        for (i, row) in rows.iter().enumerate() {
            let row_origin = TilePos::new(origin.x, origin.y + i);
            Self::check_rect(row_origin, TileSize::new(row.as_ref().len(), 1))?;
        }
        for (i, row) in rows.iter().enumerate() {
            let start = (origin.y + i) * W + origin.x;
            let row = row.as_ref();
            self.cells[start..start + row.len()].copy_from_slice(row);
        }
        Ok(())
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (TilePos, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &value)| (Self::pos_of(i), value))
    }

    /// Iterate mutably over all cells in row-major order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TilePos, &mut u8)> + '_ {
        self.cells
            .iter_mut()
            .enumerate()
            .map(|(i, value)| (Self::pos_of(i), value))
    }

    /// Iterate over the rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks_exact(W.max(1))
    }

    /// The raw row-major cells
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn index_of(pos: TilePos) -> Result<usize> {
        if pos.x < W && pos.y < H {
            Ok(pos.y * W + pos.x)
        } else {
            Err(GridError::OutOfBounds {
                pos,
                width: W,
                height: H,
            })
        }
    }

    pub(crate) fn pos_of(index: usize) -> TilePos {
        TilePos::new(index % W, index / W)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    fn check_rect(origin: TilePos, size: TileSize) -> Result<()> {
        let fits_x = origin.x.checked_add(size.width).is_some_and(|end| end <= W);
        let fits_y = origin.y.checked_add(size.height).is_some_and(|end| end <= H);
        if fits_x && fits_y {
            Ok(())
        } else {
            Err(GridError::RectOutOfBounds {
                origin,
                size,
                width: W,
                height: H,
            })
        }
    }
}

impl<const W: usize, const H: usize> Default for TileGrid<W, H> {
    fn default() -> Self {
        Self::filled(0)
    }
}

impl<const W: usize, const H: usize> Index<TilePos> for TileGrid<W, H> {
    type Output = u8;

    /// Panics if `pos` is outside the grid, like slice indexing
    fn index(&self, pos: TilePos) -> &u8 {
        assert!(
            self.contains(pos),
            "tile position {:?} out of bounds for {}x{} grid",
            pos,
            W,
            H
        );
        &self.cells[pos.y * W + pos.x]
    }
}

impl<const W: usize, const H: usize> IndexMut<TilePos> for TileGrid<W, H> {
    fn index_mut(&mut self, pos: TilePos) -> &mut u8 {
        assert!(
            self.contains(pos),
            "tile position {:?} out of bounds for {}x{} grid",
            pos,
            W,
            H
        );
        &mut self.cells[pos.y * W + pos.x]
    }
}

/// Grids serialize as their compressed byte stream
impl<const W: usize, const H: usize> Serialize for TileGrid<W, H> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let bytes = self.encode().map_err(<S::Error as serde::ser::Error>::custom)?;
        bytes.serialize(serializer)
    }
}

impl<'de, const W: usize, const H: usize> Deserialize<'de> for TileGrid<W, H> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Self::decode(&bytes).map_err(<D::Error as serde::de::Error>::custom)
    }
}
