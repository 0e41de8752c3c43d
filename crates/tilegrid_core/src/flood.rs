//! Toroidal flood fill
//!
//! The grid is treated as a torus: stepping off one edge lands on the
//! opposite edge. The traversal is breadth-first over the four orthogonal
//! neighbours and keeps an explicit table of queued cells, so it visits each
//! cell at most once and always terminates.

use std::collections::VecDeque;

use crate::{Result, TileCell, TileGrid, TilePos};

impl<const W: usize, const H: usize> TileGrid<W, H> {
    /// Flood outward from `start`, calling `visit` once per reached cell.
    ///
    /// `visit` may modify the cell it is given. Returning `true` expands the
    /// flood to that cell's neighbours; returning `false` makes the cell a
    /// boundary. Returns the number of cells visited.
    pub fn flood_fill<F>(&mut self, start: impl Into<TilePos>, mut visit: F) -> Result<usize>
    where
        F: FnMut(TileCell<'_, W, H>) -> bool,
    {
        let start = start.into();
        let start_index = Self::index_of(start)?;

        let mut queued = vec![false; W * H];
        let mut queue = VecDeque::new();
        queued[start_index] = true;
        queue.push_back(start);

        let mut visited = 0;
        while let Some(pos) = queue.pop_front() {
            visited += 1;
            if !visit(TileCell::new_unchecked(self, pos)) {
                continue;
            }
            for next in pos.wrapping_neighbors(W, H) {
                let index = next.y * W + next.x;
                if !queued[index] {
                    queued[index] = true;
                    queue.push_back(next);
                }
            }
        }

        tracing::trace!(visited, "flood from ({}, {})", start.x, start.y);
        Ok(visited)
    }
}
