//! Sliding-window pattern search and replace
//!
//! A [`PatternMap`] pairs exact tile patterns with same-size replacements.
//! [`TileGrid::replace_patterns`] slides a window of the map's size over the
//! grid in row-major order and rewrites every window that equals a key.
//!
//! Two behaviours are easy to miss:
//! - Matching is done in place. A window sees tiles already rewritten by an
//!   earlier, overlapping match in the same pass.
//! - Window origins stop one short of the last fitting position: for a
//!   `pw` x `ph` pattern only origins with `x < W - pw` and `y < H - ph` are
//!   tried, so the last column and row of the grid are never covered.

use std::collections::HashMap;

use crate::{GridError, Result, TileGrid, TileSize};

/// Exact find → replace patterns of one fixed size
///
/// Patterns are stored row-major, `width * height` tiles each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMap {
    size: TileSize,
    entries: HashMap<Vec<u8>, Vec<u8>>,
}

impl PatternMap {
    /// Create an empty map for patterns of `size`
    pub fn new(size: impl Into<TileSize>) -> Result<Self> {
        let size = size.into();
        if size.is_empty() {
            return Err(GridError::EmptyPattern);
        }
        Ok(Self {
            size,
            entries: HashMap::new(),
        })
    }

    pub fn size(&self) -> TileSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a row-major pattern pair, returning the replacement it displaced
    pub fn insert(&mut self, find: Vec<u8>, replace: Vec<u8>) -> Result<Option<Vec<u8>>> {
        self.check_len(find.len())?;
        self.check_len(replace.len())?;
        Ok(self.entries.insert(find, replace))
    }

    /// Add a pattern pair given as rows
    pub fn insert_rows<R: AsRef<[u8]>>(
        &mut self,
        find: &[R],
        replace: &[R],
    ) -> Result<Option<Vec<u8>>> {
        let find = self.flatten_rows(find)?;
        let replace = self.flatten_rows(replace)?;
        Ok(self.entries.insert(find, replace))
    }

    /// The replacement registered for an exact row-major pattern
    pub fn get(&self, find: &[u8]) -> Option<&[u8]> {
        self.entries.get(find).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> + '_ {
        self.entries
            .iter()
            .map(|(find, replace)| (find.as_slice(), replace.as_slice()))
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual == self.size.area() {
            Ok(())
        } else {
            Err(GridError::PatternSize {
                expected: self.size,
                actual,
            })
        }
    }

    fn flatten_rows<R: AsRef<[u8]>>(&self, rows: &[R]) -> Result<Vec<u8>> {
        let flat: Vec<u8> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        let uniform = rows.len() == self.size.height
            && rows.iter().all(|r| r.as_ref().len() == self.size.width);
        if !uniform {
            return Err(GridError::PatternSize {
                expected: self.size,
                actual: flat.len(),
            });
        }
        Ok(flat)
    }
}

impl<const W: usize, const H: usize> TileGrid<W, H> {
    /// Rewrite every window matching a key of `patterns`.
    ///
    /// Returns `true` if at least one window was replaced.
    pub fn replace_patterns(&mut self, patterns: &PatternMap) -> bool {
        let TileSize {
            width: pw,
            height: ph,
        } = patterns.size();
        if patterns.is_empty() {
            return false;
        }

        let mut window = Vec::with_capacity(pw * ph);
        let mut replaced = 0usize;

        for y in 0..H.saturating_sub(ph) {
            for x in 0..W.saturating_sub(pw) {
                window.clear();
                for row in y..y + ph {
                    let start = row * W + x;
                    window.extend_from_slice(&self.as_slice()[start..start + pw]);
                }

                let Some(replacement) = patterns.get(&window) else {
                    continue;
                };
                let cells = self.cells_mut();
                for (i, chunk) in replacement.chunks_exact(pw).enumerate() {
                    let start = (y + i) * W + x;
                    cells[start..start + pw].copy_from_slice(chunk);
                }
                replaced += 1;
            }
        }

        if replaced > 0 {
            tracing::trace!(replaced, "pattern pass over {}x{} grid", W, H);
        }
        replaced > 0
    }
}
