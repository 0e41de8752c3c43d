//! Fixed-size tile grid with a run-length codec
//!
//! This crate provides the grid that sits between raw compressed bytes and
//! the code that edits tiles:
//! - `TileGrid` - A `W` x `H` grid of byte tiles, 64x64 by default
//! - `codec` - The run-length stream format the grid decodes from and encodes to
//! - `TileCell` - A borrowed handle to one cell
//! - `PatternMap` - Exact find/replace patterns for `TileGrid::replace_patterns`
//! - `TileGrid::flood_fill` - Breadth-first flood fill on a torus
//!
//! # Example
//!
//! ```rust
//! use tilegrid_core::{PatternMap, TileGrid, TilePos, TileSize};
//!
//! // 4096 cells of tile 1: sixteen full runs of 256.
//! let stream = [0x81, 0x00].repeat(16);
//! let mut grid: TileGrid = TileGrid::decode(&stream).unwrap();
//! grid.fill_rect(TilePos::new(4, 4), TileSize::new(2, 2), 3).unwrap();
//!
//! let mut patterns = PatternMap::new((2, 2)).unwrap();
//! patterns.insert(vec![3; 4], vec![5; 4]).unwrap();
//! assert!(grid.replace_patterns(&patterns));
//!
//! let bytes = grid.encode().unwrap();
//! assert_eq!(TileGrid::<64, 64>::decode(&bytes).unwrap(), grid);
//! ```
//!
//! Grids are plain values with no interior mutability. Share them across
//! threads the usual way (a `Mutex`, or by moving a clone).

mod cell;
pub mod codec;
mod coord;
mod error;
mod flood;
mod grid;
mod pattern;

pub use cell::TileCell;
pub use codec::{MAX_RUN, MAX_TILE, TERMINATOR};
pub use coord::{TilePos, TileSize};
pub use error::{GridError, Result};
pub use grid::{TileGrid, GRID_HEIGHT, GRID_WIDTH};
pub use pattern::PatternMap;
