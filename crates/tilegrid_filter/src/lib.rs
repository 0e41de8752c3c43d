//! Config-driven pattern filters for tile grids.
//!
//! The primary entry point is [`apply_filter_config`], which applies a
//! [`FilterConfig`] to a [`TileGrid`](tilegrid_core::TileGrid). Configs are
//! usually loaded from TOML or JSON with the functions in [`loader`].
//!
//! This crate holds no grid logic of its own. Matching and replacement are
//! done by [`TileGrid::replace_patterns`](tilegrid_core::TileGrid::replace_patterns).

mod apply;
pub mod loader;
mod types;

pub use apply::{apply_filter_config, filter_encoded, validate_filter_config};
pub use loader::{
    load_config_from_bytes, load_config_from_json_str, load_config_from_toml_str, FilterError,
};
pub use types::{ApplyMode, FilterConfig, FilterSet, PatternRule};

// Re-export tilegrid_core
pub use tilegrid_core;

/// Maximum number of passes in [`ApplyMode::UntilStable`] mode before giving
/// up and returning with the current state.
///
/// A filter set that has not settled by then is assumed to be cycling, e.g.
/// two rules that undo each other. The cap guarantees termination.
pub const UNTIL_STABLE_MAX_PASSES: u32 = 64;
