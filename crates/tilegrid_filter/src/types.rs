//! Data types for pattern filter configuration.
//!
//! The top-level type is [`FilterConfig`], which holds an ordered list of
//! [`FilterSet`]s. Each set groups rules of one pattern size.

use serde::{Deserialize, Serialize};
use tilegrid_core::{PatternMap, TileSize};
use uuid::Uuid;

use crate::FilterError;

// ─── Config ──────────────────────────────────────────────────────────────────

/// Top-level filter configuration.
///
/// Filter sets run in the order they appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub filter_sets: Vec<FilterSet>,
}

// ─── FilterSet ───────────────────────────────────────────────────────────────

/// A named group of find/replace rules sharing one pattern size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Stable identifier for this filter set. Generated when omitted.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// Width of every pattern in this set, in tiles.
    pub pattern_width: usize,
    /// Height of every pattern in this set, in tiles.
    pub pattern_height: usize,
    #[serde(default)]
    pub rules: Vec<PatternRule>,
    #[serde(default)]
    pub apply_mode: ApplyMode,
    /// When `true`, this set is skipped by [`apply_filter_config`](crate::apply_filter_config).
    #[serde(default)]
    pub disabled: bool,
}

impl FilterSet {
    /// Create an empty, enabled filter set
    pub fn new(name: impl Into<String>, pattern_width: usize, pattern_height: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            pattern_width,
            pattern_height,
            rules: Vec::new(),
            apply_mode: ApplyMode::default(),
            disabled: false,
        }
    }

    pub fn with_rule(mut self, rule: PatternRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_apply_mode(mut self, apply_mode: ApplyMode) -> Self {
        self.apply_mode = apply_mode;
        self
    }

    pub fn pattern_size(&self) -> TileSize {
        TileSize::new(self.pattern_width, self.pattern_height)
    }

    /// Build the [`PatternMap`] for this set.
    ///
    /// Fails if the pattern size is zero or any rule has rows of the wrong shape.
    /// When two rules share a `find` pattern, the later one wins.
    pub fn to_pattern_map(&self) -> Result<PatternMap, FilterError> {
        let mut map = PatternMap::new(self.pattern_size()).map_err(|source| {
            FilterError::InvalidSet {
                set: self.name.clone(),
                source,
            }
        })?;

        for (index, rule) in self.rules.iter().enumerate() {
            map.insert_rows(&rule.find, &rule.replace)
                .map_err(|source| FilterError::InvalidRule {
                    set: self.name.clone(),
                    rule: index,
                    source,
                })?;
        }
        Ok(map)
    }
}

// ─── PatternRule ─────────────────────────────────────────────────────────────

/// One exact find → replace pair, both given as rows of tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub find: Vec<Vec<u8>>,
    pub replace: Vec<Vec<u8>>,
}

impl PatternRule {
    pub fn new(find: Vec<Vec<u8>>, replace: Vec<Vec<u8>>) -> Self {
        Self { find, replace }
    }
}

/// Controls how many times a filter set is applied to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ApplyMode {
    /// One pass over the grid. Default.
    #[default]
    Once,
    /// Repeat passes until a pass leaves the grid unchanged, or until
    /// [`UNTIL_STABLE_MAX_PASSES`](crate::UNTIL_STABLE_MAX_PASSES) is reached.
    UntilStable,
}
