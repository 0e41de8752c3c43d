//! The filter engine: applies a [`FilterConfig`] to a [`TileGrid`].
//!
//! The entry points are [`apply_filter_config`] and [`filter_encoded`].
//! Everything below them is an internal helper.

use std::collections::HashSet;

use tilegrid_core::{PatternMap, TileGrid};

use crate::{ApplyMode, FilterConfig, FilterError, FilterSet, UNTIL_STABLE_MAX_PASSES};

// ─── Public entry points ─────────────────────────────────────────────────────

/// Apply all enabled filter sets in `config` to `grid`, in order.
///
/// Every enabled set is turned into a [`PatternMap`] before the grid is
/// touched, so an invalid rule leaves the grid unchanged. Returns `true` if
/// any window was replaced.
pub fn apply_filter_config<const W: usize, const H: usize>(
    grid: &mut TileGrid<W, H>,
    config: &FilterConfig,
) -> Result<bool, FilterError> {
    let prepared = config
        .filter_sets
        .iter()
        .filter(|set| !set.disabled)
        .map(|set| set.to_pattern_map().map(|map| (set, map)))
        .collect::<Result<Vec<_>, FilterError>>()?;

    let mut replaced = false;
    for (set, map) in &prepared {
        replaced |= apply_filter_set(grid, set, map);
    }
    Ok(replaced)
}

/// Decode `data`, filter the grid and re-encode it.
///
/// Returns the new stream (terminator included) and whether anything was
/// replaced.
pub fn filter_encoded<const W: usize, const H: usize>(
    data: &[u8],
    config: &FilterConfig,
) -> Result<(Vec<u8>, bool), FilterError> {
    let mut grid = TileGrid::<W, H>::decode(data)?;
    let replaced = apply_filter_config(&mut grid, config)?;
    Ok((grid.encode()?, replaced))
}

/// Check that every filter set in `config` can be built.
///
/// Disabled sets are checked too, so that enabling one later cannot fail.
pub fn validate_filter_config(config: &FilterConfig) -> Result<(), FilterError> {
    let mut ids = HashSet::new();
    for set in &config.filter_sets {
        if !ids.insert(set.id) {
            return Err(FilterError::InvalidConfig(format!(
                "Filter set '{}' reuses id {}",
                set.name, set.id
            )));
        }
        set.to_pattern_map()?;
    }
    Ok(())
}

// ─── FilterSet application ───────────────────────────────────────────────────

/// Apply a single filter set to `grid`.
fn apply_filter_set<const W: usize, const H: usize>(
    grid: &mut TileGrid<W, H>,
    set: &FilterSet,
    map: &PatternMap,
) -> bool {
    match set.apply_mode {
        ApplyMode::Once => {
            let replaced = grid.replace_patterns(map);
            tracing::debug!(set = %set.name, replaced, "applied filter set once");
            replaced
        }
        ApplyMode::UntilStable => {
            let mut replaced = false;
            for pass in 0..UNTIL_STABLE_MAX_PASSES {
                // A replacement can rewrite a window with identical tiles, so
                // stability is judged on the grid contents.
                let snapshot = grid.clone();
                replaced |= grid.replace_patterns(map);
                if *grid == snapshot {
                    tracing::debug!(set = %set.name, passes = pass + 1, "filter set is stable");
                    return replaced;
                }
            }
            tracing::warn!(
                "filter set '{}' did not converge after {} passes",
                set.name,
                UNTIL_STABLE_MAX_PASSES
            );
            replaced
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternRule;
    use tilegrid_core::{GridError, TilePos};

    type Grid = TileGrid<8, 4>;

    fn widen_rule() -> PatternRule {
        PatternRule::new(vec![vec![1, 0]], vec![vec![1, 1]])
    }

    fn config_of(sets: Vec<FilterSet>) -> FilterConfig {
        FilterConfig { filter_sets: sets }
    }

    #[test]
    fn empty_config_changes_nothing() {
        let mut grid = Grid::filled(3);
        let replaced = apply_filter_config(&mut grid, &FilterConfig::default()).unwrap();
        assert!(!replaced);
        assert_eq!(grid, Grid::filled(3));
    }

    #[test]
    fn once_mode_runs_a_single_pass() {
        let mut grid = Grid::filled(0);
        grid.set((0, 0), 1).unwrap();

        let set = FilterSet::new("widen", 2, 1).with_rule(widen_rule());
        let replaced = apply_filter_config(&mut grid, &config_of(vec![set])).unwrap();

        assert!(replaced);
        // In-place scanning lets the run grow across the row in one pass,
        // stopping short of the unscanned last origin column.
        assert_eq!(grid.rows().next().unwrap(), &[1, 1, 1, 1, 1, 1, 1, 0]);
    }

    #[test]
    fn until_stable_repeats_until_no_change() {
        // Shrinking runs of 1 from the right needs one pass per tile.
        let shrink = PatternRule::new(vec![vec![1, 1, 0]], vec![vec![1, 0, 0]]);
        let mut grid = Grid::filled(0);
        grid.write_row(TilePos::new(0, 0), &[1, 1, 1, 1, 0]).unwrap();

        let once = FilterSet::new("shrink", 3, 1).with_rule(shrink.clone());
        let mut single = grid.clone();
        apply_filter_config(&mut single, &config_of(vec![once])).unwrap();
        assert_eq!(single.rows().next().unwrap(), &[1, 1, 1, 0, 0, 0, 0, 0]);

        let stable = FilterSet::new("shrink", 3, 1)
            .with_rule(shrink)
            .with_apply_mode(ApplyMode::UntilStable);
        assert!(apply_filter_config(&mut grid, &config_of(vec![stable])).unwrap());
        assert_eq!(grid.rows().next().unwrap(), &[1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn until_stable_identity_rule_terminates() {
        let mut grid = Grid::filled(2);
        let set = FilterSet::new("identity", 1, 1)
            .with_rule(PatternRule::new(vec![vec![2]], vec![vec![2]]))
            .with_apply_mode(ApplyMode::UntilStable);

        let replaced = apply_filter_config(&mut grid, &config_of(vec![set])).unwrap();
        assert!(replaced, "identity replacements still count as matches");
        assert_eq!(grid, Grid::filled(2));
    }

    #[test]
    fn until_stable_cycle_stops_at_cap() {
        let mut grid = Grid::filled(0);
        let set = FilterSet::new("flip", 1, 1)
            .with_rule(PatternRule::new(vec![vec![0]], vec![vec![1]]))
            .with_rule(PatternRule::new(vec![vec![1]], vec![vec![0]]))
            .with_apply_mode(ApplyMode::UntilStable);

        // Must return rather than loop forever.
        assert!(apply_filter_config(&mut grid, &config_of(vec![set])).unwrap());
    }

    #[test]
    fn disabled_sets_are_skipped() {
        let mut grid = Grid::filled(0);
        grid.set((0, 0), 1).unwrap();
        let mut set = FilterSet::new("widen", 2, 1).with_rule(widen_rule());
        set.disabled = true;

        assert!(!apply_filter_config(&mut grid, &config_of(vec![set])).unwrap());
        assert_eq!(grid.get((1, 0)).unwrap(), 0);
    }

    #[test]
    fn sets_run_in_order() {
        let mut grid = Grid::filled(5);
        let first = FilterSet::new("five_to_six", 1, 1)
            .with_rule(PatternRule::new(vec![vec![5]], vec![vec![6]]));
        let second = FilterSet::new("six_to_seven", 1, 1)
            .with_rule(PatternRule::new(vec![vec![6]], vec![vec![7]]));

        apply_filter_config(&mut grid, &config_of(vec![first, second])).unwrap();
        // The last row and column are never scanned by a 1x1 window.
        assert_eq!(grid.get((0, 0)).unwrap(), 7);
        assert_eq!(grid.get((7, 0)).unwrap(), 5);
        assert_eq!(grid.get((0, 3)).unwrap(), 5);
    }

    #[test]
    fn invalid_rule_leaves_grid_untouched() {
        let mut grid = Grid::filled(5);
        let good = FilterSet::new("good", 1, 1)
            .with_rule(PatternRule::new(vec![vec![5]], vec![vec![6]]));
        let bad = FilterSet::new("bad", 1, 1)
            .with_rule(PatternRule::new(vec![vec![5, 5]], vec![vec![6]]));

        let err = apply_filter_config(&mut grid, &config_of(vec![good, bad])).unwrap_err();
        assert!(matches!(err, FilterError::InvalidRule { rule: 0, .. }));
        assert_eq!(grid, Grid::filled(5));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let set = FilterSet::new("a", 1, 1);
        let mut copy = set.clone();
        copy.name = "b".to_string();

        let err = validate_filter_config(&config_of(vec![set, copy])).unwrap_err();
        assert!(matches!(err, FilterError::InvalidConfig(_)));
    }

    #[test]
    fn validate_checks_disabled_sets() {
        let mut set = FilterSet::new("off", 0, 0);
        set.disabled = true;
        assert!(validate_filter_config(&config_of(vec![set])).is_err());
    }

    #[test]
    fn filter_encoded_round_trips_through_bytes() {
        let mut grid = Grid::filled(0);
        grid.set((0, 0), 1).unwrap();
        let bytes = grid.encode().unwrap();

        let set = FilterSet::new("widen", 2, 1).with_rule(widen_rule());
        let (out, replaced) = filter_encoded::<8, 4>(&bytes, &config_of(vec![set])).unwrap();

        assert!(replaced);
        let filtered = Grid::decode(&out).unwrap();
        assert_eq!(filtered.get((6, 0)).unwrap(), 1);
    }

    #[test]
    fn filter_encoded_reports_decode_errors() {
        let err = filter_encoded::<8, 4>(&[0x01, 0x02], &FilterConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            FilterError::Grid(GridError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn filter_encoded_rejects_unencodable_replacements() {
        let bytes = Grid::filled(0).encode().unwrap();
        let set = FilterSet::new("high", 1, 1)
            .with_rule(PatternRule::new(vec![vec![0]], vec![vec![200]]));

        let err = filter_encoded::<8, 4>(&bytes, &config_of(vec![set])).unwrap_err();
        assert!(matches!(
            err,
            FilterError::Grid(GridError::TileOutOfRange { value: 200, .. })
        ));
    }
}
