//! Loading filter configs from TOML and JSON
//!
//! # Example
//!
//! ```rust
//! use tilegrid_filter::{load_config_from_toml_str, ApplyMode};
//!
//! let config = load_config_from_toml_str(r#"
//!     [[filter_sets]]
//!     name = "widen"
//!     pattern_width = 2
//!     pattern_height = 1
//!     apply_mode = "UntilStable"
//!
//!     [[filter_sets.rules]]
//!     find = [[1, 0]]
//!     replace = [[1, 1]]
//! "#).unwrap();
//!
//! assert_eq!(config.filter_sets[0].apply_mode, ApplyMode::UntilStable);
//! ```

use tilegrid_core::GridError;
use thiserror::Error;

use crate::{validate_filter_config, FilterConfig};

/// Error type for filter loading and application failures
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Filter set '{set}' is invalid: {source}")]
    InvalidSet {
        set: String,
        #[source]
        source: GridError,
    },
    #[error("Filter set '{set}' rule {rule} is invalid: {source}")]
    InvalidRule {
        set: String,
        rule: usize,
        #[source]
        source: GridError,
    },
    #[error("Invalid filter config: {0}")]
    InvalidConfig(String),
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

/// Load and validate a FilterConfig from a TOML string
pub fn load_config_from_toml_str(toml: &str) -> Result<FilterConfig, FilterError> {
    let config: FilterConfig = toml::from_str(toml)?;
    validate_filter_config(&config)?;
    Ok(config)
}

/// Load and validate a FilterConfig from a JSON string
pub fn load_config_from_json_str(json: &str) -> Result<FilterConfig, FilterError> {
    let config: FilterConfig = serde_json::from_str(json)?;
    validate_filter_config(&config)?;
    Ok(config)
}

/// Load and validate a FilterConfig from JSON bytes
pub fn load_config_from_bytes(bytes: &[u8]) -> Result<FilterConfig, FilterError> {
    let config: FilterConfig = serde_json::from_slice(bytes)?;
    validate_filter_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApplyMode;

    #[test]
    fn json_config_fills_defaults() {
        let config = load_config_from_json_str(
            r#"{
                "filter_sets": [
                    {
                        "name": "single",
                        "pattern_width": 1,
                        "pattern_height": 1,
                        "rules": [{ "find": [[3]], "replace": [[4]] }]
                    }
                ]
            }"#,
        )
        .unwrap();

        let set = &config.filter_sets[0];
        assert_eq!(set.apply_mode, ApplyMode::Once);
        assert!(!set.disabled);
        assert_eq!(set.rules.len(), 1);
    }

    #[test]
    fn json_bytes_round_trip() {
        let config = load_config_from_json_str(
            r#"{ "filter_sets": [{ "name": "a", "pattern_width": 1, "pattern_height": 1 }] }"#,
        )
        .unwrap();
        let bytes = serde_json::to_vec(&config).unwrap();
        assert_eq!(load_config_from_bytes(&bytes).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = load_config_from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, FilterError::Json(_)));
    }

    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = load_config_from_toml_str("filter_sets = 3").unwrap_err();
        assert!(matches!(err, FilterError::Toml(_)));
    }

    #[test]
    fn tile_values_above_255_are_rejected_by_the_parser() {
        let err = load_config_from_toml_str(
            r#"
            [[filter_sets]]
            name = "big"
            pattern_width = 1
            pattern_height = 1

            [[filter_sets.rules]]
            find = [[300]]
            replace = [[1]]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::Toml(_)));
    }

    #[test]
    fn loading_runs_validation() {
        let err = load_config_from_toml_str(
            r#"
            [[filter_sets]]
            name = "mismatch"
            pattern_width = 2
            pattern_height = 2

            [[filter_sets.rules]]
            find = [[1, 1]]
            replace = [[0, 0], [0, 0]]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::InvalidRule { rule: 0, .. }));
    }
}
