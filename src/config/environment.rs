// ABOUTME: Environment configuration for in-list thresholds, flags, timeout, and fetch size
// ABOUTME: Parses SQLMAPPER_* variables with validation and documented defaults
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration

use std::env::{self, VarError};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{defaults, env_config};
use crate::errors::{AppError, AppResult};

/// Mapper configuration loaded from the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Minimum element count for `string_split` rewriting, -1 disables
    pub inlist_string_split_count: i32,
    /// Minimum element count for table-valued parameters, -1 disables
    pub inlist_tvp_count: i32,
    /// Pad default list expansions with nulls
    pub pad_list_expansions: bool,
    /// Bind null values instead of skipping them
    pub apply_null_values: bool,
    /// Rename pseudo-positional placeholders to 1, 2, 3...
    pub use_incremental_pseudo_positional_parameter_names: bool,
    /// Fallback command timeout in seconds
    pub command_timeout_secs: Option<u32>,
    /// Row fetch hint, -1 disables
    pub fetch_size: i64,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            inlist_string_split_count: defaults::INLIST_STRING_SPLIT_COUNT,
            inlist_tvp_count: defaults::INLIST_TVP_COUNT,
            pad_list_expansions: defaults::PAD_LIST_EXPANSIONS,
            apply_null_values: defaults::APPLY_NULL_VALUES,
            use_incremental_pseudo_positional_parameter_names:
                defaults::INCREMENTAL_PSEUDO_POSITIONAL_NAMES,
            command_timeout_secs: defaults::COMMAND_TIMEOUT_SECS,
            fetch_size: defaults::FETCH_SIZE,
        }
    }
}

/// Read and parse a variable; unset or blank means `None`
fn parse_env<T: FromStr>(name: &str) -> AppResult<Option<T>> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::config_invalid(format!("{name} has an unparseable value: {raw:?}"))
        }),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(AppError::config_invalid(format!(
            "{name} is not valid unicode: {raw:?}"
        ))),
    }
}

/// Parse a boolean flag accepting true/false, 1/0, yes/no, on/off
fn parse_env_flag(name: &str) -> AppResult<Option<bool>> {
    let Some(raw) = parse_env::<String>(name)? else {
        return Ok(None);
    };
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(AppError::config_invalid(format!(
            "{name} must be a boolean, got {raw:?}"
        ))),
    }
}

impl MapperConfig {
    /// Load configuration from `SQLMAPPER_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or out of range
    pub fn from_env() -> AppResult<Self> {
        let base = Self::default();
        let config = Self {
            inlist_string_split_count: parse_env(env_config::INLIST_STRING_SPLIT_COUNT)?
                .unwrap_or(base.inlist_string_split_count),
            inlist_tvp_count: parse_env(env_config::INLIST_TVP_COUNT)?
                .unwrap_or(base.inlist_tvp_count),
            pad_list_expansions: parse_env_flag(env_config::PAD_LIST_EXPANSIONS)?
                .unwrap_or(base.pad_list_expansions),
            apply_null_values: parse_env_flag(env_config::APPLY_NULL_VALUES)?
                .unwrap_or(base.apply_null_values),
            use_incremental_pseudo_positional_parameter_names: parse_env_flag(
                env_config::INCREMENTAL_PSEUDO_POSITIONAL_NAMES,
            )?
            .unwrap_or(base.use_incremental_pseudo_positional_parameter_names),
            command_timeout_secs: parse_env(env_config::COMMAND_TIMEOUT_SECS)?
                .or(base.command_timeout_secs),
            fetch_size: parse_env(env_config::FETCH_SIZE)?.unwrap_or(base.fetch_size),
        };
        config.validate()?;
        debug!(?config, "Loaded mapper configuration from environment");
        Ok(config)
    }

    /// Check that thresholds and fetch size are -1 or non-negative
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid value
    pub fn validate(&self) -> AppResult<()> {
        let checks = [
            (
                env_config::INLIST_STRING_SPLIT_COUNT,
                i64::from(self.inlist_string_split_count),
            ),
            (env_config::INLIST_TVP_COUNT, i64::from(self.inlist_tvp_count)),
            (env_config::FETCH_SIZE, self.fetch_size),
        ];
        for (name, value) in checks {
            if value < -1 {
                return Err(AppError::config_invalid(format!(
                    "{name} must be -1 (disabled) or non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_documented_defaults() {
        let config = MapperConfig::default();
        assert_eq!(config.inlist_string_split_count, -1);
        assert_eq!(config.inlist_tvp_count, -1);
        assert_eq!(config.fetch_size, -1);
        assert_eq!(config.command_timeout_secs, None);
        assert!(!config.pad_list_expansions);
        assert!(!config.apply_null_values);
        assert!(!config.use_incremental_pseudo_positional_parameter_names);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_below_minus_one() {
        let config = MapperConfig {
            inlist_tvp_count: -2,
            ..MapperConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.message.contains(env_config::INLIST_TVP_COUNT));
    }
}
