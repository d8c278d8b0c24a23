// ABOUTME: Process-wide mapper settings read on every command execution
// ABOUTME: Thresholds, flags, fetch size, allowed behaviors, and the table-type registry
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Global settings
//!
//! Settings live for the whole process. [`initialize`] applies a
//! configuration at startup and [`Settings::reset_to_defaults`] restores every
//! value at once. Scalar values and the table-type registry share one lock,
//! so readers never see a half-applied reset; the fetch size and the allowed
//! behavior set are atomics readable without any lock.

/// Command behavior negotiation with providers
pub mod behaviors;
/// Per-provider command preparation cache
pub mod command_init;
/// Table-valued-parameter type registry
pub mod table_types;

use std::any::TypeId;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use behaviors::{
    rejected_behaviors, BehaviorNegotiation, DEFAULT_ALLOWED_BEHAVIORS, NEGOTIABLE_BEHAVIORS,
};
pub use command_init::{CommandInit, CommandInitCache, ProviderCapabilities};
pub use table_types::{InListTableType, TableTypeEntry, TableTypeRegistry};
pub use crate::inlist::table_valued::{tvp_table_type, tvp_table_type_with};

use crate::config::MapperConfig;
use crate::constants::defaults;
use crate::errors::{AppError, AppResult, ProviderError};
use crate::models::{Command, CommandBehavior};
use behaviors::AllowedBehaviors;

#[derive(Debug, Clone)]
struct SettingsState {
    inlist_string_split_count: i32,
    inlist_tvp_count: i32,
    pad_list_expansions: bool,
    apply_null_values: bool,
    use_incremental_pseudo_positional_parameter_names: bool,
    command_timeout_secs: Option<u32>,
    table_types: TableTypeRegistry,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            inlist_string_split_count: defaults::INLIST_STRING_SPLIT_COUNT,
            inlist_tvp_count: defaults::INLIST_TVP_COUNT,
            pad_list_expansions: defaults::PAD_LIST_EXPANSIONS,
            apply_null_values: defaults::APPLY_NULL_VALUES,
            use_incremental_pseudo_positional_parameter_names:
                defaults::INCREMENTAL_PSEUDO_POSITIONAL_NAMES,
            command_timeout_secs: defaults::COMMAND_TIMEOUT_SECS,
            table_types: TableTypeRegistry::with_builtins(),
        }
    }
}

/// Consistent copy of every setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
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
    /// Behaviors commands may request
    pub allowed_behaviors: CommandBehavior,
    /// Registered table types
    pub table_types: Vec<TableTypeEntry>,
}

/// Process-wide mapper settings
#[derive(Debug)]
pub struct Settings {
    state: RwLock<SettingsState>,
    fetch_size: AtomicI64,
    allowed_behaviors: AllowedBehaviors,
    command_init: CommandInitCache,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_threshold(name: &str, value: i32) -> AppResult<()> {
    if value < -1 {
        return Err(AppError::out_of_range(format!(
            "{name} must be -1 (disabled) or non-negative, got {value}"
        )));
    }
    Ok(())
}

impl Settings {
    /// Settings holding default values
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SettingsState::default()),
            fetch_size: AtomicI64::new(defaults::FETCH_SIZE),
            allowed_behaviors: AllowedBehaviors::new(),
            command_init: CommandInitCache::new(),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SettingsState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("Settings lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SettingsState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("Settings lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Restore every setting to its default value
    pub fn reset_to_defaults(&self) {
        let mut state = self.write_state();
        *state = SettingsState::default();
        self.allowed_behaviors.reset();
        self.store_fetch_size(defaults::FETCH_SIZE);
        drop(state);
        info!("Mapper settings reset to defaults");
    }

    /// Apply a configuration; the allowed behavior set is left untouched
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn apply(&self, config: &MapperConfig) -> AppResult<()> {
        config.validate()?;
        let mut state = self.write_state();
        state.inlist_string_split_count = config.inlist_string_split_count;
        state.inlist_tvp_count = config.inlist_tvp_count;
        state.pad_list_expansions = config.pad_list_expansions;
        state.apply_null_values = config.apply_null_values;
        state.use_incremental_pseudo_positional_parameter_names =
            config.use_incremental_pseudo_positional_parameter_names;
        state.command_timeout_secs = config.command_timeout_secs;
        self.store_fetch_size(config.fetch_size);
        drop(state);
        Ok(())
    }

    /// Copy every setting consistently with respect to resets
    #[must_use]
    pub fn snapshot(&self) -> SettingsSnapshot {
        let state = self.read_state();
        SettingsSnapshot {
            inlist_string_split_count: state.inlist_string_split_count,
            inlist_tvp_count: state.inlist_tvp_count,
            pad_list_expansions: state.pad_list_expansions,
            apply_null_values: state.apply_null_values,
            use_incremental_pseudo_positional_parameter_names: state
                .use_incremental_pseudo_positional_parameter_names,
            command_timeout_secs: state.command_timeout_secs,
            fetch_size: self.fetch_size(),
            allowed_behaviors: self.allowed_behaviors(),
            table_types: state.table_types.entries(),
        }
    }

    /// Minimum element count for `string_split` rewriting, -1 when disabled
    #[must_use]
    pub fn inlist_string_split_count(&self) -> i32 {
        self.read_state().inlist_string_split_count
    }

    /// Set the `string_split` threshold
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is below -1
    pub fn set_inlist_string_split_count(&self, value: i32) -> AppResult<()> {
        validate_threshold("inlist_string_split_count", value)?;
        self.write_state().inlist_string_split_count = value;
        Ok(())
    }

    /// Minimum element count for table-valued parameters, -1 when disabled
    ///
    /// When both thresholds are enabled, `string_split` is attempted first.
    #[must_use]
    pub fn inlist_tvp_count(&self) -> i32 {
        self.read_state().inlist_tvp_count
    }

    /// Set the table-valued-parameter threshold
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is below -1
    pub fn set_inlist_tvp_count(&self, value: i32) -> AppResult<()> {
        validate_threshold("inlist_tvp_count", value)?;
        self.write_state().inlist_tvp_count = value;
        Ok(())
    }

    /// Whether default list expansions are padded with null parameters
    ///
    /// Padding rounds the element count up to a bucket ("next 10" under 150,
    /// "next 50" under 500, "next 100" under 1500) to limit plan fragmentation.
    /// Providers running with null equality enabled may change query meaning.
    #[must_use]
    pub fn pad_list_expansions(&self) -> bool {
        self.read_state().pad_list_expansions
    }

    /// Enable or disable list expansion padding
    pub fn set_pad_list_expansions(&self, value: bool) {
        self.write_state().pad_list_expansions = value;
    }

    /// Whether null values are bound instead of silently skipped
    #[must_use]
    pub fn apply_null_values(&self) -> bool {
        self.read_state().apply_null_values
    }

    /// Enable or disable binding of null values
    pub fn set_apply_null_values(&self, value: bool) {
        self.write_state().apply_null_values = value;
    }

    /// Whether pseudo-positional placeholders get incremental names
    #[must_use]
    pub fn use_incremental_pseudo_positional_parameter_names(&self) -> bool {
        self.read_state()
            .use_incremental_pseudo_positional_parameter_names
    }

    /// Enable or disable incremental pseudo-positional names
    pub fn set_use_incremental_pseudo_positional_parameter_names(&self, value: bool) {
        self.write_state()
            .use_incremental_pseudo_positional_parameter_names = value;
    }

    /// Fallback timeout for commands that do not set one
    #[must_use]
    pub fn command_timeout_secs(&self) -> Option<u32> {
        self.read_state().command_timeout_secs
    }

    /// Set the fallback command timeout
    pub fn set_command_timeout_secs(&self, value: Option<u32>) {
        self.write_state().command_timeout_secs = value;
    }

    /// Row fetch hint forwarded to providers that support it, -1 when disabled
    #[must_use]
    pub fn fetch_size(&self) -> i64 {
        self.fetch_size.load(Ordering::SeqCst)
    }

    /// Set the fetch size; a new value invalidates cached command preparation
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is below -1
    pub fn set_fetch_size(&self, value: i64) -> AppResult<()> {
        if value < -1 {
            return Err(AppError::out_of_range(format!(
                "fetch_size must be -1 (disabled) or non-negative, got {value}"
            )));
        }
        self.store_fetch_size(value);
        Ok(())
    }

    fn store_fetch_size(&self, value: i64) {
        let previous = self.fetch_size.swap(value, Ordering::SeqCst);
        if previous != value {
            self.command_init.clear();
            debug!(previous, value, "Fetch size changed, command init cache cleared");
        }
    }

    /// Behaviors commands may currently request
    #[must_use]
    pub fn allowed_behaviors(&self) -> CommandBehavior {
        self.allowed_behaviors.load()
    }

    /// Mask a requested behavior set with the allowed set
    #[must_use]
    pub fn filter_behavior(&self, requested: CommandBehavior) -> CommandBehavior {
        requested & self.allowed_behaviors()
    }

    /// Whether the single-result optimization is still allowed
    #[must_use]
    pub fn use_single_result_optimization(&self) -> bool {
        self.allowed_behaviors()
            .contains(CommandBehavior::SINGLE_RESULT)
    }

    /// Whether the single-row optimization is still allowed
    #[must_use]
    pub fn use_single_row_optimization(&self) -> bool {
        self.allowed_behaviors().contains(CommandBehavior::SINGLE_ROW)
    }

    /// Offer a provider error to behavior negotiation
    ///
    /// Narrowing happens once per process: after it, further rejections are
    /// `NotApplicable` until [`Settings::reset_to_defaults`].
    pub fn disable_command_behavior_optimizations(
        &self,
        requested: CommandBehavior,
        error: &ProviderError,
    ) -> BehaviorNegotiation {
        self.allowed_behaviors.negotiate(requested, error)
    }

    /// Descriptor registered for element type `T`
    #[must_use]
    pub fn table_type<T: 'static>(&self) -> Option<InListTableType> {
        self.table_type_for(TypeId::of::<T>())
    }

    /// Descriptor registered for an element type id
    #[must_use]
    pub fn table_type_for(&self, element_type: TypeId) -> Option<InListTableType> {
        self.read_state().table_types.get(element_type).cloned()
    }

    /// Register or replace the descriptor for element type `T`
    pub fn register_table_type<T: 'static>(
        &self,
        table_type: InListTableType,
    ) -> Option<InListTableType> {
        self.write_state().table_types.register::<T>(table_type)
    }

    /// Remove the descriptor for element type `T`
    pub fn remove_table_type<T: 'static>(&self) -> Option<InListTableType> {
        self.write_state().table_types.remove::<T>()
    }

    /// Prepare a command for a provider
    ///
    /// Applies the cached per-provider artifact, the fallback timeout, and
    /// masks the requested behaviors with the allowed set.
    pub fn prepare_command(
        &self,
        provider: &str,
        capabilities: ProviderCapabilities,
        command: &mut Command,
    ) -> Arc<CommandInit> {
        let init = self
            .command_init
            .get_or_build(provider, capabilities, self.fetch_size());
        init.apply(command);
        if command.timeout_secs.is_none() {
            command.timeout_secs = self.command_timeout_secs();
        }
        command.behavior = self.filter_behavior(command.behavior);
        init
    }

    /// Cached per-provider command preparation
    #[must_use]
    pub const fn command_init_cache(&self) -> &CommandInitCache {
        &self.command_init
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Process-wide settings instance
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::new)
}

/// Apply a configuration to the process-wide settings at startup
///
/// # Errors
///
/// Returns an error if the configuration fails validation
pub fn initialize(config: &MapperConfig) -> AppResult<&'static Settings> {
    let settings = settings();
    settings.apply(config)?;
    info!(
        inlist_string_split_count = config.inlist_string_split_count,
        inlist_tvp_count = config.inlist_tvp_count,
        fetch_size = config.fetch_size,
        "Mapper settings initialized"
    );
    Ok(settings)
}
