// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Defaults, environment variable names, and SQL type tables for in-list expansion
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Default values restored by a settings reset
pub mod defaults {
    /// Default string-split threshold (disabled)
    pub const INLIST_STRING_SPLIT_COUNT: i32 = -1;
    /// Default table-valued-parameter threshold (disabled)
    pub const INLIST_TVP_COUNT: i32 = -1;
    /// Default fetch size (not forwarded)
    pub const FETCH_SIZE: i64 = -1;
    /// Default command timeout (provider default)
    pub const COMMAND_TIMEOUT_SECS: Option<u32> = None;
    /// Whether list expansions are padded by default
    pub const PAD_LIST_EXPANSIONS: bool = false;
    /// Whether null values are actively applied by default
    pub const APPLY_NULL_VALUES: bool = false;
    /// Whether pseudo-positional names are made incremental by default
    pub const INCREMENTAL_PSEUDO_POSITIONAL_NAMES: bool = false;
}

/// Environment variable names read by `MapperConfig::from_env`
pub mod env_config {
    /// String-split threshold
    pub const INLIST_STRING_SPLIT_COUNT: &str = "SQLMAPPER_INLIST_STRING_SPLIT_COUNT";
    /// Table-valued-parameter threshold
    pub const INLIST_TVP_COUNT: &str = "SQLMAPPER_INLIST_TVP_COUNT";
    /// Pad list expansions flag
    pub const PAD_LIST_EXPANSIONS: &str = "SQLMAPPER_PAD_LIST_EXPANSIONS";
    /// Apply null values flag
    pub const APPLY_NULL_VALUES: &str = "SQLMAPPER_APPLY_NULL_VALUES";
    /// Incremental pseudo-positional parameter names flag
    pub const INCREMENTAL_PSEUDO_POSITIONAL_NAMES: &str =
        "SQLMAPPER_INCREMENTAL_PSEUDO_POSITIONAL_NAMES";
    /// Default command timeout in seconds
    pub const COMMAND_TIMEOUT_SECS: &str = "SQLMAPPER_COMMAND_TIMEOUT_SECS";
    /// Row fetch size hint
    pub const FETCH_SIZE: &str = "SQLMAPPER_FETCH_SIZE";

    /// Every variable, for diagnostics and test cleanup
    pub const ALL: &[&str] = &[
        INLIST_STRING_SPLIT_COUNT,
        INLIST_TVP_COUNT,
        PAD_LIST_EXPANSIONS,
        APPLY_NULL_VALUES,
        INCREMENTAL_PSEUDO_POSITIONAL_NAMES,
        COMMAND_TIMEOUT_SECS,
        FETCH_SIZE,
    ];
}

/// SQL Server column types used when casting `string_split` output
pub mod sql_types {
    /// 8-bit unsigned integer column
    pub const TINYINT: &str = "tinyint";
    /// 16-bit integer column
    pub const SMALLINT: &str = "smallint";
    /// 32-bit integer column
    pub const INT: &str = "int";
    /// 64-bit integer column
    pub const BIGINT: &str = "bigint";
}

/// `string_split` rewrite constants
pub mod string_split {
    /// Delimiter used both to join values and to split them server-side
    pub const DELIMITER: char = ',';
}

/// Built-in table-valued-parameter type registrations
pub mod table_types {
    /// Identifier column shared by every built-in table type
    pub const ID_COLUMN: &str = "Id";
    /// Table type for 8-bit values
    pub const BYTE: &str = "Dapper_Byte";
    /// Table type for 16-bit values
    pub const INT16: &str = "Dapper_Int16";
    /// Table type for 32-bit values
    pub const INT32: &str = "Dapper_Int32";
    /// Table type for 64-bit values
    pub const INT64: &str = "Dapper_Int64";
    /// Table type for 128-bit unique identifiers
    pub const GUID: &str = "Dapper_Guid";
}

/// Provider command behavior names as they appear in provider messages
pub mod behavior_names {
    /// Single result set optimization
    pub const SINGLE_RESULT: &str = "SingleResult";
    /// Single row optimization
    pub const SINGLE_ROW: &str = "SingleRow";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Library service name
    pub const SQLMAPPER: &str = "sqlmapper";
}
