// ABOUTME: Integration tests for environment-based mapper configuration
// ABOUTME: Defaults, parsing of each SQLMAPPER_* variable, and validation errors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use serial_test::serial;
use sqlmapper::config::MapperConfig;
use sqlmapper::constants::env_config;
use sqlmapper::errors::ErrorCode;

fn clear_env() {
    for name in env_config::ALL {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_missing_variables_take_defaults() {
    clear_env();
    assert_eq!(MapperConfig::from_env().unwrap(), MapperConfig::default());
}

#[test]
#[serial]
fn test_every_variable_is_read() {
    clear_env();
    env::set_var(env_config::INLIST_STRING_SPLIT_COUNT, "10");
    env::set_var(env_config::INLIST_TVP_COUNT, "200");
    env::set_var(env_config::PAD_LIST_EXPANSIONS, "yes");
    env::set_var(env_config::APPLY_NULL_VALUES, "1");
    env::set_var(env_config::INCREMENTAL_PSEUDO_POSITIONAL_NAMES, "TRUE");
    env::set_var(env_config::COMMAND_TIMEOUT_SECS, "45");
    env::set_var(env_config::FETCH_SIZE, "131072");

    let config = MapperConfig::from_env().unwrap();
    clear_env();

    assert_eq!(
        config,
        MapperConfig {
            inlist_string_split_count: 10,
            inlist_tvp_count: 200,
            pad_list_expansions: true,
            apply_null_values: true,
            use_incremental_pseudo_positional_parameter_names: true,
            command_timeout_secs: Some(45),
            fetch_size: 131_072,
        }
    );
}

#[test]
#[serial]
fn test_malformed_value_names_the_variable() {
    clear_env();
    env::set_var(env_config::INLIST_STRING_SPLIT_COUNT, "lots");
    let err = MapperConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains(env_config::INLIST_STRING_SPLIT_COUNT));
}

#[test]
#[serial]
fn test_out_of_range_threshold_is_rejected() {
    clear_env();
    env::set_var(env_config::INLIST_TVP_COUNT, "-7");
    let err = MapperConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains(env_config::INLIST_TVP_COUNT));
}

#[test]
#[serial]
fn test_blank_values_fall_back_to_defaults() {
    clear_env();
    env::set_var(env_config::FETCH_SIZE, "  ");
    env::set_var(env_config::PAD_LIST_EXPANSIONS, "");
    let config = MapperConfig::from_env().unwrap();
    clear_env();
    assert_eq!(config, MapperConfig::default());
}

#[test]
fn test_validate_accepts_disabled_and_zero() {
    let config = MapperConfig {
        inlist_string_split_count: 0,
        inlist_tvp_count: -1,
        fetch_size: 0,
        ..MapperConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_unicode_value_is_rejected() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    clear_env();
    env::set_var(
        env_config::FETCH_SIZE,
        OsString::from_vec(vec![b'1', 0xff, b'2']),
    );
    let err = MapperConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains(env_config::FETCH_SIZE));
}
