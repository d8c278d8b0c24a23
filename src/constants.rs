// ABOUTME: Application constants re-exported from sqlmapper-core
// ABOUTME: Defaults, environment variable names, and SQL type tables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub use sqlmapper_core::constants::*;
