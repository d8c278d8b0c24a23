// ABOUTME: Command model re-exported from sqlmapper-core
// ABOUTME: Commands, parameters, values, and the behavior bitset
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub use sqlmapper_core::models::*;
