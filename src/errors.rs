// ABOUTME: Unified error handling re-exported from sqlmapper-core
// ABOUTME: Keeps crate::errors paths stable for library and binary code
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub use sqlmapper_core::errors::{
    AppError, AppResult, ErrorCode, ProviderError, ProviderErrorCode,
};
