// ABOUTME: Configuration management for process-wide mapper settings
// ABOUTME: Environment-only configuration, validated and applied at startup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration module
//!
//! Nothing is persisted: configuration comes from environment variables and
//! is applied to the global settings through `settings::initialize`.

/// Environment-based mapper configuration
pub mod environment;

pub use environment::MapperConfig;
