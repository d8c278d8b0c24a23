// ABOUTME: Core types and constants for the sqlmapper command rewriting library
// ABOUTME: Foundation crate with error handling, the command model, and constants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # sqlmapper Core
//!
//! Foundation crate providing the shared types used by the in-list expansion
//! subsystem. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and provider errors fed to behavior negotiation
//! - **constants**: Defaults, environment variable names, and SQL type tables
//! - **models**: `Command`, `Parameter`, and the `CommandBehavior` bitset

/// Unified error handling with standard error codes
pub mod errors;

/// Defaults, environment variable names, and SQL type tables
pub mod constants;

/// Command model (text, parameters, behaviors)
pub mod models;
