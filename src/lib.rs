// ABOUTME: Main library entry point for sqlmapper in-list parameter expansion
// ABOUTME: Rewrites collection-valued bind parameters and owns process-wide mapper settings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # sqlmapper
//!
//! In-list parameter expansion for SQL commands. Given a command whose text
//! binds a collection through a single placeholder (`where id in @ids`), the
//! handlers in [`inlist`] rewrite the text and parameters so the server can
//! execute it regardless of the collection size.
//!
//! ## Architecture
//!
//! - **inlist**: placeholder locator, `string_split` strategy, handler chain
//! - **settings**: process-wide thresholds, flags, behavior negotiation, table-type registry
//! - **config**: environment-based configuration applied to settings at startup
//! - **logging**: structured logging setup
//!
//! ## Example Usage
//!
//! ```rust
//! use sqlmapper::inlist::{try_string_split, InList, InListOutcome};
//! use sqlmapper::models::Command;
//!
//! let mut command = Command::new("select * from T where id in @ids");
//! let mut ids = InList::from(vec![1_i32, 2, 3, 4]);
//!
//! let outcome = try_string_split(&mut command, "ids", false, &mut ids, 3);
//! assert_eq!(outcome, InListOutcome::Handled);
//! assert!(command
//!     .text
//!     .contains("(select cast([value] as int) from string_split(@ids,','))"));
//! ```

/// Environment configuration applied to settings at startup
pub mod config;

/// Constants re-exported from the core crate
pub mod constants;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// In-list expansion strategies and the handler chain
pub mod inlist;

/// Structured logging setup
pub mod logging;

/// Command model re-exported from the core crate
pub mod models;

/// Process-wide mapper settings
pub mod settings;
