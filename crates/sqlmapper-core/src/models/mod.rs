// ABOUTME: Command model shared by the in-list strategies and settings
// ABOUTME: Re-exports commands, parameters, values, and the behavior bitset
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Command text, type, and execution hints
pub mod command;
/// Parameters, declared types, and bound values
pub mod parameter;

pub use command::{Command, CommandBehavior};
pub use parameter::{DbType, DbValue, Parameter, ParameterCollection, ParameterSize};
