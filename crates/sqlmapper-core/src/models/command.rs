// ABOUTME: Database command model: text, parameters, and execution hints
// ABOUTME: Defines the CommandBehavior bitset negotiated with providers

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::parameter::ParameterCollection;

bitflags! {
    /// Optional execution behaviors requested from a provider
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CommandBehavior: u32 {
        /// Expect exactly one result set
        const SINGLE_RESULT = 0b00_0001;
        /// Return column metadata only
        const SCHEMA_ONLY = 0b00_0010;
        /// Return key column metadata
        const KEY_INFO = 0b00_0100;
        /// Expect at most one row
        const SINGLE_ROW = 0b00_1000;
        /// Stream large columns sequentially
        const SEQUENTIAL_ACCESS = 0b01_0000;
        /// Close the connection with the reader
        const CLOSE_CONNECTION = 0b10_0000;
    }
}

/// A command owned by the caller for the duration of one execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// SQL text
    pub text: String,
    /// Ordered parameters
    pub parameters: ParameterCollection,
    /// Timeout in seconds, `None` for the provider default
    pub timeout_secs: Option<u32>,
    /// Row fetch hint, `None` when not forwarded
    pub fetch_size: Option<i64>,
    /// Requested execution behaviors
    pub behavior: CommandBehavior,
}

impl Command {
    /// Create a text command with no parameters
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the requested behaviors
    #[must_use]
    pub const fn with_behavior(mut self, behavior: CommandBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Set an explicit timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_secs: u32) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

impl Default for CommandBehavior {
    fn default() -> Self {
        Self::empty()
    }
}
