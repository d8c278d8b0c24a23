// ABOUTME: In-list expansion strategies offered a command in priority order
// ABOUTME: Defines the handler trait, decline reasons, and the handler chain
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! In-list expansion
//!
//! A command executor that finds a collection-valued parameter offers the
//! command to each [`InListHandler`] in turn. A handler either commits (text
//! and parameters rewritten) or declines leaving the command untouched; when
//! every handler declines the executor falls back to its default
//! one-parameter-per-element expansion.

/// Collection handle with one-time materialization
pub mod list;
/// Placeholder locator and rewriter
pub mod placeholder;
/// `string_split` strategy
pub mod string_split;
/// Table-type gate for table-valued parameters
pub mod table_valued;

use std::fmt;

use tracing::debug;

pub use list::{InList, Sequence};
pub use placeholder::{InListPattern, RewriteOutcome};
pub use string_split::{join_values, try_string_split, SplitElement, StringSplitHandler};
pub use table_valued::{tvp_table_type, tvp_table_type_with};

use crate::models::Command;

/// Why a handler did not engage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclineReason {
    /// The strategy's threshold is -1
    Disabled,
    /// Fewer elements than the threshold
    BelowThreshold {
        /// Element count
        count: usize,
        /// Configured threshold
        threshold: usize,
    },
    /// The strategy does not handle this element type
    UnsupportedElementType {
        /// Element type name
        element_type: &'static str,
    },
    /// No genuine bind occurrence in the command text
    PlaceholderNotFound,
    /// Occurrences with different bind tokens
    AmbiguousPlaceholder {
        /// Distinct tokens seen
        tokens: Vec<String>,
    },
    /// The parameter name cannot form a placeholder pattern
    InvalidPattern,
    /// No table type registered for the element type
    TableTypeNotRegistered {
        /// Element type name
        element_type: &'static str,
    },
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("strategy disabled"),
            Self::BelowThreshold { count, threshold } => {
                write!(f, "{count} elements is below the threshold of {threshold}")
            }
            Self::UnsupportedElementType { element_type } => {
                write!(f, "element type {element_type} is not supported")
            }
            Self::PlaceholderNotFound => f.write_str("placeholder not found in command text"),
            Self::AmbiguousPlaceholder { tokens } => {
                write!(f, "placeholder is ambiguous: {}", tokens.join(", "))
            }
            Self::InvalidPattern => f.write_str("parameter name cannot form a placeholder"),
            Self::TableTypeNotRegistered { element_type } => {
                write!(f, "no table type registered for {element_type}")
            }
        }
    }
}

/// Outcome of offering a command to a handler
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InListOutcome {
    /// Command text and parameters were rewritten
    Handled,
    /// Command untouched
    Declined(DeclineReason),
}

impl InListOutcome {
    /// Whether the handler committed
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// A custom in-list expansion strategy
pub trait InListHandler: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Rewrite `command` for the collection bound as `name`, or decline
    ///
    /// A declining handler must leave `command` unmodified. It may
    /// materialize `list` in place.
    fn try_handle(
        &self,
        command: &mut Command,
        name: &str,
        by_position: bool,
        list: &mut InList,
    ) -> InListOutcome;
}

/// Ordered chain of handlers
pub struct InListHandlers {
    handlers: Vec<Box<dyn InListHandler>>,
}

impl fmt::Debug for InListHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|h| h.name()))
            .finish()
    }
}

impl Default for InListHandlers {
    fn default() -> Self {
        Self::standard()
    }
}

impl InListHandlers {
    /// Chain with no handlers
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Chain starting with the `string_split` handler
    ///
    /// Handlers added later (a table-valued-parameter handler, for example)
    /// are tried after it.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty().with_handler(StringSplitHandler)
    }

    /// Append a handler at the lowest priority
    #[must_use]
    pub fn with_handler(mut self, handler: impl InListHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Handler names in priority order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Offer the command to each handler until one commits
    ///
    /// Returns the committing handler's name, or `None` when the caller
    /// should fall back to default expansion.
    pub fn try_handle(
        &self,
        command: &mut Command,
        name: &str,
        by_position: bool,
        list: &mut InList,
    ) -> Option<&'static str> {
        for handler in &self.handlers {
            match handler.try_handle(command, name, by_position, list) {
                InListOutcome::Handled => return Some(handler.name()),
                InListOutcome::Declined(reason) => {
                    debug!(
                        handler = handler.name(),
                        placeholder = name,
                        %reason,
                        "In-list handler declined"
                    );
                }
            }
        }
        None
    }
}
