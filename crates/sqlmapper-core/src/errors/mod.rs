// ABOUTME: Unified error handling with standard error codes for sqlmapper
// ABOUTME: Defines ErrorCode, AppError, and the AppResult alias shared by the workspace
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Unified Error Handling System
//!
//! Genuine failures (malformed configuration, a placeholder name the pattern
//! engine rejects) are reported as [`AppError`]. A strategy that does not
//! engage is not an error and never surfaces here; see the `inlist` module's
//! outcome type for that.

use serde::{Deserialize, Serialize};

/// Errors raised by database providers, consumed by behavior negotiation
pub mod provider;

pub use provider::{ProviderError, ProviderErrorCode};

/// Standard error codes used throughout the library
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input supplied by the caller is invalid
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Numeric value outside its accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Configuration (6000-6999)
    /// Configuration value could not be parsed or failed validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
    /// Placeholder pattern could not be compiled
    #[serde(rename = "PATTERN_ERROR")]
    PatternError = 9004,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::PatternError => "Placeholder pattern could not be built",
        }
    }
}

/// Unified error type for the library
#[derive(Debug, thiserror::Error)]
#[error("{}: {}", .code.description(), .message)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid caller input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside its accepted range
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Invalid configuration value
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Placeholder pattern failure
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PatternError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description_and_message() {
        let err = AppError::config_invalid("SQLMAPPER_FETCH_SIZE must be -1 or non-negative");
        assert_eq!(
            err.to_string(),
            "Configuration is invalid: SQLMAPPER_FETCH_SIZE must be -1 or non-negative"
        );
        assert_eq!(err.code, ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::PatternError).unwrap();
        assert_eq!(json, "\"PATTERN_ERROR\"");
    }

    #[test]
    fn test_json_errors_convert_with_source() {
        let json_err = serde_json::from_str::<ErrorCode>("\"NOT_A_CODE\"").unwrap_err();
        let err = AppError::from(json_err);
        assert_eq!(err.code, ErrorCode::SerializationError);
        assert!(std::error::Error::source(&err).is_some());
    }
}
