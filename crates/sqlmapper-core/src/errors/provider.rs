// ABOUTME: Error raised by a database provider while executing a command
// ABOUTME: Carries an optional structured code plus the provider's message text

use serde::{Deserialize, Serialize};

/// Structured error category reported by a provider, when it has one
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderErrorCode {
    /// Provider rejected the single-result behavior hint
    SingleResultUnsupported,
    /// Provider rejected the single-row behavior hint
    SingleRowUnsupported,
    /// Any other provider failure
    Other,
}

/// Failure reported by a database provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("provider error: {message}")]
pub struct ProviderError {
    /// Structured category, if the provider exposes one
    pub code: Option<ProviderErrorCode>,
    /// Raw provider message
    pub message: String,
}

impl ProviderError {
    /// Error with message text only
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Error with a structured category
    pub fn with_code(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }
}
