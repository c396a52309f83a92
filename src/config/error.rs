//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading configuration sources.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors raised by semantic validation of loaded values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("Invalid configuration '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigValidationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
