//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction or answer validation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f32,
        max: f32,
        actual: f32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("'{value}' is not in the domain of '{field}'")]
    OutOfDomain { field: String, value: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f32, max: f32, actual: f32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an out of domain validation error.
    pub fn out_of_domain(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::OutOfDomain {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Not found errors
    SessionNotFound,
    ProfileNotFound,
    QuestionNotFound,

    // Sequencing / state errors
    SequenceViolation,
    InvalidStateTransition,
    SessionClosed,
    Conflict,

    // Policy configuration defects (fatal)
    ConfigurationGap,

    // Infrastructure errors
    StorageUnavailable,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::ProfileNotFound => "PROFILE_NOT_FOUND",
            ErrorCode::QuestionNotFound => "QUESTION_NOT_FOUND",
            ErrorCode::SequenceViolation => "SEQUENCE_VIOLATION",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::SessionClosed => "SESSION_CLOSED",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::ConfigurationGap => "CONFIGURATION_GAP",
            ErrorCode::StorageUnavailable => "STORAGE_UNAVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a sequencing error for out-of-order answer submission.
    pub fn sequence(expected: u32, actual: u32) -> Self {
        Self::new(
            ErrorCode::SequenceViolation,
            format!("Expected answer sequence {}, got {}", expected, actual),
        )
    }

    /// Creates a storage unavailable error wrapping an adapter failure.
    pub fn storage_unavailable(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageUnavailable, reason)
    }

    /// Creates a fatal configuration gap error.
    ///
    /// Raised when the policy table is missing a template default. This is
    /// a programming/configuration defect, never silently recovered.
    pub fn configuration_gap(template: impl Into<String>) -> Self {
        let template = template.into();
        Self::new(
            ErrorCode::ConfigurationGap,
            format!("No template default available: '{}'", template),
        )
        .with_detail("template", template)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True for errors the interactive path recovers from by re-prompting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ValidationFailed
                | ErrorCode::EmptyField
                | ErrorCode::OutOfRange
                | ErrorCode::InvalidFormat
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::OutOfDomain { .. } => ErrorCode::ValidationFailed,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("user_id");
        assert_eq!(format!("{}", err), "Field 'user_id' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_domain_displays_correctly() {
        let err = ValidationError::out_of_domain("adhd_type", "sometimes");
        assert_eq!(
            format!("{}", err),
            "'sometimes' is not in the domain of 'adhd_type'"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::SessionNotFound, "Session not found");
        assert_eq!(format!("{}", err), "[SESSION_NOT_FOUND] Session not found");
    }

    #[test]
    fn domain_error_sequence_carries_positions() {
        let err = DomainError::sequence(3, 5);
        assert_eq!(err.code, ErrorCode::SequenceViolation);
        assert!(err.message().contains("3"));
        assert!(err.message().contains("5"));
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "answer")
            .with_detail("reason", "unknown option");

        assert_eq!(err.details.get("field"), Some(&"answer".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"unknown option".to_string()));
    }

    #[test]
    fn validation_errors_are_recoverable() {
        let err: DomainError = ValidationError::out_of_domain("answer", "z").into();
        assert!(err.is_recoverable());
        assert!(!DomainError::configuration_gap("base").is_recoverable());
    }

    #[test]
    fn configuration_gap_is_fatal_code() {
        let err = DomainError::configuration_gap("adhd_infj");
        assert_eq!(err.code, ErrorCode::ConfigurationGap);
        assert_eq!(err.details.get("template"), Some(&"adhd_infj".to_string()));
    }
}
