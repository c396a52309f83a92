//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the attune domain.

mod confidence;
mod errors;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use confidence::{Confidence, ConfidenceBand};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ProfileId, SessionId, UserId};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
