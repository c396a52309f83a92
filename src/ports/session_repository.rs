//! SessionRepository port for assessment session persistence.

use async_trait::async_trait;

use crate::domain::assessment::AssessmentSession;
use crate::domain::foundation::{DomainError, SessionId};

/// Repository for assessment sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists a session, replacing any stored version.
    async fn save(&self, session: &AssessmentSession) -> Result<(), DomainError>;

    /// Finds a session by id.
    async fn find(&self, session_id: SessionId)
        -> Result<Option<AssessmentSession>, DomainError>;
}
