//! In-memory assessment session repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::AssessmentSession;
use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::SessionRepository;

/// In-memory session storage keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, AssessmentSession>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &AssessmentSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn find(
        &self,
        session_id: SessionId,
    ) -> Result<Option<AssessmentSession>, DomainError> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::AssessmentMode;
    use crate::domain::foundation::{Timestamp, UserId};

    #[tokio::test]
    async fn save_then_find_roundtrips() {
        let repo = InMemorySessionRepository::new();
        let session = AssessmentSession::new(
            UserId::new("user-1").unwrap(),
            AssessmentMode::Quick,
            Timestamp::from_unix_secs(1_704_326_400),
        );

        repo.save(&session).await.unwrap();
        let found = repo.find(session.id()).await.unwrap().unwrap();
        assert_eq!(found.id(), session.id());
        assert_eq!(found.mode(), AssessmentMode::Quick);
    }

    #[tokio::test]
    async fn find_unknown_session_returns_none() {
        let repo = InMemorySessionRepository::new();
        assert!(repo.find(SessionId::new()).await.unwrap().is_none());
    }
}
