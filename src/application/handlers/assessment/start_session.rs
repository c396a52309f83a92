//! StartSession - begins an assessment session for a user.

use std::sync::Arc;

use tracing::info;

use crate::domain::assessment::{AssessmentMode, AssessmentSession, DiscoveryPhase, QuestionView};
use crate::domain::foundation::{Confidence, DomainError, SessionId, Timestamp, UserId};
use crate::domain::profile::{AttributeKind, AttributeValue, NeurotypeProfile};
use crate::ports::{ProfileRepository, SessionRepository};

/// Command to start an assessment session.
///
/// `known_types` carries attribute declarations for known-types mode as
/// (attribute token, value token) pairs.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub user_id: UserId,
    pub mode: AssessmentMode,
    pub known_types: Vec<(String, String)>,
}

/// Result of starting a session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    pub phase: DiscoveryPhase,
    pub next_question: Option<QuestionView>,
}

/// Handler for starting assessment sessions.
pub struct StartSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl StartSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self { sessions, profiles }
    }

    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, DomainError> {
        let now = Timestamp::now();

        // The profile comes into existence on the first assessment
        // interaction.
        let mut profile = match self.profiles.find_by_user(&cmd.user_id).await? {
            Some(profile) => profile,
            None => {
                let profile = NeurotypeProfile::new(cmd.user_id.clone(), now);
                self.profiles.create(&profile).await?;
                profile
            }
        };

        let session = AssessmentSession::new(cmd.user_id.clone(), cmd.mode, now);

        if cmd.mode == AssessmentMode::KnownTypes {
            // Declared types are taken at face value with maximum
            // confidence; validation failures surface before any state
            // is persisted.
            let mut declared = Vec::with_capacity(cmd.known_types.len());
            for (kind_token, value_token) in &cmd.known_types {
                let kind: AttributeKind = kind_token.parse().map_err(DomainError::from)?;
                let value = AttributeValue::parse(kind, value_token).map_err(DomainError::from)?;
                declared.push(value);
            }
            for value in declared {
                profile
                    .set_declared(value, Confidence::MAX, now)
                    .map_err(DomainError::from)?;
            }
            self.profiles.update(&profile).await?;
        }

        self.sessions.save(&session).await?;
        info!(
            user_id = %cmd.user_id,
            session_id = %session.id(),
            mode = %cmd.mode,
            "assessment session started"
        );

        Ok(StartSessionResult {
            session_id: session.id(),
            phase: session.phase(),
            next_question: session.next_question(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryProfileRepository, InMemorySessionRepository};
    use crate::domain::profile::{AdhdType, AttributeStatus};

    fn handler() -> (
        StartSessionHandler,
        Arc<InMemoryProfileRepository>,
        Arc<InMemorySessionRepository>,
    ) {
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new());
        (
            StartSessionHandler::new(sessions.clone(), profiles.clone()),
            profiles,
            sessions,
        )
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn starting_full_discovery_creates_profile_and_session() {
        let (handler, profiles, sessions) = handler();

        let result = handler
            .handle(StartSessionCommand {
                user_id: user(),
                mode: AssessmentMode::FullDiscovery,
                known_types: vec![],
            })
            .await
            .unwrap();

        assert_eq!(result.phase, DiscoveryPhase::Screening);
        assert_eq!(result.next_question.unwrap().question_id, "adhd_1");
        assert!(profiles.exists_for_user(&user()).await.unwrap());
        assert!(sessions.find(result.session_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn known_types_declarations_land_in_profile() {
        let (handler, profiles, _) = handler();

        let result = handler
            .handle(StartSessionCommand {
                user_id: user(),
                mode: AssessmentMode::KnownTypes,
                known_types: vec![
                    ("adhd_type".to_string(), "combined".to_string()),
                    ("mbti_type".to_string(), "INFJ".to_string()),
                ],
            })
            .await
            .unwrap();

        assert_eq!(result.phase, DiscoveryPhase::PreferenceTuning);

        let profile = profiles.find_by_user(&user()).await.unwrap().unwrap();
        let slot = profile.slot(AttributeKind::AdhdType);
        assert_eq!(
            slot.value(),
            Some(AttributeValue::AdhdType(AdhdType::Combined))
        );
        assert_eq!(slot.confidence(), Confidence::MAX);
        assert_eq!(slot.status(), AttributeStatus::Provisional);
    }

    #[tokio::test]
    async fn invalid_known_types_fail_without_touching_the_profile() {
        let (handler, profiles, _) = handler();

        let err = handler
            .handle(StartSessionCommand {
                user_id: user(),
                mode: AssessmentMode::KnownTypes,
                known_types: vec![("adhd_type".to_string(), "sometimes".to_string())],
            })
            .await
            .unwrap_err();

        assert!(err.is_recoverable());
        let profile = profiles.find_by_user(&user()).await.unwrap().unwrap();
        assert_eq!(profile.set_count(), 0);
    }

    #[tokio::test]
    async fn starting_again_reuses_the_existing_profile() {
        let (handler, profiles, _) = handler();
        for _ in 0..2 {
            handler
                .handle(StartSessionCommand {
                    user_id: user(),
                    mode: AssessmentMode::Quick,
                    known_types: vec![],
                })
                .await
                .unwrap();
        }
        assert_eq!(profiles.count().await, 1);
    }
}
