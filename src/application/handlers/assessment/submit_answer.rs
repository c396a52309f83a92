//! SubmitAnswer - applies one assessment answer and updates the profile.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::assessment::{assess, AssessmentMode, DiscoveryPhase, QuestionView};
use crate::domain::foundation::{
    Confidence, ConfidenceBand, DomainError, ErrorCode, SessionId, Timestamp,
};
use crate::domain::profile::AttributeChange;
use crate::ports::{ProfileRepository, SessionRepository};

/// Command carrying one answer.
///
/// `sequence` is the arrival position the caller believes it holds;
/// submissions out of order are rejected without state change.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub question_id: String,
    pub answer: String,
    pub sequence: u32,
}

/// Result of a consumed answer.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    pub profile_delta: Vec<AttributeChange>,
    pub confidence: Confidence,
    pub band: ConfidenceBand,
    pub phase: DiscoveryPhase,
    pub next_question: Option<QuestionView>,
}

/// Handler for answer submission.
pub struct SubmitAnswerHandler {
    sessions: Arc<dyn SessionRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl SubmitAnswerHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self { sessions, profiles }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswerCommand,
    ) -> Result<SubmitAnswerResult, DomainError> {
        let now = Timestamp::now();

        let mut session = self
            .sessions
            .find(cmd.session_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Unknown session {}", cmd.session_id),
                )
            })?;

        let applied = session.submit(&cmd.question_id, &cmd.answer, cmd.sequence)?;
        let assessment = assess(&session);

        let mut profile = self
            .profiles
            .find_by_user(session.user_id())
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ProfileNotFound,
                    format!("No profile for user {}", session.user_id()),
                )
            })?;

        let mut profile_delta = Vec::new();
        for estimate in &assessment.estimates {
            let change = match session.mode() {
                AssessmentMode::FullDiscovery => {
                    profile.set_assessed(estimate.value, estimate.confidence, now)?
                }
                AssessmentMode::Quick | AssessmentMode::KnownTypes => {
                    profile.set_declared(estimate.value, estimate.confidence, now)?
                }
            };
            if let Some(change) = change {
                profile_delta.push(change);
            }
        }

        self.profiles.update(&profile).await?;
        self.sessions.save(&session).await?;

        debug!(
            session_id = %cmd.session_id,
            question_id = %cmd.question_id,
            overwritten = applied.overwritten,
            "answer applied"
        );
        if !profile_delta.is_empty() {
            info!(
                user_id = %session.user_id(),
                changed = profile_delta.len(),
                band = %assessment.band,
                "profile updated from assessment"
            );
        }

        Ok(SubmitAnswerResult {
            profile_delta,
            confidence: assessment.confidence,
            band: assessment.band,
            phase: session.phase(),
            next_question: session.next_question(),
        })
    }
}
