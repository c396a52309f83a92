//! NextQuestion - query for the next question and session progress.

use std::sync::Arc;

use crate::domain::assessment::{assess, DiscoveryPhase, QuestionView};
use crate::domain::foundation::{
    Confidence, ConfidenceBand, DomainError, ErrorCode, SessionId,
};
use crate::ports::SessionRepository;

/// Query for discovery progress.
#[derive(Debug, Clone)]
pub struct NextQuestionQuery {
    pub session_id: SessionId,
}

/// Session progress view.
#[derive(Debug, Clone)]
pub struct SessionProgress {
    pub phase: DiscoveryPhase,
    pub questions_answered: usize,
    pub confidence: Confidence,
    pub band: ConfidenceBand,
    pub next_question: Option<QuestionView>,
}

/// Handler for the next-question query.
pub struct NextQuestionHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl NextQuestionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, query: NextQuestionQuery) -> Result<SessionProgress, DomainError> {
        let session = self
            .sessions
            .find(query.session_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Unknown session {}", query.session_id),
                )
            })?;

        let assessment = assess(&session);
        Ok(SessionProgress {
            phase: session.phase(),
            questions_answered: session.answered_count(),
            confidence: assessment.confidence,
            band: assessment.band,
            next_question: session.next_question(),
        })
    }
}
