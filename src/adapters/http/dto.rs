//! Request/response DTOs for the HTTP surface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::application::handlers::assessment::{
    ConfirmProfileResult, SessionProgress, StartSessionResult, SubmitAnswerResult,
};
use crate::application::handlers::interaction::ConfigurationSnapshot;
use crate::application::handlers::profile::ProfileSummary;
use crate::domain::assessment::{AssessmentMode, DiscoveryPhase, QuestionView};
use crate::domain::detector::{EventKind, InteractionState};
use crate::domain::foundation::{ConfidenceBand, DomainError};
use crate::domain::policy::AdaptationConfiguration;
use crate::domain::profile::{AttributeChange, AttributeStatus};

/// Error payload with the machine-readable code.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        Self {
            code: err.code.to_string(),
            message: err.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionRequest {
    pub user_id: String,
    pub mode: AssessmentMode,
    #[serde(default)]
    pub known_types: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub phase: DiscoveryPhase,
    pub next_question: Option<QuestionView>,
}

impl From<StartSessionResult> for StartSessionResponse {
    fn from(result: StartSessionResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            phase: result.phase,
            next_question: result.next_question,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: String,
    pub answer: String,
    pub sequence: u32,
}

/// One changed attribute, expressed in storage vocabulary.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeChangeDto {
    pub attribute: String,
    pub previous: Option<String>,
    pub current: String,
    pub confidence: f32,
}

impl From<&AttributeChange> for AttributeChangeDto {
    fn from(change: &AttributeChange) -> Self {
        Self {
            attribute: change.kind.as_str().to_string(),
            previous: change.previous.map(|v| v.as_str().to_string()),
            current: change.current.as_str().to_string(),
            confidence: change.confidence.value(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswerResponse {
    pub profile_delta: Vec<AttributeChangeDto>,
    pub confidence: f32,
    pub band: ConfidenceBand,
    pub phase: DiscoveryPhase,
    pub next_question: Option<QuestionView>,
}

impl From<SubmitAnswerResult> for SubmitAnswerResponse {
    fn from(result: SubmitAnswerResult) -> Self {
        Self {
            profile_delta: result.profile_delta.iter().map(Into::into).collect(),
            confidence: result.confidence.value(),
            band: result.band,
            phase: result.phase,
            next_question: result.next_question,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionProgressResponse {
    pub phase: DiscoveryPhase,
    pub questions_answered: usize,
    pub confidence: f32,
    pub band: ConfidenceBand,
    pub next_question: Option<QuestionView>,
}

impl From<SessionProgress> for SessionProgressResponse {
    fn from(progress: SessionProgress) -> Self {
        Self {
            phase: progress.phase,
            questions_answered: progress.questions_answered,
            confidence: progress.confidence.value(),
            band: progress.band,
            next_question: progress.next_question,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmProfileRequest {
    pub confirmed: bool,
    #[serde(default)]
    pub adjustments: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmProfileResponse {
    pub phase: DiscoveryPhase,
    pub confirmed_attributes: usize,
}

impl From<ConfirmProfileResult> for ConfirmProfileResponse {
    fn from(result: ConfirmProfileResult) -> Self {
        Self {
            phase: result.phase,
            confirmed_attributes: result.confirmed_attributes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportEventRequest {
    pub user_id: String,
    pub event: EventKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEventResponse {
    pub state: Option<InteractionState>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationResponse {
    #[serde(flatten)]
    pub configuration: AdaptationConfiguration,
    pub state: InteractionState,
    pub stale: bool,
}

impl From<ConfigurationSnapshot> for ConfigurationResponse {
    fn from(snapshot: ConfigurationSnapshot) -> Self {
        Self {
            configuration: snapshot.configuration,
            state: snapshot.state,
            stale: snapshot.stale,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeDto {
    pub attribute: String,
    pub value: Option<String>,
    pub confidence: f32,
    pub status: AttributeStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub profile_id: String,
    pub template: String,
    pub version: u32,
    pub overall_confidence: f32,
    pub overall_band: ConfidenceBand,
    pub attributes: Vec<AttributeDto>,
}

impl From<ProfileSummary> for ProfileResponse {
    fn from(summary: ProfileSummary) -> Self {
        Self {
            profile_id: summary.profile_id.to_string(),
            template: summary.template,
            version: summary.version,
            overall_confidence: summary.overall_confidence.value(),
            overall_band: summary.overall_band,
            attributes: summary
                .attributes
                .iter()
                .map(|a| AttributeDto {
                    attribute: a.kind.as_str().to_string(),
                    value: a.value.map(|v| v.as_str().to_string()),
                    confidence: a.confidence.value(),
                    status: a.status,
                })
                .collect(),
        }
    }
}
