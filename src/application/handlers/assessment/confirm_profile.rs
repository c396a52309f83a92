//! ConfirmProfile - confirm or adjust the estimated profile.

use std::sync::Arc;

use tracing::info;

use crate::domain::assessment::DiscoveryPhase;
use crate::domain::foundation::{
    Confidence, ConfidenceBand, DomainError, ErrorCode, SessionId, Timestamp,
};
use crate::domain::profile::{AttributeKind, AttributeStatus, AttributeValue};
use crate::ports::{ProfileRepository, SessionRepository};

/// Command to confirm or adjust the estimated profile.
///
/// When not confirming, `adjustments` carries explicit attribute
/// overrides as (attribute token, value token) pairs and the session
/// moves into continuous learning.
#[derive(Debug, Clone)]
pub struct ConfirmProfileCommand {
    pub session_id: SessionId,
    pub confirmed: bool,
    pub adjustments: Vec<(String, String)>,
}

/// Result of confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmProfileResult {
    pub phase: DiscoveryPhase,
    pub confirmed_attributes: usize,
}

/// Handler for profile confirmation.
pub struct ConfirmProfileHandler {
    sessions: Arc<dyn SessionRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ConfirmProfileHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self { sessions, profiles }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmProfileCommand,
    ) -> Result<ConfirmProfileResult, DomainError> {
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

        let mut confirmed_attributes = 0;
        if cmd.confirmed {
            // Explicit confirmation promotes every attribute whose
            // certainty reached the high band; lower-band values stay
            // provisional for continuous refinement.
            for snapshot in profile.snapshot() {
                let promotable = snapshot.value.is_some()
                    && snapshot.confidence.band() == ConfidenceBand::High
                    && snapshot.status != AttributeStatus::Confirmed;
                if promotable {
                    profile.confirm_attribute(snapshot.kind, now)?;
                    confirmed_attributes += 1;
                }
            }
            session.mark_confirmed()?;
        } else {
            let mut overrides = Vec::with_capacity(cmd.adjustments.len());
            for (kind_token, value_token) in &cmd.adjustments {
                let kind: AttributeKind = kind_token.parse().map_err(DomainError::from)?;
                let value = AttributeValue::parse(kind, value_token).map_err(DomainError::from)?;
                overrides.push(value);
            }
            for value in overrides {
                profile.set_declared(value, Confidence::MAX, now)?;
            }
            session.continue_learning()?;
        }

        self.profiles.update(&profile).await?;
        self.sessions.save(&session).await?;
        info!(
            user_id = %session.user_id(),
            confirmed = cmd.confirmed,
            confirmed_attributes,
            "profile confirmation handled"
        );

        Ok(ConfirmProfileResult {
            phase: session.phase(),
            confirmed_attributes,
        })
    }
}
