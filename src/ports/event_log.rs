//! InteractionEventLog port: append-only per-user event log.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::detector::{InteractionEvent, WindowLimits};
use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// User-configured retention for the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    /// Maximum events kept per user.
    pub max_events: usize,
    /// Maximum event age in seconds.
    pub max_age_secs: u64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_events: 10_000,
            max_age_secs: 30 * 24 * 3600,
        }
    }
}

/// Append-only interaction event log.
///
/// Events are only ever appended; the retention policy is the single
/// mechanism that discards old entries. Reads return a consistent
/// snapshot of the trailing window: no interleaved mutation is observable
/// during one classification pass.
#[async_trait]
pub trait InteractionEventLog: Send + Sync {
    /// Appends one event to the user's log.
    async fn append(&self, user_id: &UserId, event: InteractionEvent)
        -> Result<(), DomainError>;

    /// Returns a snapshot of the trailing window.
    async fn recent(
        &self,
        user_id: &UserId,
        limits: &WindowLimits,
        now: Timestamp,
    ) -> Result<Vec<InteractionEvent>, DomainError>;

    /// Number of retained events for the user.
    async fn len(&self, user_id: &UserId) -> Result<usize, DomainError>;
}
