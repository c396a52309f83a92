//! Append-only audit records for learning loop revisions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{Confidence, Timestamp, UserId};

use super::attributes::{AttributeKind, AttributeValue};

/// Unique identifier for an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeRecordId(Uuid);

impl ChangeRecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChangeRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChangeRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One auditable attribute change.
///
/// Records are append-only: once written they are never modified or
/// deleted, so the revision history stays inspectable by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeChangeRecord {
    pub id: ChangeRecordId,
    pub user_id: UserId,
    pub attribute: AttributeKind,
    pub previous_value: Option<AttributeValue>,
    pub new_value: AttributeValue,
    pub confidence: Confidence,
    pub evidence_summary: String,
    pub recorded_at: Timestamp,
}

impl AttributeChangeRecord {
    pub fn new(
        user_id: UserId,
        attribute: AttributeKind,
        previous_value: Option<AttributeValue>,
        new_value: AttributeValue,
        confidence: Confidence,
        evidence_summary: impl Into<String>,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            id: ChangeRecordId::new(),
            user_id,
            attribute,
            previous_value,
            new_value,
            confidence,
            evidence_summary: evidence_summary.into(),
            recorded_at,
        }
    }
}
