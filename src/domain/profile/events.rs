//! Domain events for the neurotype profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Confidence, ProfileId, SessionId, Timestamp, UserId};

use super::attributes::{AttributeKind, AttributeValue};

/// Domain events emitted by profile mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProfileEvent {
    /// Profile was created (first assessment interaction or template).
    ProfileCreated {
        user_id: UserId,
        profile_id: ProfileId,
        template: String,
        created_at: Timestamp,
    },

    /// An assessment answer updated one or more attributes.
    AttributesAssessed {
        profile_id: ProfileId,
        session_id: SessionId,
        attributes: Vec<AttributeKind>,
        confidence: Confidence,
        assessed_at: Timestamp,
    },

    /// The learning loop replaced an attribute value.
    AttributeRevised {
        profile_id: ProfileId,
        attribute: AttributeKind,
        previous_value: Option<AttributeValue>,
        new_value: AttributeValue,
        revised_at: Timestamp,
    },

    /// The user confirmed the estimated profile.
    ProfileConfirmed {
        profile_id: ProfileId,
        session_id: SessionId,
        confirmed_at: Timestamp,
    },

    /// Profile deleted by explicit user request.
    ProfileDeleted {
        user_id: UserId,
        profile_id: ProfileId,
        deleted_at: Timestamp,
    },
}
