//! Interaction events reported by the outer chat application.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// A single logged interaction signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// Time the user took to respond.
    ResponseLatency { millis: u64 },
    /// The user engaged a feature.
    FeatureUse { feature: String },
    /// The user corrected the system or retracted an action.
    Correction,
    /// Sustained engagement on a single task.
    Engagement { seconds: u64 },
    /// An external interruption broke the interaction.
    Interruption,
    /// The conversation moved to a different topic.
    TopicSwitch,
}

impl EventKind {
    /// Short tag used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ResponseLatency { .. } => "response_latency",
            Self::FeatureUse { .. } => "feature_use",
            Self::Correction => "correction",
            Self::Engagement { .. } => "engagement",
            Self::Interruption => "interruption",
            Self::TopicSwitch => "topic_switch",
        }
    }
}

/// Timestamped interaction event. Append-only once logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub at: Timestamp,
    pub kind: EventKind,
}

impl InteractionEvent {
    pub fn new(at: Timestamp, kind: EventKind) -> Self {
        Self { at, kind }
    }
}
