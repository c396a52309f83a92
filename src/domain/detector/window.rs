//! Bounded trailing window over the interaction event log.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::event::{EventKind, InteractionEvent};

/// Window bounds: most recent N events, none older than the age cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowLimits {
    pub max_events: usize,
    pub max_age_secs: u64,
}

impl Default for WindowLimits {
    fn default() -> Self {
        Self {
            max_events: 50,
            max_age_secs: 900,
        }
    }
}

/// Selects the trailing window from a chronological event slice.
///
/// The caller hands over a consistent snapshot; this function never
/// mutates the underlying log.
pub fn trailing_window(
    events: &[InteractionEvent],
    limits: &WindowLimits,
    now: Timestamp,
) -> Vec<InteractionEvent> {
    let cutoff = now.minus_secs(limits.max_age_secs);
    let recent: Vec<InteractionEvent> = events
        .iter()
        .filter(|e| e.at >= cutoff)
        .cloned()
        .collect();
    let skip = recent.len().saturating_sub(limits.max_events);
    recent.into_iter().skip(skip).collect()
}

/// Aggregate statistics over one window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowStats {
    pub len: usize,
    pub corrections: usize,
    pub interruptions: usize,
    pub engagement_secs: u64,
    pub topic_switches: usize,
    pub feature_switches: usize,
    pub latency_samples: usize,
    pub latency_total_millis: u64,
}

impl WindowStats {
    /// Computes statistics for a chronological window.
    pub fn from_events(events: &[InteractionEvent]) -> Self {
        let mut stats = Self {
            len: events.len(),
            ..Self::default()
        };
        let mut last_feature: Option<&str> = None;

        for event in events {
            match &event.kind {
                EventKind::Correction => stats.corrections += 1,
                EventKind::Interruption => stats.interruptions += 1,
                EventKind::Engagement { seconds } => stats.engagement_secs += seconds,
                EventKind::TopicSwitch => stats.topic_switches += 1,
                EventKind::FeatureUse { feature } => {
                    if last_feature.is_some_and(|f| f != feature) {
                        stats.feature_switches += 1;
                    }
                    last_feature = Some(feature);
                }
                EventKind::ResponseLatency { millis } => {
                    stats.latency_samples += 1;
                    stats.latency_total_millis += millis;
                }
            }
        }
        stats
    }

    /// Correction events per window event.
    pub fn correction_rate(&self) -> f32 {
        if self.len == 0 {
            0.0
        } else {
            self.corrections as f32 / self.len as f32
        }
    }

    /// Topic and cross-feature switches per window event.
    pub fn switch_rate(&self) -> f32 {
        if self.len == 0 {
            0.0
        } else {
            (self.topic_switches + self.feature_switches) as f32 / self.len as f32
        }
    }

    /// Mean response latency, if any samples exist.
    pub fn mean_latency_millis(&self) -> Option<u64> {
        if self.latency_samples == 0 {
            None
        } else {
            Some(self.latency_total_millis / self.latency_samples as u64)
        }
    }
}
