//! Rule-based interaction state classification.

use serde::{Deserialize, Serialize};

use super::event::InteractionEvent;
use super::window::{WindowLimits, WindowStats};

/// The four mutually exclusive interaction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    /// Sustained single-task engagement without interruption.
    Flow,
    /// Rapid cross-feature or cross-topic exploration.
    Intuitive,
    /// Elevated correction/error rate; the user needs less load.
    Overwhelmed,
    /// Nothing notable; default state.
    Balanced,
}

impl std::fmt::Display for InteractionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flow => write!(f, "flow"),
            Self::Intuitive => write!(f, "intuitive"),
            Self::Overwhelmed => write!(f, "overwhelmed"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

/// Tunable classification thresholds.
///
/// Defaults are calibration placeholders; production values come from
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorThresholds {
    /// Trailing window bounds.
    pub window: WindowLimits,
    /// Correction rate at which the window counts as overwhelmed.
    pub overwhelm_correction_rate: f32,
    /// Absolute correction count that always counts as overwhelmed.
    pub overwhelm_min_corrections: usize,
    /// Summed engagement seconds that qualify as flow.
    pub flow_min_engagement_secs: u64,
    /// Switch rate at which the window counts as intuitive exploration.
    pub intuitive_switch_rate: f32,
}

impl Default for DetectorThresholds {
    fn default() -> Self {
        Self {
            window: WindowLimits::default(),
            overwhelm_correction_rate: 0.3,
            overwhelm_min_corrections: 5,
            flow_min_engagement_secs: 600,
            intuitive_switch_rate: 0.4,
        }
    }
}

impl DetectorThresholds {
    fn is_overwhelmed(&self, stats: &WindowStats) -> bool {
        stats.corrections >= self.overwhelm_min_corrections
            || (stats.len >= self.overwhelm_min_corrections
                && stats.correction_rate() >= self.overwhelm_correction_rate)
    }

    fn is_flow(&self, stats: &WindowStats) -> bool {
        stats.engagement_secs >= self.flow_min_engagement_secs && stats.interruptions == 0
    }

    fn is_intuitive(&self, stats: &WindowStats) -> bool {
        stats.len > 0 && stats.switch_rate() >= self.intuitive_switch_rate
    }
}

/// Classifies the current interaction state from a window snapshot.
///
/// Deterministic for a given window and stateless between calls. When
/// several predicates qualify, priority protects the user from load:
/// overwhelmed > flow > intuitive > balanced.
pub fn classify(window: &[InteractionEvent], thresholds: &DetectorThresholds) -> InteractionState {
    let stats = WindowStats::from_events(window);

    if thresholds.is_overwhelmed(&stats) {
        InteractionState::Overwhelmed
    } else if thresholds.is_flow(&stats) {
        InteractionState::Flow
    } else if thresholds.is_intuitive(&stats) {
        InteractionState::Intuitive
    } else {
        InteractionState::Balanced
    }
}
