//! Adaptation configuration value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;
use crate::domain::profile::{
    ControlPreference, FeedbackFrequency, InformationDensity, NotificationStyle,
    StructurePreference,
};

/// Control balance between the user and the system, as the human share
/// of decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlSplit(Percentage);

impl ControlSplit {
    /// Creates a split from a human-share percentage.
    pub fn new(human_share: Percentage) -> Self {
        Self(human_share)
    }

    /// Maps a stated control preference to its split.
    pub fn from_preference(preference: ControlPreference) -> Self {
        let human = match preference {
            ControlPreference::High => 80,
            ControlPreference::Balanced => 50,
            ControlPreference::Low => 30,
        };
        Self(Percentage::new(human))
    }

    /// Human share of decisions.
    pub fn human_share(&self) -> Percentage {
        self.0
    }

    /// System share of decisions.
    pub fn system_share(&self) -> Percentage {
        self.0.complement()
    }
}

impl std::fmt::Display for ControlSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} human / {} system", self.0, self.0.complement())
    }
}

/// Fully-specified interface configuration.
///
/// Derived on demand from (profile, state); never persisted as
/// independent truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationConfiguration {
    pub feedback_frequency: FeedbackFrequency,
    pub notification_style: NotificationStyle,
    pub control_split: ControlSplit,
    pub information_density: InformationDensity,
    pub structure_level: StructurePreference,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_split_maps_preferences() {
        assert_eq!(
            ControlSplit::from_preference(ControlPreference::High)
                .human_share()
                .value(),
            80
        );
        assert_eq!(
            ControlSplit::from_preference(ControlPreference::Balanced)
                .human_share()
                .value(),
            50
        );
        assert_eq!(
            ControlSplit::from_preference(ControlPreference::Low)
                .human_share()
                .value(),
            30
        );
    }

    #[test]
    fn system_share_complements_human_share() {
        let split = ControlSplit::from_preference(ControlPreference::High);
        assert_eq!(split.system_share().value(), 20);
    }

    #[test]
    fn configuration_serializes_with_storage_vocabulary() {
        let config = AdaptationConfiguration {
            feedback_frequency: FeedbackFrequency::Minimal,
            notification_style: NotificationStyle::Minimal,
            control_split: ControlSplit::from_preference(ControlPreference::Balanced),
            information_density: InformationDensity::Sparse,
            structure_level: StructurePreference::High,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["feedback_frequency"], "minimal");
        assert_eq!(json["information_density"], "sparse");
        assert_eq!(json["control_split"], 50);
    }
}
