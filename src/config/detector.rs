//! State detector configuration.

use serde::Deserialize;

use crate::domain::detector::DetectorThresholds;

use super::error::ConfigValidationError;

/// Detector thresholds plus their validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    #[serde(flatten)]
    pub thresholds: DetectorThresholds,
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let t = &self.thresholds;
        if t.window.max_events == 0 {
            return Err(ConfigValidationError::invalid(
                "detector.window.max_events",
                "must be greater than zero",
            ));
        }
        if t.window.max_age_secs == 0 {
            return Err(ConfigValidationError::invalid(
                "detector.window.max_age_secs",
                "must be greater than zero",
            ));
        }
        if !(0.0..=1.0).contains(&t.overwhelm_correction_rate) {
            return Err(ConfigValidationError::invalid(
                "detector.overwhelm_correction_rate",
                "must be within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&t.intuitive_switch_rate) {
            return Err(ConfigValidationError::invalid(
                "detector.intuitive_switch_rate",
                "must be within [0, 1]",
            ));
        }
        if t.overwhelm_min_corrections == 0 {
            return Err(ConfigValidationError::invalid(
                "detector.overwhelm_min_corrections",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
