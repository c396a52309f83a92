//! Learning loop configuration.

use serde::Deserialize;

use crate::domain::learning::LearningParams;

use super::error::ConfigValidationError;

/// Cadence and thresholds for the learning loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Seconds between periodic revision cycles.
    pub cadence_secs: u64,
    /// New events per user that trigger an off-cadence cycle.
    pub min_new_events: usize,
    /// Evidence thresholds.
    #[serde(flatten)]
    pub params: LearningParams,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            cadence_secs: 300,
            min_new_events: 25,
            params: LearningParams::default(),
        }
    }
}

impl LearningConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.cadence_secs == 0 {
            return Err(ConfigValidationError::invalid(
                "learning.cadence_secs",
                "must be greater than zero",
            ));
        }
        if self.min_new_events == 0 {
            return Err(ConfigValidationError::invalid(
                "learning.min_new_events",
                "must be greater than zero",
            ));
        }
        if self.params.replacement_margin <= 0.0 {
            return Err(ConfigValidationError::invalid(
                "learning.replacement_margin",
                "must be strictly positive to prevent oscillation",
            ));
        }
        if self.params.evidence_saturation_events == 0 {
            return Err(ConfigValidationError::invalid(
                "learning.evidence_saturation_events",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_learning_config_is_valid() {
        assert!(LearningConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_margin_is_rejected() {
        let mut config = LearningConfig::default();
        config.params.replacement_margin = 0.0;
        assert!(config.validate().is_err());
    }
}
