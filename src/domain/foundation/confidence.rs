//! Confidence score and discrete banding for assessment certainty.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Assessment certainty in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f32);

impl Confidence {
    /// No certainty at all.
    pub const ZERO: Self = Self(0.0);

    /// Full certainty (known-types declarations).
    pub const MAX: Self = Self(1.0);

    /// Creates a confidence, returning error if outside [0, 1].
    pub fn new(value: f32) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("confidence", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Creates a confidence, clamping into [0, 1].
    pub fn clamped(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns the discrete band this score falls in.
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_score(self.0)
    }

    /// Returns the larger of two confidences.
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

/// Discrete tier summarizing assessment certainty.
///
/// Band boundaries are inclusive at the lower bound and exclusive at the
/// upper bound; the top band is closed at 100%.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    /// Below 50% - still building confidence.
    Building,
    /// 50% to below 70%.
    Moderate,
    /// 70% to below 90%.
    Good,
    /// 90% and above.
    High,
}

impl ConfidenceBand {
    /// Maps a raw score to its band.
    pub fn from_score(score: f32) -> Self {
        if score >= 0.90 {
            Self::High
        } else if score >= 0.70 {
            Self::Good
        } else if score >= 0.50 {
            Self::Moderate
        } else {
            Self::Building
        }
    }

    /// Lower bound of the band, inclusive.
    pub fn lower_bound(&self) -> f32 {
        match self {
            Self::Building => 0.0,
            Self::Moderate => 0.50,
            Self::Good => 0.70,
            Self::High => 0.90,
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Building => write!(f, "building"),
            Self::Moderate => write!(f, "moderate"),
            Self::Good => write!(f, "good"),
            Self::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_rejects_out_of_range() {
        assert!(Confidence::new(-0.01).is_err());
        assert!(Confidence::new(1.01).is_err());
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(1.0).is_ok());
    }

    #[test]
    fn confidence_clamped_stays_in_range() {
        assert_eq!(Confidence::clamped(1.5).value(), 1.0);
        assert_eq!(Confidence::clamped(-0.5).value(), 0.0);
    }

    #[test]
    fn band_boundaries_are_inclusive_below_exclusive_above() {
        assert_eq!(ConfidenceBand::from_score(0.0), ConfidenceBand::Building);
        assert_eq!(ConfidenceBand::from_score(0.4999), ConfidenceBand::Building);
        assert_eq!(ConfidenceBand::from_score(0.50), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_score(0.6999), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_score(0.70), ConfidenceBand::Good);
        assert_eq!(ConfidenceBand::from_score(0.8999), ConfidenceBand::Good);
        assert_eq!(ConfidenceBand::from_score(0.90), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_score(1.0), ConfidenceBand::High);
    }

    #[test]
    fn bands_order_by_certainty() {
        assert!(ConfidenceBand::Building < ConfidenceBand::Moderate);
        assert!(ConfidenceBand::Moderate < ConfidenceBand::Good);
        assert!(ConfidenceBand::Good < ConfidenceBand::High);
    }

    #[test]
    fn confidence_max_picks_larger() {
        let a = Confidence::new(0.3).unwrap();
        let b = Confidence::new(0.6).unwrap();
        assert_eq!(a.max(b), b);
        assert_eq!(b.max(a), b);
    }

    #[test]
    fn band_serializes_as_snake_case() {
        let json = serde_json::to_string(&ConfidenceBand::Building).unwrap();
        assert_eq!(json, "\"building\"");
    }
}
