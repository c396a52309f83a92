//! NeurotypeProfile aggregate root and attribute lifecycle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Confidence, ConfidenceBand, ProfileId, StateMachine, Timestamp, UserId, ValidationError,
};

use super::attributes::{AttributeKind, AttributeValue};

/// Profile version for tracking updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileVersion(u32);

impl ProfileVersion {
    /// Creates the initial version (1).
    pub fn initial() -> Self {
        Self(1)
    }

    /// Creates from value, rejecting zero.
    pub fn from_u32(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::out_of_range(
                "profile_version",
                1.0,
                u32::MAX as f32,
                0.0,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the next version.
    pub fn increment(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the inner value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Default for ProfileVersion {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a profile attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeStatus {
    /// No value has ever been recorded.
    Unset,
    /// Value from quick/known-types declaration or an in-progress discovery.
    Provisional,
    /// Value reached the high confidence band via full discovery, or was
    /// explicitly confirmed by the user.
    Confirmed,
    /// Value replaced by the learning loop; back to provisional banding.
    Revised,
    /// Explicitly deleted by the user.
    Deleted,
}

impl StateMachine for AttributeStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AttributeStatus::*;
        matches!(
            (self, target),
            (Unset, Provisional)
                | (Provisional, Confirmed)
                | (Provisional, Revised)
                | (Confirmed, Revised)
                | (Revised, Confirmed)
                | (Revised, Revised)
                | (Deleted, Provisional)
                | (_, Deleted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AttributeStatus::*;
        match self {
            Unset => vec![Provisional, Deleted],
            Provisional => vec![Confirmed, Revised, Deleted],
            Confirmed => vec![Revised, Deleted],
            Revised => vec![Confirmed, Revised, Deleted],
            Deleted => vec![Provisional, Deleted],
        }
    }
}

/// One attribute slot: at most one current value with one confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSlot {
    value: Option<AttributeValue>,
    confidence: Confidence,
    status: AttributeStatus,
}

impl AttributeSlot {
    /// Creates an empty slot.
    pub fn unset() -> Self {
        Self {
            value: None,
            confidence: Confidence::ZERO,
            status: AttributeStatus::Unset,
        }
    }

    pub fn value(&self) -> Option<AttributeValue> {
        self.value
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn status(&self) -> AttributeStatus {
        self.status
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    fn write(&mut self, value: AttributeValue, confidence: Confidence, status: AttributeStatus) {
        self.value = Some(value);
        self.confidence = confidence;
        self.status = status;
    }
}

impl Default for AttributeSlot {
    fn default() -> Self {
        Self::unset()
    }
}

/// A single observed change to an attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeChange {
    pub kind: AttributeKind,
    pub previous: Option<AttributeValue>,
    pub current: AttributeValue,
    pub confidence: Confidence,
}

/// Read-only view of one attribute slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSnapshot {
    pub kind: AttributeKind,
    pub value: Option<AttributeValue>,
    pub confidence: Confidence,
    pub status: AttributeStatus,
}

/// NeurotypeProfile aggregate root.
///
/// A user-owned set of cognitive and interaction attributes, each with a
/// confidence score and a lifecycle status. Confidence is recomputed on
/// every assessment update, never silently reset; the version only
/// increases; deletion is an explicit user action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeurotypeProfile {
    id: ProfileId,
    user_id: UserId,
    template: String,
    attributes: BTreeMap<AttributeKind, AttributeSlot>,
    version: ProfileVersion,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl NeurotypeProfile {
    /// Creates an empty profile on the base template.
    pub fn new(user_id: UserId, timestamp: Timestamp) -> Self {
        Self::with_template(user_id, "base", timestamp)
    }

    /// Creates an empty profile bound to a named template.
    pub fn with_template(user_id: UserId, template: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            id: ProfileId::new(),
            user_id,
            template: template.into(),
            attributes: BTreeMap::new(),
            version: ProfileVersion::initial(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn version(&self) -> ProfileVersion {
        self.version
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns the slot for a kind, unset if never written.
    pub fn slot(&self, kind: AttributeKind) -> AttributeSlot {
        self.attributes.get(&kind).cloned().unwrap_or_default()
    }

    /// Returns the current value for a kind, if set.
    pub fn value_of(&self, kind: AttributeKind) -> Option<AttributeValue> {
        self.attributes.get(&kind).and_then(|s| s.value())
    }

    /// Returns the number of set attributes.
    pub fn set_count(&self) -> usize {
        self.attributes.values().filter(|s| s.is_set()).count()
    }

    /// Returns a snapshot of every attribute slot, set or not.
    pub fn snapshot(&self) -> Vec<AttributeSnapshot> {
        AttributeKind::all()
            .iter()
            .map(|kind| {
                let slot = self.slot(*kind);
                AttributeSnapshot {
                    kind: *kind,
                    value: slot.value(),
                    confidence: slot.confidence(),
                    status: slot.status(),
                }
            })
            .collect()
    }

    /// Records a scored assessment result (full discovery).
    ///
    /// Promotes the attribute to `Confirmed` when the recomputed
    /// confidence reaches the high band. Returns the change when the
    /// stored value differs from the previous one.
    pub fn set_assessed(
        &mut self,
        value: AttributeValue,
        confidence: Confidence,
        timestamp: Timestamp,
    ) -> Result<Option<AttributeChange>, ValidationError> {
        let promote = confidence.band() == ConfidenceBand::High;
        self.record(value, confidence, promote, timestamp)
    }

    /// Records a declared value (quick assessment or known types).
    ///
    /// Declared values stay `Provisional` regardless of confidence;
    /// confirmation is a separate explicit step.
    pub fn set_declared(
        &mut self,
        value: AttributeValue,
        confidence: Confidence,
        timestamp: Timestamp,
    ) -> Result<Option<AttributeChange>, ValidationError> {
        self.record(value, confidence, false, timestamp)
    }

    fn record(
        &mut self,
        value: AttributeValue,
        confidence: Confidence,
        promote: bool,
        timestamp: Timestamp,
    ) -> Result<Option<AttributeChange>, ValidationError> {
        let kind = value.kind();
        let slot = self.attributes.entry(kind).or_default();
        let previous = slot.value();

        if previous == Some(value) && slot.confidence() == confidence {
            // Identical resubmission: no value change, no confidence change.
            return Ok(None);
        }

        let status = match slot.status() {
            AttributeStatus::Unset | AttributeStatus::Deleted => {
                slot.status().transition_to(AttributeStatus::Provisional)?
            }
            AttributeStatus::Provisional | AttributeStatus::Revised if promote => {
                slot.status().transition_to(AttributeStatus::Confirmed)?
            }
            current => current,
        };
        slot.write(value, confidence, status);

        self.touch(timestamp);
        Ok(if previous == Some(value) {
            None
        } else {
            Some(AttributeChange {
                kind,
                previous,
                current: value,
                confidence,
            })
        })
    }

    /// Applies a learning loop revision: the value is replaced and the
    /// attribute returns to provisional confidence banding.
    pub fn apply_revision(
        &mut self,
        value: AttributeValue,
        confidence: Confidence,
        timestamp: Timestamp,
    ) -> Result<AttributeChange, ValidationError> {
        let kind = value.kind();
        let slot = self.attributes.entry(kind).or_default();
        let previous = slot.value();

        let status = slot.status().transition_to(AttributeStatus::Revised)?;
        slot.write(value, confidence, status);
        self.touch(timestamp);

        Ok(AttributeChange {
            kind,
            previous,
            current: value,
            confidence,
        })
    }

    /// Explicitly confirms a set attribute.
    pub fn confirm_attribute(
        &mut self,
        kind: AttributeKind,
        timestamp: Timestamp,
    ) -> Result<(), ValidationError> {
        let slot = self
            .attributes
            .get_mut(&kind)
            .filter(|s| s.is_set())
            .ok_or_else(|| ValidationError::invalid_format(
                "attribute",
                format!("Cannot confirm unset attribute '{}'", kind),
            ))?;

        let status = slot.status().transition_to(AttributeStatus::Confirmed)?;
        slot.status = status;
        self.touch(timestamp);
        Ok(())
    }

    /// Explicit user deletion of a single attribute value.
    pub fn clear_attribute(
        &mut self,
        kind: AttributeKind,
        timestamp: Timestamp,
    ) -> Result<(), ValidationError> {
        let slot = self.attributes.entry(kind).or_default();
        let status = slot.status().transition_to(AttributeStatus::Deleted)?;
        slot.value = None;
        slot.confidence = Confidence::ZERO;
        slot.status = status;
        self.touch(timestamp);
        Ok(())
    }

    fn touch(&mut self, timestamp: Timestamp) {
        self.version = self.version.increment();
        self.updated_at = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::attributes::{AdhdType, NotificationStyle};

    fn test_user_id() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn ts(secs: u64) -> Timestamp {
        Timestamp::from_unix_secs(1_704_326_400 + secs)
    }

    fn conf(v: f32) -> Confidence {
        Confidence::new(v).unwrap()
    }

    #[test]
    fn new_profile_has_no_set_attributes() {
        let profile = NeurotypeProfile::new(test_user_id(), ts(0));
        assert_eq!(profile.set_count(), 0);
        assert_eq!(profile.version().as_u32(), 1);
        assert_eq!(profile.template(), "base");
        assert_eq!(profile.snapshot().len(), AttributeKind::all().len());
    }

    #[test]
    fn set_assessed_records_value_and_confidence() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        let change = profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::Combined), conf(0.6), ts(1))
            .unwrap()
            .unwrap();

        assert_eq!(change.previous, None);
        assert_eq!(change.current, AttributeValue::AdhdType(AdhdType::Combined));

        let slot = profile.slot(AttributeKind::AdhdType);
        assert_eq!(slot.status(), AttributeStatus::Provisional);
        assert_eq!(slot.confidence(), conf(0.6));
        assert_eq!(profile.version().as_u32(), 2);
    }

    #[test]
    fn set_assessed_promotes_to_confirmed_at_high_band() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::Combined), conf(0.6), ts(1))
            .unwrap();
        profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::Combined), conf(0.92), ts(2))
            .unwrap();

        assert_eq!(
            profile.slot(AttributeKind::AdhdType).status(),
            AttributeStatus::Confirmed
        );
    }

    #[test]
    fn set_declared_never_promotes() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        profile
            .set_declared(AttributeValue::AdhdType(AdhdType::Combined), Confidence::MAX, ts(1))
            .unwrap();

        assert_eq!(
            profile.slot(AttributeKind::AdhdType).status(),
            AttributeStatus::Provisional
        );
        assert_eq!(profile.slot(AttributeKind::AdhdType).confidence(), Confidence::MAX);
    }

    #[test]
    fn identical_resubmission_is_a_no_op() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::Combined), conf(0.6), ts(1))
            .unwrap();
        let version_before = profile.version();

        let change = profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::Combined), conf(0.6), ts(2))
            .unwrap();

        assert!(change.is_none());
        assert_eq!(profile.version(), version_before);
        assert_eq!(profile.slot(AttributeKind::AdhdType).confidence(), conf(0.6));
    }

    #[test]
    fn confidence_is_recomputed_not_reset_when_value_unchanged() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::Combined), conf(0.6), ts(1))
            .unwrap();

        // same value, stronger evidence: no value change reported, but the
        // confidence moves
        let change = profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::Combined), conf(0.8), ts(2))
            .unwrap();
        assert!(change.is_none());
        assert_eq!(profile.slot(AttributeKind::AdhdType).confidence(), conf(0.8));
    }

    #[test]
    fn revision_moves_attribute_to_revised() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::None), conf(0.95), ts(1))
            .unwrap();
        assert_eq!(
            profile.slot(AttributeKind::AdhdType).status(),
            AttributeStatus::Confirmed
        );

        let change = profile
            .apply_revision(AttributeValue::AdhdType(AdhdType::Inattentive), conf(0.7), ts(2))
            .unwrap();

        assert_eq!(change.previous, Some(AttributeValue::AdhdType(AdhdType::None)));
        assert_eq!(
            profile.slot(AttributeKind::AdhdType).status(),
            AttributeStatus::Revised
        );
    }

    #[test]
    fn revised_attribute_can_be_reconfirmed() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::None), conf(0.95), ts(1))
            .unwrap();
        profile
            .apply_revision(AttributeValue::AdhdType(AdhdType::Inattentive), conf(0.7), ts(2))
            .unwrap();

        profile.confirm_attribute(AttributeKind::AdhdType, ts(3)).unwrap();
        assert_eq!(
            profile.slot(AttributeKind::AdhdType).status(),
            AttributeStatus::Confirmed
        );
    }

    #[test]
    fn cannot_confirm_unset_attribute() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        assert!(profile
            .confirm_attribute(AttributeKind::NotificationStyle, ts(1))
            .is_err());
    }

    #[test]
    fn clear_attribute_is_reachable_from_any_state() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        profile
            .set_assessed(
                AttributeValue::NotificationStyle(NotificationStyle::Visual),
                conf(0.95),
                ts(1),
            )
            .unwrap();

        profile
            .clear_attribute(AttributeKind::NotificationStyle, ts(2))
            .unwrap();

        let slot = profile.slot(AttributeKind::NotificationStyle);
        assert_eq!(slot.status(), AttributeStatus::Deleted);
        assert_eq!(slot.value(), None);
    }

    #[test]
    fn deleted_attribute_can_be_reassessed() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::Combined), conf(0.6), ts(1))
            .unwrap();
        profile.clear_attribute(AttributeKind::AdhdType, ts(2)).unwrap();

        profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::None), conf(0.5), ts(3))
            .unwrap();
        assert_eq!(
            profile.slot(AttributeKind::AdhdType).status(),
            AttributeStatus::Provisional
        );
    }

    #[test]
    fn version_only_increases() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        let mut last = profile.version();
        for (i, value) in [
            AttributeValue::AdhdType(AdhdType::Combined),
            AttributeValue::AdhdType(AdhdType::Inattentive),
            AttributeValue::NotificationStyle(NotificationStyle::Minimal),
        ]
        .into_iter()
        .enumerate()
        {
            profile.set_assessed(value, conf(0.5), ts(i as u64 + 1)).unwrap();
            assert!(profile.version() > last);
            last = profile.version();
        }
    }

    #[test]
    fn profile_serde_roundtrips() {
        let mut profile = NeurotypeProfile::new(test_user_id(), ts(0));
        profile
            .set_assessed(AttributeValue::AdhdType(AdhdType::Combined), conf(0.6), ts(1))
            .unwrap();

        let json = serde_json::to_string(&profile).unwrap();
        let back: NeurotypeProfile = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id(), profile.id());
        assert_eq!(back.value_of(AttributeKind::AdhdType), Some(AttributeValue::AdhdType(AdhdType::Combined)));
        assert_eq!(back.version(), profile.version());
    }
}
