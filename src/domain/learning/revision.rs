//! Revision proposals: evidence against the stored profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Confidence;
use crate::domain::profile::{AttributeKind, AttributeValue, NeurotypeProfile};

use super::evidence::{BehavioralEvidence, LearningParams};

/// A proposed attribute replacement backed by behavioral evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedRevision {
    pub kind: AttributeKind,
    pub previous: AttributeValue,
    pub proposed: AttributeValue,
    pub confidence: Confidence,
    pub evidence_summary: String,
}

/// Selects the evidence strong enough to displace stored values.
///
/// A revision is proposed only when the observed value contradicts the
/// stored one and the evidence confidence strictly exceeds the stored
/// confidence plus the replacement margin. The margin keeps the bar
/// strictly above the threshold that produced the original value, so
/// borderline evidence cannot flip an attribute back and forth.
pub fn propose_revisions(
    profile: &NeurotypeProfile,
    evidence: &[BehavioralEvidence],
    params: &LearningParams,
) -> Vec<ProposedRevision> {
    let mut revisions = Vec::new();

    for item in evidence {
        let kind = item.value.kind();
        let slot = profile.slot(kind);
        let Some(stored) = slot.value() else {
            // nothing to contradict; initial values come from assessment
            continue;
        };
        if stored == item.value {
            continue;
        }
        let replacement_threshold = slot.confidence().value() + params.replacement_margin;
        if item.confidence.value() > replacement_threshold {
            revisions.push(ProposedRevision {
                kind,
                previous: stored,
                proposed: item.value,
                confidence: item.confidence,
                evidence_summary: item.summary.clone(),
            });
        }
    }

    revisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::profile::AttentionSpan;

    fn ts() -> Timestamp {
        Timestamp::from_unix_secs(1_704_326_400)
    }

    fn profile_with_attention(span: AttentionSpan, confidence: f32) -> NeurotypeProfile {
        let mut profile = NeurotypeProfile::new(UserId::new("user-1").unwrap(), ts());
        profile
            .set_assessed(
                AttributeValue::AttentionSpan(span),
                Confidence::new(confidence).unwrap(),
                ts(),
            )
            .unwrap();
        profile
    }

    fn attention_evidence(span: AttentionSpan, confidence: f32) -> BehavioralEvidence {
        BehavioralEvidence {
            value: AttributeValue::AttentionSpan(span),
            confidence: Confidence::new(confidence).unwrap(),
            summary: "test evidence".to_string(),
        }
    }

    #[test]
    fn contradicting_strong_evidence_proposes_revision() {
        let profile = profile_with_attention(AttentionSpan::Medium, 0.5);
        let evidence = [attention_evidence(AttentionSpan::Variable, 0.8)];

        let revisions = propose_revisions(&profile, &evidence, &LearningParams::default());
        assert_eq!(revisions.len(), 1);
        assert_eq!(
            revisions[0].previous,
            AttributeValue::AttentionSpan(AttentionSpan::Medium)
        );
        assert_eq!(
            revisions[0].proposed,
            AttributeValue::AttentionSpan(AttentionSpan::Variable)
        );
    }

    #[test]
    fn evidence_below_replacement_threshold_is_ignored() {
        let profile = profile_with_attention(AttentionSpan::Medium, 0.5);
        // above stored confidence but not above stored + margin
        let evidence = [attention_evidence(AttentionSpan::Variable, 0.6)];

        let revisions = propose_revisions(&profile, &evidence, &LearningParams::default());
        assert!(revisions.is_empty());
    }

    #[test]
    fn evidence_at_exact_threshold_is_ignored() {
        let profile = profile_with_attention(AttentionSpan::Medium, 0.5);
        let evidence = [attention_evidence(AttentionSpan::Variable, 0.65)];

        // 0.65 == 0.5 + 0.15: must be strictly above
        let revisions = propose_revisions(&profile, &evidence, &LearningParams::default());
        assert!(revisions.is_empty());
    }

    #[test]
    fn agreeing_evidence_proposes_nothing() {
        let profile = profile_with_attention(AttentionSpan::Variable, 0.5);
        let evidence = [attention_evidence(AttentionSpan::Variable, 0.95)];

        let revisions = propose_revisions(&profile, &evidence, &LearningParams::default());
        assert!(revisions.is_empty());
    }

    #[test]
    fn unset_attributes_are_never_revised() {
        let profile = NeurotypeProfile::new(UserId::new("user-1").unwrap(), ts());
        let evidence = [attention_evidence(AttentionSpan::Variable, 0.95)];

        let revisions = propose_revisions(&profile, &evidence, &LearningParams::default());
        assert!(revisions.is_empty());
    }
}
