//! Behavioral evidence extraction from the interaction window.

use serde::{Deserialize, Serialize};

use crate::domain::detector::{InteractionEvent, WindowStats};
use crate::domain::foundation::Confidence;
use crate::domain::profile::{
    AttentionSpan, AttributeValue, ComplexityTolerance, ProcessingSpeed,
};

/// Tunable learning loop parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningParams {
    /// How far evidence confidence must exceed the stored confidence
    /// before a revision is allowed. Strictly positive to prevent
    /// oscillation.
    pub replacement_margin: f32,
    /// Window size at which behavioral evidence reaches full weight.
    pub evidence_saturation_events: usize,
    /// Mean latency at or above this reads as slow processing.
    pub slow_latency_millis: u64,
    /// Mean latency at or below this reads as fast processing.
    pub fast_latency_millis: u64,
    /// Summed engagement that reads as a long attention span.
    pub long_engagement_secs: u64,
    /// Switch rate that reads as a variable attention span.
    pub variable_switch_rate: f32,
    /// Correction rate that reads as low complexity tolerance.
    pub overload_correction_rate: f32,
}

impl Default for LearningParams {
    fn default() -> Self {
        Self {
            replacement_margin: 0.15,
            evidence_saturation_events: 30,
            slow_latency_millis: 8_000,
            fast_latency_millis: 1_500,
            long_engagement_secs: 1_200,
            variable_switch_rate: 0.4,
            overload_correction_rate: 0.3,
        }
    }
}

/// One behavioral observation about a profile attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralEvidence {
    pub value: AttributeValue,
    pub confidence: Confidence,
    pub summary: String,
}

/// Derives attribute evidence from a window of interaction events.
///
/// Evidence confidence scales with window coverage: thin windows produce
/// weak evidence that cannot displace an established value.
pub fn gather_evidence(
    window: &[InteractionEvent],
    params: &LearningParams,
) -> Vec<BehavioralEvidence> {
    let stats = WindowStats::from_events(window);
    if stats.len == 0 {
        return Vec::new();
    }

    let coverage =
        (stats.len as f32 / params.evidence_saturation_events as f32).clamp(0.0, 1.0);
    let mut evidence = Vec::new();

    if stats.switch_rate() >= params.variable_switch_rate {
        evidence.push(BehavioralEvidence {
            value: AttributeValue::AttentionSpan(AttentionSpan::Variable),
            confidence: Confidence::clamped(0.85 * coverage),
            summary: format!(
                "Switch rate {:.2} across {} events",
                stats.switch_rate(),
                stats.len
            ),
        });
    } else if stats.engagement_secs >= params.long_engagement_secs {
        evidence.push(BehavioralEvidence {
            value: AttributeValue::AttentionSpan(AttentionSpan::Long),
            confidence: Confidence::clamped(0.9 * coverage),
            summary: format!(
                "Sustained engagement {}s across {} events",
                stats.engagement_secs, stats.len
            ),
        });
    }

    if stats.correction_rate() >= params.overload_correction_rate {
        evidence.push(BehavioralEvidence {
            value: AttributeValue::ComplexityTolerance(ComplexityTolerance::Low),
            confidence: Confidence::clamped(0.9 * coverage),
            summary: format!(
                "Correction rate {:.2} across {} events",
                stats.correction_rate(),
                stats.len
            ),
        });
    }

    if let Some(mean) = stats.mean_latency_millis() {
        let sample_coverage = (stats.latency_samples as f32 * 2.0
            / params.evidence_saturation_events as f32)
            .clamp(0.0, 1.0);
        if mean >= params.slow_latency_millis {
            evidence.push(BehavioralEvidence {
                value: AttributeValue::ProcessingSpeed(ProcessingSpeed::Slow),
                confidence: Confidence::clamped(0.85 * sample_coverage),
                summary: format!(
                    "Mean response latency {}ms over {} samples",
                    mean, stats.latency_samples
                ),
            });
        } else if mean <= params.fast_latency_millis {
            evidence.push(BehavioralEvidence {
                value: AttributeValue::ProcessingSpeed(ProcessingSpeed::Fast),
                confidence: Confidence::clamped(0.85 * sample_coverage),
                summary: format!(
                    "Mean response latency {}ms over {} samples",
                    mean, stats.latency_samples
                ),
            });
        }
    }

    evidence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detector::EventKind;
    use crate::domain::foundation::Timestamp;
    use crate::domain::profile::AttributeKind;

    fn at(secs: u64) -> Timestamp {
        Timestamp::from_unix_secs(1_704_326_400 + secs)
    }

    fn evidence_for(
        evidence: &[BehavioralEvidence],
        kind: AttributeKind,
    ) -> Option<&BehavioralEvidence> {
        evidence.iter().find(|e| e.value.kind() == kind)
    }

    #[test]
    fn empty_window_yields_no_evidence() {
        assert!(gather_evidence(&[], &LearningParams::default()).is_empty());
    }

    #[test]
    fn heavy_switching_reads_as_variable_attention() {
        let events: Vec<InteractionEvent> = (0..30)
            .map(|i| InteractionEvent::new(at(i), EventKind::TopicSwitch))
            .collect();

        let evidence = gather_evidence(&events, &LearningParams::default());
        let attention = evidence_for(&evidence, AttributeKind::AttentionSpan).unwrap();
        assert_eq!(
            attention.value,
            AttributeValue::AttentionSpan(AttentionSpan::Variable)
        );
        // full coverage at the saturation point
        assert!(attention.confidence.value() > 0.8);
        assert!(attention.summary.contains("Switch rate"));
    }

    #[test]
    fn sustained_engagement_reads_as_long_attention() {
        let events: Vec<InteractionEvent> = (0..30)
            .map(|i| InteractionEvent::new(at(i * 60), EventKind::Engagement { seconds: 120 }))
            .collect();

        let evidence = gather_evidence(&events, &LearningParams::default());
        let attention = evidence_for(&evidence, AttributeKind::AttentionSpan).unwrap();
        assert_eq!(
            attention.value,
            AttributeValue::AttentionSpan(AttentionSpan::Long)
        );
    }

    #[test]
    fn correction_storm_reads_as_low_complexity_tolerance() {
        let events: Vec<InteractionEvent> = (0..30)
            .map(|i| InteractionEvent::new(at(i), EventKind::Correction))
            .collect();

        let evidence = gather_evidence(&events, &LearningParams::default());
        assert!(evidence_for(&evidence, AttributeKind::ComplexityTolerance).is_some());
    }

    #[test]
    fn latency_extremes_read_as_processing_speed() {
        let slow: Vec<InteractionEvent> = (0..20)
            .map(|i| InteractionEvent::new(at(i), EventKind::ResponseLatency { millis: 10_000 }))
            .collect();
        let evidence = gather_evidence(&slow, &LearningParams::default());
        assert_eq!(
            evidence_for(&evidence, AttributeKind::ProcessingSpeed).unwrap().value,
            AttributeValue::ProcessingSpeed(ProcessingSpeed::Slow)
        );

        let fast: Vec<InteractionEvent> = (0..20)
            .map(|i| InteractionEvent::new(at(i), EventKind::ResponseLatency { millis: 400 }))
            .collect();
        let evidence = gather_evidence(&fast, &LearningParams::default());
        assert_eq!(
            evidence_for(&evidence, AttributeKind::ProcessingSpeed).unwrap().value,
            AttributeValue::ProcessingSpeed(ProcessingSpeed::Fast)
        );
    }

    #[test]
    fn thin_windows_produce_weak_evidence() {
        let events = vec![
            InteractionEvent::new(at(0), EventKind::Correction),
            InteractionEvent::new(at(1), EventKind::Correction),
        ];
        let evidence = gather_evidence(&events, &LearningParams::default());
        let tolerance = evidence_for(&evidence, AttributeKind::ComplexityTolerance).unwrap();
        assert!(tolerance.confidence.value() < 0.1);
    }
}
