//! Deterministic assessment scoring.
//!
//! All group scores are additive over the answered-question set: adding
//! an answer never lowers a score, so the reported confidence band is
//! monotonically non-decreasing while answers accumulate within a phase.
//! Recomputing from scratch after an overwrite therefore agrees with the
//! running value when the overwritten answer is identical.

use crate::domain::foundation::{Confidence, ConfidenceBand};
use crate::domain::profile::{
    AdhdType, AttentionSpan, AttributeValue, CognitiveStyle, ControlPreference,
    InformationDensity, MbtiType,
};

use super::question::{
    find_question, group_size, AnswerEffect, MbtiDimension, QuestionGroup, QUICK_BANK,
};
use super::session::{AssessmentMode, AssessmentSession, DiscoveryPhase};

/// Confidence assigned to quick-assessment estimates.
const QUICK_CONFIDENCE: f32 = 0.5;

/// One estimated attribute with its confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEstimate {
    pub value: AttributeValue,
    pub confidence: Confidence,
}

/// Scored view of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAssessment {
    pub estimates: Vec<AttributeEstimate>,
    pub confidence: Confidence,
    pub band: ConfidenceBand,
}

/// Scores a session from its recorded answers.
pub fn assess(session: &AssessmentSession) -> SessionAssessment {
    match session.mode() {
        AssessmentMode::Quick => assess_quick(session),
        AssessmentMode::KnownTypes | AssessmentMode::FullDiscovery => assess_full(session),
    }
}

fn assess_quick(session: &AssessmentSession) -> SessionAssessment {
    let confidence = Confidence::clamped(QUICK_CONFIDENCE);
    let mut estimates = Vec::new();

    for (position, question) in QUICK_BANK.iter().enumerate() {
        let Some(record) = session.answer_for(question.id) else {
            continue;
        };
        for value in quick_estimates(position, record.option_index) {
            estimates.push(AttributeEstimate { value, confidence });
        }
    }

    let answered = session.answered_count() as f32;
    let session_confidence =
        Confidence::clamped(QUICK_CONFIDENCE * answered / QUICK_BANK.len() as f32);
    SessionAssessment {
        estimates,
        confidence: session_confidence,
        band: session_confidence.band(),
    }
}

/// Maps one quick answer to attribute values.
///
/// Grounding: the quick optimizer pairs attention style with an ADHD
/// estimate, interaction preference with a control split, and information
/// style with a cognitive style and representative MBTI type.
fn quick_estimates(position: usize, option_index: usize) -> Vec<AttributeValue> {
    match (position, option_index) {
        (0, 0) => vec![
            AttributeValue::AdhdType(AdhdType::Inattentive),
            AttributeValue::AttentionSpan(AttentionSpan::Short),
        ],
        (0, 1) => vec![
            AttributeValue::AdhdType(AdhdType::Combined),
            AttributeValue::AttentionSpan(AttentionSpan::Variable),
        ],
        (0, 2) => vec![
            AttributeValue::AdhdType(AdhdType::None),
            AttributeValue::AttentionSpan(AttentionSpan::Long),
        ],
        (0, _) => vec![
            AttributeValue::AdhdType(AdhdType::None),
            AttributeValue::AttentionSpan(AttentionSpan::Variable),
        ],
        (1, 0) => vec![AttributeValue::ControlPreference(ControlPreference::High)],
        (1, 1) => vec![AttributeValue::ControlPreference(ControlPreference::Balanced)],
        (1, _) => vec![AttributeValue::ControlPreference(ControlPreference::Low)],
        (2, 0) => vec![
            AttributeValue::CognitiveStyle(CognitiveStyle::Analytical),
            AttributeValue::MbtiType(MbtiType::Istj),
            AttributeValue::InformationDensity(InformationDensity::Dense),
        ],
        (2, 1) => vec![
            AttributeValue::CognitiveStyle(CognitiveStyle::Intuitive),
            AttributeValue::MbtiType(MbtiType::Intp),
            AttributeValue::InformationDensity(InformationDensity::Medium),
        ],
        (2, 2) => vec![
            AttributeValue::CognitiveStyle(CognitiveStyle::Creative),
            AttributeValue::MbtiType(MbtiType::Enfp),
            AttributeValue::InformationDensity(InformationDensity::Medium),
        ],
        (2, _) => vec![
            AttributeValue::CognitiveStyle(CognitiveStyle::Holistic),
            AttributeValue::MbtiType(MbtiType::Infj),
            AttributeValue::InformationDensity(InformationDensity::Medium),
        ],
        _ => Vec::new(),
    }
}

#[derive(Debug, Default)]
struct GroupScores {
    adhd_sum: f32,
    adhd_certainty: f32,
    adhd_answered: usize,
    mbti_sums: [f32; 4],
    mbti_answered: usize,
    style_votes: Vec<CognitiveStyle>,
    attention: Option<AttentionSpan>,
    cognitive_answered: usize,
    preference_values: Vec<AttributeValue>,
    preference_answered: usize,
}

fn collect(session: &AssessmentSession) -> GroupScores {
    let mut scores = GroupScores::default();

    for record in session.answers() {
        let Some(question) = find_question(&record.question_id) else {
            continue;
        };
        let effect = question.options[record.option_index].effect;
        match question.group {
            QuestionGroup::AdhdScreening => {
                if let AnswerEffect::AdhdIndicator(weight) = effect {
                    scores.adhd_sum += weight;
                    scores.adhd_certainty += 0.5 + (weight - 0.5).abs();
                    scores.adhd_answered += 1;
                }
            }
            QuestionGroup::MbtiAssessment => {
                if let AnswerEffect::MbtiLean { dimension, weight } = effect {
                    scores.mbti_sums[dimension_index(dimension)] += weight;
                    scores.mbti_answered += 1;
                }
            }
            QuestionGroup::CognitiveStyle => {
                match effect {
                    AnswerEffect::StylePreference(style) => scores.style_votes.push(style),
                    AnswerEffect::AttentionObservation(span) => scores.attention = Some(span),
                    _ => {}
                }
                scores.cognitive_answered += 1;
            }
            QuestionGroup::PreferenceTuning => {
                let value = match effect {
                    AnswerEffect::FeedbackPreference(v) => {
                        Some(AttributeValue::FeedbackFrequency(v))
                    }
                    AnswerEffect::ControlPreference(v) => {
                        Some(AttributeValue::ControlPreference(v))
                    }
                    AnswerEffect::StimulationPreference(v) => {
                        Some(AttributeValue::StimulationLevel(v))
                    }
                    _ => None,
                };
                if let Some(value) = value {
                    scores.preference_values.push(value);
                    scores.preference_answered += 1;
                }
            }
        }
    }

    scores
}

fn dimension_index(dimension: MbtiDimension) -> usize {
    match dimension {
        MbtiDimension::EnergyOrientation => 0,
        MbtiDimension::Perception => 1,
        MbtiDimension::Judgment => 2,
        MbtiDimension::Lifestyle => 3,
    }
}

/// Tie letters reproduce the historical default of INFJ for an empty
/// margin on every dimension.
fn dimension_letter(dimension: MbtiDimension, sum: f32) -> char {
    let (positive, negative) = dimension.letters();
    if sum > 0.0 {
        positive
    } else if sum < 0.0 {
        negative
    } else {
        match dimension {
            MbtiDimension::EnergyOrientation => 'I',
            MbtiDimension::Perception => 'N',
            MbtiDimension::Judgment => 'F',
            MbtiDimension::Lifestyle => 'J',
        }
    }
}

fn majority_style(votes: &[CognitiveStyle]) -> Option<CognitiveStyle> {
    // fixed candidate order makes ties deterministic
    const CANDIDATES: [CognitiveStyle; 4] = [
        CognitiveStyle::Analytical,
        CognitiveStyle::Intuitive,
        CognitiveStyle::Creative,
        CognitiveStyle::Holistic,
    ];
    if votes.is_empty() {
        return None;
    }
    let mut best: Option<(CognitiveStyle, usize)> = None;
    for candidate in CANDIDATES {
        let count = votes.iter().filter(|v| **v == candidate).count();
        if count > 0 && best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((candidate, count));
        }
    }
    best.map(|(style, _)| style)
}

fn assess_full(session: &AssessmentSession) -> SessionAssessment {
    let scores = collect(session);

    let adhd_total = group_size(QuestionGroup::AdhdScreening) as f32;
    let mbti_total = group_size(QuestionGroup::MbtiAssessment) as f32;
    let cognitive_total = group_size(QuestionGroup::CognitiveStyle) as f32;
    let preference_total = group_size(QuestionGroup::PreferenceTuning) as f32;

    let adhd_confidence = Confidence::clamped(scores.adhd_certainty / adhd_total);
    let mbti_confidence = Confidence::clamped(scores.mbti_answered as f32 / mbti_total);
    let cognitive_confidence =
        Confidence::clamped(scores.cognitive_answered as f32 / cognitive_total);
    let preference_confidence =
        Confidence::clamped(scores.preference_answered as f32 / preference_total);

    let mut estimates = Vec::new();

    if scores.adhd_answered > 0 {
        let mean = scores.adhd_sum / scores.adhd_answered as f32;
        let adhd_type = if mean >= 0.7 {
            AdhdType::Combined
        } else if mean >= 0.4 {
            AdhdType::Inattentive
        } else {
            AdhdType::None
        };
        estimates.push(AttributeEstimate {
            value: AttributeValue::AdhdType(adhd_type),
            confidence: adhd_confidence,
        });
    }

    if scores.mbti_answered > 0 {
        let letters = [
            dimension_letter(MbtiDimension::EnergyOrientation, scores.mbti_sums[0]),
            dimension_letter(MbtiDimension::Perception, scores.mbti_sums[1]),
            dimension_letter(MbtiDimension::Judgment, scores.mbti_sums[2]),
            dimension_letter(MbtiDimension::Lifestyle, scores.mbti_sums[3]),
        ];
        if let Ok(mbti) = MbtiType::from_letters(letters) {
            estimates.push(AttributeEstimate {
                value: AttributeValue::MbtiType(mbti),
                confidence: mbti_confidence,
            });
        }
    }

    if let Some(style) = majority_style(&scores.style_votes) {
        estimates.push(AttributeEstimate {
            value: AttributeValue::CognitiveStyle(style),
            confidence: cognitive_confidence,
        });
    }
    if let Some(span) = scores.attention {
        estimates.push(AttributeEstimate {
            value: AttributeValue::AttentionSpan(span),
            confidence: cognitive_confidence,
        });
    }

    for value in &scores.preference_values {
        estimates.push(AttributeEstimate {
            value: *value,
            confidence: preference_confidence,
        });
    }

    let confidence = match session.phase() {
        DiscoveryPhase::Screening => Confidence::clamped(
            (adhd_total * adhd_confidence.value()
                + mbti_total * mbti_confidence.value()
                + cognitive_total * cognitive_confidence.value())
                / (adhd_total + mbti_total + cognitive_total),
        ),
        DiscoveryPhase::PreferenceTuning => preference_confidence,
        DiscoveryPhase::Continuous | DiscoveryPhase::Confirmed => Confidence::clamped(
            (adhd_total * adhd_confidence.value()
                + mbti_total * mbti_confidence.value()
                + cognitive_total * cognitive_confidence.value()
                + preference_total * preference_confidence.value())
                / (adhd_total + mbti_total + cognitive_total + preference_total),
        ),
    };

    SessionAssessment {
        estimates,
        confidence,
        band: confidence.band(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::foundation::Timestamp;
    use crate::domain::profile::AttributeKind;

    fn session(mode: AssessmentMode) -> AssessmentSession {
        AssessmentSession::new(
            UserId::new("user-1").unwrap(),
            mode,
            Timestamp::from_unix_secs(1_704_326_400),
        )
    }

    fn estimate_for(assessment: &SessionAssessment, kind: AttributeKind) -> Option<AttributeValue> {
        assessment
            .estimates
            .iter()
            .find(|e| e.value.kind() == kind)
            .map(|e| e.value)
    }

    #[test]
    fn quick_one_b_two_b_three_d_yields_usable_profile() {
        let mut s = session(AssessmentMode::Quick);
        s.submit("quick_attention", "1b", 0).unwrap();
        s.submit("quick_interaction", "2b", 1).unwrap();
        s.submit("quick_information", "3d", 2).unwrap();

        let assessment = assess(&s);
        assert_eq!(
            estimate_for(&assessment, AttributeKind::AdhdType),
            Some(AttributeValue::AdhdType(AdhdType::Combined))
        );
        assert_eq!(
            estimate_for(&assessment, AttributeKind::MbtiType),
            Some(AttributeValue::MbtiType(MbtiType::Infj))
        );
        assert_eq!(
            estimate_for(&assessment, AttributeKind::CognitiveStyle),
            Some(AttributeValue::CognitiveStyle(CognitiveStyle::Holistic))
        );
        assert!(assessment.band >= ConfidenceBand::Moderate);
    }

    #[test]
    fn quick_partial_answers_stay_below_moderate() {
        let mut s = session(AssessmentMode::Quick);
        s.submit("quick_attention", "1a", 0).unwrap();
        let assessment = assess(&s);
        assert_eq!(assessment.band, ConfidenceBand::Building);
        assert_eq!(
            estimate_for(&assessment, AttributeKind::AdhdType),
            Some(AttributeValue::AdhdType(AdhdType::Inattentive))
        );
    }

    #[test]
    fn adhd_mean_weight_maps_to_subtype() {
        let mut s = session(AssessmentMode::FullDiscovery);
        for (i, id) in ["adhd_1", "adhd_2", "adhd_3", "adhd_4", "adhd_5", "adhd_6"]
            .iter()
            .enumerate()
        {
            s.submit(id, "Very Often", i as u32).unwrap();
        }

        let assessment = assess(&s);
        assert_eq!(
            estimate_for(&assessment, AttributeKind::AdhdType),
            Some(AttributeValue::AdhdType(AdhdType::Combined))
        );
        // consistent extreme answers reach full certainty for the group
        let adhd = assessment
            .estimates
            .iter()
            .find(|e| e.value.kind() == AttributeKind::AdhdType)
            .unwrap();
        assert_eq!(adhd.confidence.band(), ConfidenceBand::High);
    }

    #[test]
    fn all_never_answers_mean_no_adhd_with_high_certainty() {
        let mut s = session(AssessmentMode::FullDiscovery);
        for (i, id) in ["adhd_1", "adhd_2", "adhd_3", "adhd_4", "adhd_5", "adhd_6"]
            .iter()
            .enumerate()
        {
            s.submit(id, "Never", i as u32).unwrap();
        }

        let assessment = assess(&s);
        assert_eq!(
            estimate_for(&assessment, AttributeKind::AdhdType),
            Some(AttributeValue::AdhdType(AdhdType::None))
        );
    }

    #[test]
    fn mbti_letters_follow_answer_leans() {
        let mut s = session(AssessmentMode::FullDiscovery);
        // skip ADHD answers: not needed for MBTI scoring
        let mut seq = 0;
        // E, N, T, J leans plus the two reinforcement questions
        for (id, answer) in [
            ("mbti_ei", "a"),
            ("mbti_sn", "b"),
            ("mbti_tf", "a"),
            ("mbti_jp", "a"),
            ("mbti_intuition", "b"),
            ("mbti_feeling", "a"),
        ] {
            s.submit(id, answer, seq).unwrap();
            seq += 1;
        }

        let assessment = assess(&s);
        assert_eq!(
            estimate_for(&assessment, AttributeKind::MbtiType),
            Some(AttributeValue::MbtiType(MbtiType::Entj))
        );
    }

    #[test]
    fn mbti_ties_default_to_infj() {
        let mut s = session(AssessmentMode::FullDiscovery);
        // opposing judgment answers cancel out; untouched dimensions stay 0
        s.submit("mbti_tf", "a", 0).unwrap();
        s.submit("mbti_feeling", "b", 1).unwrap();

        let assessment = assess(&s);
        assert_eq!(
            estimate_for(&assessment, AttributeKind::MbtiType),
            Some(AttributeValue::MbtiType(MbtiType::Infj))
        );
    }

    #[test]
    fn cognitive_majority_and_attention_are_estimated() {
        let mut s = session(AssessmentMode::FullDiscovery);
        s.submit("cog_learning", "b", 0).unwrap();
        s.submit("cog_problem", "b", 1).unwrap();
        s.submit("cog_attention", "c", 2).unwrap();

        let assessment = assess(&s);
        assert_eq!(
            estimate_for(&assessment, AttributeKind::CognitiveStyle),
            Some(AttributeValue::CognitiveStyle(CognitiveStyle::Intuitive))
        );
        assert_eq!(
            estimate_for(&assessment, AttributeKind::AttentionSpan),
            Some(AttributeValue::AttentionSpan(AttentionSpan::Long))
        );
    }

    #[test]
    fn screening_confidence_is_monotone_in_answers() {
        let mut s = session(AssessmentMode::FullDiscovery);
        let mut last_band = assess(&s).band;
        let mut last_value = assess(&s).confidence.value();

        let answers = [
            ("adhd_1", "Very Often"),
            ("adhd_2", "Very Often"),
            ("adhd_3", "Often"),
            ("adhd_4", "Very Often"),
            ("adhd_5", "Often"),
            ("adhd_6", "Very Often"),
            ("mbti_ei", "a"),
            ("mbti_sn", "b"),
            ("mbti_tf", "a"),
            ("mbti_jp", "a"),
            ("mbti_intuition", "b"),
            ("mbti_feeling", "a"),
            ("cog_learning", "a"),
            ("cog_problem", "a"),
            ("cog_attention", "b"),
        ];
        for (i, (id, answer)) in answers.iter().enumerate() {
            s.submit(id, answer, i as u32).unwrap();
            let assessment = assess(&s);
            if s.phase() == DiscoveryPhase::Screening {
                assert!(assessment.confidence.value() >= last_value);
                assert!(assessment.band >= last_band);
                last_value = assessment.confidence.value();
                last_band = assessment.band;
            }
        }
    }

    #[test]
    fn identical_resubmission_leaves_score_unchanged() {
        let mut s = session(AssessmentMode::FullDiscovery);
        s.submit("adhd_1", "Often", 0).unwrap();
        s.submit("adhd_2", "Sometimes", 1).unwrap();
        let before = assess(&s);

        s.submit("adhd_2", "Sometimes", 2).unwrap();
        let after = assess(&s);

        assert_eq!(before, after);
    }

    #[test]
    fn overwrite_with_different_answer_recomputes_from_scratch() {
        let mut s = session(AssessmentMode::FullDiscovery);
        s.submit("adhd_1", "Very Often", 0).unwrap();
        let high = assess(&s).confidence.value();

        s.submit("adhd_1", "Sometimes", 1).unwrap();
        let recomputed = assess(&s).confidence.value();

        // a mid-scale answer carries less certainty than an extreme one
        assert!(recomputed < high);
    }

    #[test]
    fn preference_answers_map_directly() {
        let mut s = session(AssessmentMode::KnownTypes);
        s.submit("beh_feedback", "c", 0).unwrap();
        s.submit("beh_control", "a", 1).unwrap();
        s.submit("beh_stimulation", "a", 2).unwrap();

        let assessment = assess(&s);
        assert_eq!(
            estimate_for(&assessment, AttributeKind::FeedbackFrequency),
            Some(AttributeValue::FeedbackFrequency(
                crate::domain::profile::FeedbackFrequency::High
            ))
        );
        assert_eq!(
            estimate_for(&assessment, AttributeKind::ControlPreference),
            Some(AttributeValue::ControlPreference(ControlPreference::High))
        );
        assert_eq!(
            estimate_for(&assessment, AttributeKind::StimulationLevel),
            Some(AttributeValue::StimulationLevel(
                crate::domain::profile::StimulationLevel::Low
            ))
        );
    }
}
