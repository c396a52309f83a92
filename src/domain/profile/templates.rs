//! Profile templates: fully-populated default attribute sets.
//!
//! Templates guarantee the adaptation policy a concrete value for every
//! attribute a profile leaves unset. The builtin registry carries the
//! base template plus the common neurotype combinations.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

use super::attributes::{
    AdhdType, AttentionSpan, AttributeKind, AttributeValue, AutonomyComfort, CognitiveStyle,
    ComplexityTolerance, ControlPreference, DetailPreference, FeedbackFrequency,
    InformationDensity, LearningMode, MbtiType, NotificationStyle, PatternRecognition,
    ProcessingSpeed, StimulationLevel, StructurePreference,
};

/// A named, fully-populated attribute set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileTemplate {
    pub name: String,
    pub adhd_type: AdhdType,
    pub mbti_type: MbtiType,
    pub cognitive_style: CognitiveStyle,
    pub attention_span: AttentionSpan,
    pub processing_speed: ProcessingSpeed,
    pub detail_preference: DetailPreference,
    pub pattern_recognition: PatternRecognition,
    pub feedback_frequency: FeedbackFrequency,
    pub notification_style: NotificationStyle,
    pub control_preference: ControlPreference,
    pub autonomy_comfort: AutonomyComfort,
    pub stimulation_level: StimulationLevel,
    pub structure_preference: StructurePreference,
    pub complexity_tolerance: ComplexityTolerance,
    pub learning_mode: LearningMode,
    pub information_density: InformationDensity,
}

impl ProfileTemplate {
    /// The base template: every attribute at its domain default.
    pub fn base() -> Self {
        Self {
            name: "base".to_string(),
            adhd_type: AdhdType::default(),
            mbti_type: MbtiType::default(),
            cognitive_style: CognitiveStyle::default(),
            attention_span: AttentionSpan::default(),
            processing_speed: ProcessingSpeed::default(),
            detail_preference: DetailPreference::default(),
            pattern_recognition: PatternRecognition::default(),
            feedback_frequency: FeedbackFrequency::default(),
            notification_style: NotificationStyle::default(),
            control_preference: ControlPreference::default(),
            autonomy_comfort: AutonomyComfort::default(),
            stimulation_level: StimulationLevel::default(),
            structure_preference: StructurePreference::default(),
            complexity_tolerance: ComplexityTolerance::default(),
            learning_mode: LearningMode::default(),
            information_density: InformationDensity::default(),
        }
    }

    /// Returns the template value for any attribute kind.
    ///
    /// Total by construction: every field is concrete.
    pub fn value_of(&self, kind: AttributeKind) -> AttributeValue {
        match kind {
            AttributeKind::AdhdType => AttributeValue::AdhdType(self.adhd_type),
            AttributeKind::MbtiType => AttributeValue::MbtiType(self.mbti_type),
            AttributeKind::CognitiveStyle => AttributeValue::CognitiveStyle(self.cognitive_style),
            AttributeKind::AttentionSpan => AttributeValue::AttentionSpan(self.attention_span),
            AttributeKind::ProcessingSpeed => {
                AttributeValue::ProcessingSpeed(self.processing_speed)
            }
            AttributeKind::DetailPreference => {
                AttributeValue::DetailPreference(self.detail_preference)
            }
            AttributeKind::PatternRecognition => {
                AttributeValue::PatternRecognition(self.pattern_recognition)
            }
            AttributeKind::FeedbackFrequency => {
                AttributeValue::FeedbackFrequency(self.feedback_frequency)
            }
            AttributeKind::NotificationStyle => {
                AttributeValue::NotificationStyle(self.notification_style)
            }
            AttributeKind::ControlPreference => {
                AttributeValue::ControlPreference(self.control_preference)
            }
            AttributeKind::AutonomyComfort => {
                AttributeValue::AutonomyComfort(self.autonomy_comfort)
            }
            AttributeKind::StimulationLevel => {
                AttributeValue::StimulationLevel(self.stimulation_level)
            }
            AttributeKind::StructurePreference => {
                AttributeValue::StructurePreference(self.structure_preference)
            }
            AttributeKind::ComplexityTolerance => {
                AttributeValue::ComplexityTolerance(self.complexity_tolerance)
            }
            AttributeKind::LearningMode => AttributeValue::LearningMode(self.learning_mode),
            AttributeKind::InformationDensity => {
                AttributeValue::InformationDensity(self.information_density)
            }
        }
    }
}

/// Lookup table of templates by name.
///
/// A registry without a requested template is a configuration defect:
/// `get` fails loudly with `ConfigurationGap` rather than silently
/// defaulting.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<String, ProfileTemplate>,
}

impl TemplateRegistry {
    /// Creates an empty registry. Intended for tests that exercise the
    /// configuration-gap path.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Creates the builtin registry: base plus the common combinations.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.insert(ProfileTemplate::base());

        registry.insert(ProfileTemplate {
            name: "adhd_infj".to_string(),
            adhd_type: AdhdType::Combined,
            mbti_type: MbtiType::Infj,
            cognitive_style: CognitiveStyle::Intuitive,
            attention_span: AttentionSpan::Variable,
            processing_speed: ProcessingSpeed::Medium,
            detail_preference: DetailPreference::Balanced,
            pattern_recognition: PatternRecognition::High,
            feedback_frequency: FeedbackFrequency::High,
            notification_style: NotificationStyle::Visual,
            control_preference: ControlPreference::Balanced,
            autonomy_comfort: AutonomyComfort::High,
            stimulation_level: StimulationLevel::Medium,
            structure_preference: StructurePreference::Medium,
            complexity_tolerance: ComplexityTolerance::High,
            learning_mode: LearningMode::Visual,
            information_density: InformationDensity::Medium,
        });

        registry.insert(ProfileTemplate {
            name: "adhd_intj".to_string(),
            adhd_type: AdhdType::Combined,
            mbti_type: MbtiType::Intj,
            cognitive_style: CognitiveStyle::Analytical,
            attention_span: AttentionSpan::Variable,
            processing_speed: ProcessingSpeed::Fast,
            detail_preference: DetailPreference::High,
            pattern_recognition: PatternRecognition::Medium,
            feedback_frequency: FeedbackFrequency::Medium,
            notification_style: NotificationStyle::Visual,
            control_preference: ControlPreference::Low,
            autonomy_comfort: AutonomyComfort::High,
            stimulation_level: StimulationLevel::Low,
            structure_preference: StructurePreference::Medium,
            complexity_tolerance: ComplexityTolerance::High,
            learning_mode: LearningMode::Reading,
            information_density: InformationDensity::Dense,
        });

        registry.insert(ProfileTemplate {
            name: "neurotypical_entp".to_string(),
            adhd_type: AdhdType::None,
            mbti_type: MbtiType::Entp,
            cognitive_style: CognitiveStyle::Divergent,
            attention_span: AttentionSpan::Medium,
            processing_speed: ProcessingSpeed::Fast,
            detail_preference: DetailPreference::Low,
            pattern_recognition: PatternRecognition::Medium,
            feedback_frequency: FeedbackFrequency::Medium,
            notification_style: NotificationStyle::Visual,
            control_preference: ControlPreference::High,
            autonomy_comfort: AutonomyComfort::Medium,
            stimulation_level: StimulationLevel::High,
            structure_preference: StructurePreference::Low,
            complexity_tolerance: ComplexityTolerance::High,
            learning_mode: LearningMode::Kinesthetic,
            information_density: InformationDensity::Medium,
        });

        registry.insert(ProfileTemplate {
            name: "adhd_inattentive_isfj".to_string(),
            adhd_type: AdhdType::Inattentive,
            mbti_type: MbtiType::Isfj,
            cognitive_style: CognitiveStyle::Systematic,
            attention_span: AttentionSpan::Short,
            processing_speed: ProcessingSpeed::Medium,
            detail_preference: DetailPreference::Medium,
            pattern_recognition: PatternRecognition::Low,
            feedback_frequency: FeedbackFrequency::Medium,
            notification_style: NotificationStyle::Minimal,
            control_preference: ControlPreference::Balanced,
            autonomy_comfort: AutonomyComfort::Low,
            stimulation_level: StimulationLevel::Low,
            structure_preference: StructurePreference::High,
            complexity_tolerance: ComplexityTolerance::Low,
            learning_mode: LearningMode::Visual,
            information_density: InformationDensity::Medium,
        });

        registry
    }

    /// Adds or replaces a template.
    pub fn insert(&mut self, template: ProfileTemplate) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Looks up a template, failing loudly when absent.
    pub fn get(&self, name: &str) -> Result<&ProfileTemplate, DomainError> {
        self.templates
            .get(name)
            .ok_or_else(|| DomainError::configuration_gap(name))
    }

    /// Lists registered template names.
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(|n| n.as_str()).collect()
    }
}

/// Shared builtin registry.
pub static BUILTIN_TEMPLATES: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::builtin);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn base_template_is_total() {
        let base = ProfileTemplate::base();
        for kind in AttributeKind::all() {
            // value_of never panics and returns the matching kind
            assert_eq!(base.value_of(*kind).kind(), *kind);
        }
    }

    #[test]
    fn builtin_registry_contains_base_and_named_templates() {
        let registry = TemplateRegistry::builtin();
        for name in [
            "base",
            "adhd_infj",
            "adhd_intj",
            "neurotypical_entp",
            "adhd_inattentive_isfj",
        ] {
            assert!(registry.get(name).is_ok(), "missing template '{}'", name);
        }
    }

    #[test]
    fn missing_template_is_a_configuration_gap() {
        let registry = TemplateRegistry::empty();
        let err = registry.get("base").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigurationGap);
    }

    #[test]
    fn inattentive_template_prefers_minimal_notifications() {
        let registry = TemplateRegistry::builtin();
        let template = registry.get("adhd_inattentive_isfj").unwrap();
        assert_eq!(template.notification_style, NotificationStyle::Minimal);
        assert_eq!(template.structure_preference, StructurePreference::High);
    }
}
