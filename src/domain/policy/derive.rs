//! Table-driven derivation of the adaptation configuration.
//!
//! Precedence, lowest to highest: template default, attribute-derived
//! adjustment, explicit profile setting, state safety override. The
//! mapping is total for any profile whose template exists in the
//! registry; a missing template fails loudly.

use crate::domain::detector::InteractionState;
use crate::domain::foundation::DomainError;
use crate::domain::profile::{
    AdhdType, AttentionSpan, AttributeKind, AttributeValue, CognitiveStyle, NeurotypeProfile,
    NotificationStyle, StructurePreference, TemplateRegistry,
};
use crate::domain::profile::{FeedbackFrequency, InformationDensity};

use super::configuration::{AdaptationConfiguration, ControlSplit};

/// Derives the configuration for a profile in a given state.
pub fn derive_configuration(
    profile: &NeurotypeProfile,
    state: InteractionState,
    registry: &TemplateRegistry,
) -> Result<AdaptationConfiguration, DomainError> {
    let template = registry.get(profile.template())?;

    // Template defaults
    let mut feedback = template.feedback_frequency;
    let mut notification = template.notification_style;
    let mut control = ControlSplit::from_preference(template.control_preference);
    let mut density = template.information_density;
    let mut structure = template.structure_preference;

    // Attribute-derived adjustments
    if let Some(AttributeValue::AdhdType(adhd)) = profile.value_of(AttributeKind::AdhdType) {
        match adhd {
            AdhdType::Combined => {
                feedback = FeedbackFrequency::High;
                notification = NotificationStyle::Visual;
            }
            AdhdType::Inattentive => {
                structure = StructurePreference::High;
                notification = NotificationStyle::Minimal;
            }
            AdhdType::HyperactiveImpulsive => {
                feedback = FeedbackFrequency::High;
            }
            AdhdType::None => {}
        }
    }
    if let Some(AttributeValue::CognitiveStyle(style)) =
        profile.value_of(AttributeKind::CognitiveStyle)
    {
        if style == CognitiveStyle::Analytical {
            density = InformationDensity::Dense;
        }
    }
    if let Some(AttributeValue::AttentionSpan(span)) =
        profile.value_of(AttributeKind::AttentionSpan)
    {
        match span {
            AttentionSpan::Short => feedback = FeedbackFrequency::High,
            AttentionSpan::Long => feedback = FeedbackFrequency::Minimal,
            AttentionSpan::Medium | AttentionSpan::Variable => {}
        }
    }

    // Explicit profile settings win over derived adjustments
    if let Some(AttributeValue::FeedbackFrequency(v)) =
        profile.value_of(AttributeKind::FeedbackFrequency)
    {
        feedback = v;
    }
    if let Some(AttributeValue::NotificationStyle(v)) =
        profile.value_of(AttributeKind::NotificationStyle)
    {
        notification = v;
    }
    if let Some(AttributeValue::ControlPreference(v)) =
        profile.value_of(AttributeKind::ControlPreference)
    {
        control = ControlSplit::from_preference(v);
    }
    if let Some(AttributeValue::InformationDensity(v)) =
        profile.value_of(AttributeKind::InformationDensity)
    {
        density = v;
    }
    if let Some(AttributeValue::StructurePreference(v)) =
        profile.value_of(AttributeKind::StructurePreference)
    {
        structure = v;
    }

    // State safety overrides always win over stored preference
    match state {
        InteractionState::Overwhelmed => {
            notification = NotificationStyle::Minimal;
            density = InformationDensity::Sparse;
            feedback = FeedbackFrequency::Minimal;
        }
        InteractionState::Flow => {
            // protect sustained focus from interruption
            notification = NotificationStyle::Minimal;
            feedback = FeedbackFrequency::Minimal;
        }
        InteractionState::Intuitive => {
            structure = StructurePreference::Low;
        }
        InteractionState::Balanced => {}
    }

    Ok(AdaptationConfiguration {
        feedback_frequency: feedback,
        notification_style: notification,
        control_split: control,
        information_density: density,
        structure_level: structure,
    })
}
