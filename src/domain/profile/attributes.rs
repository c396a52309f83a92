//! Attribute domains for the neurotype profile.
//!
//! Every attribute is a tagged enum with a fixed storage vocabulary. The
//! string tokens are the external contract: they round-trip unchanged
//! between storage, the environment boundary, and the adaptation policy
//! table lookup.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Declares an attribute domain enum together with its storage vocabulary.
///
/// Generates serde renames, `as_str`, `all`, `Display`, and `FromStr`
/// from a single variant-to-token table so the vocabulary cannot drift
/// between representations.
macro_rules! vocab_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $token)] $variant),+
        }

        impl $name {
            /// Returns the documented storage token for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }

            /// Returns every value in the domain, in declaration order.
            pub fn all() -> &'static [$name] {
                &[$(Self::$variant),+]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok(Self::$variant),)+
                    _ => Err(ValidationError::out_of_domain($field, s)),
                }
            }
        }
    };
}

vocab_enum! {
    /// ADHD subtype.
    AdhdType, "adhd_type" {
        Inattentive => "inattentive",
        HyperactiveImpulsive => "hyperactive_impulsive",
        Combined => "combined",
        None => "none",
    }
}

impl Default for AdhdType {
    fn default() -> Self {
        Self::None
    }
}

vocab_enum! {
    /// MBTI personality type.
    MbtiType, "mbti_type" {
        Intj => "INTJ",
        Intp => "INTP",
        Entj => "ENTJ",
        Entp => "ENTP",
        Infj => "INFJ",
        Infp => "INFP",
        Enfj => "ENFJ",
        Enfp => "ENFP",
        Istj => "ISTJ",
        Isfj => "ISFJ",
        Estj => "ESTJ",
        Esfj => "ESFJ",
        Istp => "ISTP",
        Isfp => "ISFP",
        Estp => "ESTP",
        Esfp => "ESFP",
        None => "none",
    }
}

impl Default for MbtiType {
    fn default() -> Self {
        Self::None
    }
}

impl MbtiType {
    /// Builds a type from its four letters, e.g. ('I','N','F','J').
    pub fn from_letters(letters: [char; 4]) -> Result<Self, ValidationError> {
        let s: String = letters.iter().collect();
        s.parse()
    }
}

vocab_enum! {
    /// Cognitive processing style.
    CognitiveStyle, "cognitive_style" {
        Analytical => "analytical",
        Intuitive => "intuitive",
        Creative => "creative",
        Logical => "logical",
        Systematic => "systematic",
        Holistic => "holistic",
        Linear => "linear",
        Divergent => "divergent",
    }
}

impl Default for CognitiveStyle {
    fn default() -> Self {
        Self::Analytical
    }
}

vocab_enum! {
    /// Sustained attention pattern.
    AttentionSpan, "attention_span" {
        Short => "short",
        Medium => "medium",
        Long => "long",
        Variable => "variable",
    }
}

impl Default for AttentionSpan {
    fn default() -> Self {
        Self::Medium
    }
}

vocab_enum! {
    /// Information processing speed.
    ProcessingSpeed, "processing_speed" {
        Slow => "slow",
        Medium => "medium",
        Fast => "fast",
        Variable => "variable",
    }
}

impl Default for ProcessingSpeed {
    fn default() -> Self {
        Self::Medium
    }
}

vocab_enum! {
    /// Preference for detail depth.
    DetailPreference, "detail_preference" {
        Low => "low",
        Medium => "medium",
        High => "high",
        Balanced => "balanced",
    }
}

impl Default for DetailPreference {
    fn default() -> Self {
        Self::Balanced
    }
}

vocab_enum! {
    /// Pattern recognition strength.
    PatternRecognition, "pattern_recognition" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

impl Default for PatternRecognition {
    fn default() -> Self {
        Self::Medium
    }
}

vocab_enum! {
    /// How often the user wants feedback.
    FeedbackFrequency, "feedback_frequency" {
        Minimal => "minimal",
        Medium => "medium",
        High => "high",
    }
}

impl Default for FeedbackFrequency {
    fn default() -> Self {
        Self::Medium
    }
}

vocab_enum! {
    /// Notification delivery style.
    NotificationStyle, "notification_style" {
        Visual => "visual",
        Auditory => "auditory",
        Minimal => "minimal",
    }
}

impl Default for NotificationStyle {
    fn default() -> Self {
        Self::Visual
    }
}

vocab_enum! {
    /// How much control the user wants over decisions.
    ControlPreference, "control_preference" {
        High => "high",
        Balanced => "balanced",
        Low => "low",
    }
}

impl Default for ControlPreference {
    fn default() -> Self {
        Self::Balanced
    }
}

vocab_enum! {
    /// Comfort with autonomous system behavior.
    AutonomyComfort, "autonomy_comfort" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

impl Default for AutonomyComfort {
    fn default() -> Self {
        Self::Medium
    }
}

vocab_enum! {
    /// Preferred environmental stimulation level.
    StimulationLevel, "stimulation_level" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

impl Default for StimulationLevel {
    fn default() -> Self {
        Self::Medium
    }
}

vocab_enum! {
    /// Preference for imposed structure.
    StructurePreference, "structure_preference" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

impl Default for StructurePreference {
    fn default() -> Self {
        Self::Medium
    }
}

vocab_enum! {
    /// Tolerance for complexity.
    ComplexityTolerance, "complexity_tolerance" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

impl Default for ComplexityTolerance {
    fn default() -> Self {
        Self::Medium
    }
}

vocab_enum! {
    /// Preferred learning modality.
    LearningMode, "learning_mode" {
        Visual => "visual",
        Auditory => "auditory",
        Kinesthetic => "kinesthetic",
        Reading => "reading",
    }
}

impl Default for LearningMode {
    fn default() -> Self {
        Self::Visual
    }
}

vocab_enum! {
    /// Preferred information density.
    InformationDensity, "information_density" {
        Sparse => "sparse",
        Medium => "medium",
        Dense => "dense",
    }
}

impl Default for InformationDensity {
    fn default() -> Self {
        Self::Medium
    }
}

/// Identifies one attribute slot of the profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    AdhdType,
    MbtiType,
    CognitiveStyle,
    AttentionSpan,
    ProcessingSpeed,
    DetailPreference,
    PatternRecognition,
    FeedbackFrequency,
    NotificationStyle,
    ControlPreference,
    AutonomyComfort,
    StimulationLevel,
    StructurePreference,
    ComplexityTolerance,
    LearningMode,
    InformationDensity,
}

impl AttributeKind {
    /// All attribute kinds, in canonical profile order.
    pub fn all() -> &'static [AttributeKind] {
        use AttributeKind::*;
        &[
            AdhdType,
            MbtiType,
            CognitiveStyle,
            AttentionSpan,
            ProcessingSpeed,
            DetailPreference,
            PatternRecognition,
            FeedbackFrequency,
            NotificationStyle,
            ControlPreference,
            AutonomyComfort,
            StimulationLevel,
            StructurePreference,
            ComplexityTolerance,
            LearningMode,
            InformationDensity,
        ]
    }

    /// Returns the storage token for this kind.
    pub fn as_str(&self) -> &'static str {
        use AttributeKind::*;
        match self {
            AdhdType => "adhd_type",
            MbtiType => "mbti_type",
            CognitiveStyle => "cognitive_style",
            AttentionSpan => "attention_span",
            ProcessingSpeed => "processing_speed",
            DetailPreference => "detail_preference",
            PatternRecognition => "pattern_recognition",
            FeedbackFrequency => "feedback_frequency",
            NotificationStyle => "notification_style",
            ControlPreference => "control_preference",
            AutonomyComfort => "autonomy_comfort",
            StimulationLevel => "stimulation_level",
            StructurePreference => "structure_preference",
            ComplexityTolerance => "complexity_tolerance",
            LearningMode => "learning_mode",
            InformationDensity => "information_density",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttributeKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::out_of_domain("attribute", s))
    }
}

/// A value from exactly one attribute domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "attribute", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    AdhdType(AdhdType),
    MbtiType(MbtiType),
    CognitiveStyle(CognitiveStyle),
    AttentionSpan(AttentionSpan),
    ProcessingSpeed(ProcessingSpeed),
    DetailPreference(DetailPreference),
    PatternRecognition(PatternRecognition),
    FeedbackFrequency(FeedbackFrequency),
    NotificationStyle(NotificationStyle),
    ControlPreference(ControlPreference),
    AutonomyComfort(AutonomyComfort),
    StimulationLevel(StimulationLevel),
    StructurePreference(StructurePreference),
    ComplexityTolerance(ComplexityTolerance),
    LearningMode(LearningMode),
    InformationDensity(InformationDensity),
}

impl AttributeValue {
    /// Returns the kind of the attribute this value belongs to.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::AdhdType(_) => AttributeKind::AdhdType,
            Self::MbtiType(_) => AttributeKind::MbtiType,
            Self::CognitiveStyle(_) => AttributeKind::CognitiveStyle,
            Self::AttentionSpan(_) => AttributeKind::AttentionSpan,
            Self::ProcessingSpeed(_) => AttributeKind::ProcessingSpeed,
            Self::DetailPreference(_) => AttributeKind::DetailPreference,
            Self::PatternRecognition(_) => AttributeKind::PatternRecognition,
            Self::FeedbackFrequency(_) => AttributeKind::FeedbackFrequency,
            Self::NotificationStyle(_) => AttributeKind::NotificationStyle,
            Self::ControlPreference(_) => AttributeKind::ControlPreference,
            Self::AutonomyComfort(_) => AttributeKind::AutonomyComfort,
            Self::StimulationLevel(_) => AttributeKind::StimulationLevel,
            Self::StructurePreference(_) => AttributeKind::StructurePreference,
            Self::ComplexityTolerance(_) => AttributeKind::ComplexityTolerance,
            Self::LearningMode(_) => AttributeKind::LearningMode,
            Self::InformationDensity(_) => AttributeKind::InformationDensity,
        }
    }

    /// Returns the storage token of the wrapped value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdhdType(v) => v.as_str(),
            Self::MbtiType(v) => v.as_str(),
            Self::CognitiveStyle(v) => v.as_str(),
            Self::AttentionSpan(v) => v.as_str(),
            Self::ProcessingSpeed(v) => v.as_str(),
            Self::DetailPreference(v) => v.as_str(),
            Self::PatternRecognition(v) => v.as_str(),
            Self::FeedbackFrequency(v) => v.as_str(),
            Self::NotificationStyle(v) => v.as_str(),
            Self::ControlPreference(v) => v.as_str(),
            Self::AutonomyComfort(v) => v.as_str(),
            Self::StimulationLevel(v) => v.as_str(),
            Self::StructurePreference(v) => v.as_str(),
            Self::ComplexityTolerance(v) => v.as_str(),
            Self::LearningMode(v) => v.as_str(),
            Self::InformationDensity(v) => v.as_str(),
        }
    }

    /// Parses a storage token in the domain of the given kind.
    pub fn parse(kind: AttributeKind, token: &str) -> Result<Self, ValidationError> {
        Ok(match kind {
            AttributeKind::AdhdType => Self::AdhdType(token.parse()?),
            AttributeKind::MbtiType => Self::MbtiType(token.parse()?),
            AttributeKind::CognitiveStyle => Self::CognitiveStyle(token.parse()?),
            AttributeKind::AttentionSpan => Self::AttentionSpan(token.parse()?),
            AttributeKind::ProcessingSpeed => Self::ProcessingSpeed(token.parse()?),
            AttributeKind::DetailPreference => Self::DetailPreference(token.parse()?),
            AttributeKind::PatternRecognition => Self::PatternRecognition(token.parse()?),
            AttributeKind::FeedbackFrequency => Self::FeedbackFrequency(token.parse()?),
            AttributeKind::NotificationStyle => Self::NotificationStyle(token.parse()?),
            AttributeKind::ControlPreference => Self::ControlPreference(token.parse()?),
            AttributeKind::AutonomyComfort => Self::AutonomyComfort(token.parse()?),
            AttributeKind::StimulationLevel => Self::StimulationLevel(token.parse()?),
            AttributeKind::StructurePreference => Self::StructurePreference(token.parse()?),
            AttributeKind::ComplexityTolerance => Self::ComplexityTolerance(token.parse()?),
            AttributeKind::LearningMode => Self::LearningMode(token.parse()?),
            AttributeKind::InformationDensity => Self::InformationDensity(token.parse()?),
        })
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
