//! Profile module - the Profile Store domain.
//!
//! A `NeurotypeProfile` is a user-owned set of typed attributes, each with
//! a categorical value, a confidence score, and a lifecycle status.
//!
//! # Domain Invariants
//!
//! 1. Each profile belongs to exactly one user
//! 2. Every set attribute has exactly one value and one confidence
//! 3. Confidence is recomputed on assessment updates, never silently reset
//! 4. Profile version only increases
//! 5. Profiles are deleted only by explicit user action
//! 6. Audit records of learning loop revisions are append-only

pub mod attributes;
pub mod audit;
pub mod events;
pub mod profile;
pub mod templates;

pub use attributes::{
    AdhdType, AttentionSpan, AttributeKind, AttributeValue, AutonomyComfort, CognitiveStyle,
    ComplexityTolerance, ControlPreference, DetailPreference, FeedbackFrequency,
    InformationDensity, LearningMode, MbtiType, NotificationStyle, PatternRecognition,
    ProcessingSpeed, StimulationLevel, StructurePreference,
};
pub use audit::{AttributeChangeRecord, ChangeRecordId};
pub use events::ProfileEvent;
pub use profile::{
    AttributeChange, AttributeSlot, AttributeSnapshot, AttributeStatus, NeurotypeProfile,
    ProfileVersion,
};
pub use templates::{ProfileTemplate, TemplateRegistry, BUILTIN_TEMPLATES};
