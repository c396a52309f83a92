//! Assessment module - question-driven profile discovery.
//!
//! Three modes feed the profile store: direct declaration of known types,
//! a 3-question quick assessment, and the multi-phase full discovery
//! protocol. Scoring is deterministic and additive so the reported
//! confidence band never drops while answers accumulate within a phase.

pub mod question;
pub mod scoring;
pub mod session;

pub use question::{
    find_question, find_quick_question, group_questions, group_size, AnswerEffect, AnswerOption,
    EvaluationQuestion, MbtiDimension, QuestionGroup, QuickQuestion, QUESTION_BANK, QUICK_BANK,
};
pub use scoring::{assess, AttributeEstimate, SessionAssessment};
pub use session::{
    AnswerApplied, AnswerRecord, AssessmentMode, AssessmentSession, DiscoveryPhase, QuestionView,
    SessionStatus,
};
