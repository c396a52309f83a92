//! Learning module - passive profile refinement.
//!
//! Observes interaction outcomes and adjusts profile attributes only when
//! accumulated behavioral evidence contradicts the stored value past a
//! replacement threshold. Every applied revision leaves one append-only
//! audit record.

pub mod evidence;
pub mod revision;

pub use evidence::{gather_evidence, BehavioralEvidence, LearningParams};
pub use revision::{propose_revisions, ProposedRevision};
