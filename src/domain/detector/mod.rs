//! Detector module - interaction state classification.
//!
//! Consumes a bounded trailing window of the append-only interaction
//! event log and classifies the current state as exactly one of flow,
//! intuitive, overwhelmed, or balanced. The classifier is a pure function
//! of the window: no carry-over between evaluations.

pub mod classifier;
pub mod event;
pub mod window;

pub use classifier::{classify, DetectorThresholds, InteractionState};
pub use event::{EventKind, InteractionEvent};
pub use window::{trailing_window, WindowLimits, WindowStats};
