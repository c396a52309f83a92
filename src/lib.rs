//! Attune - Neurotype-aware adaptive interaction engine.
//!
//! Tracks a per-user cognitive/interaction profile with confidence
//! scores, classifies the current interaction state from behavioral
//! events, and derives the interface configuration the outer chat
//! application should apply.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
