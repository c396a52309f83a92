//! Policy module - (profile, state) to configuration mapping.
//!
//! Pure and table-driven. State safety overrides always win over stored
//! preference; partially populated profiles fall back to template
//! defaults per attribute.

pub mod configuration;
pub mod derive;

pub use configuration::{AdaptationConfiguration, ControlSplit};
pub use derive::derive_configuration;
