//! Adapters - concrete implementations of ports and the HTTP surface.

pub mod env;
pub mod http;
pub mod memory;
pub mod postgres;
