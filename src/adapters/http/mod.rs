//! HTTP adapter: thin axum surface over the application handlers.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::EngineHandlers;
pub use routes::router;
