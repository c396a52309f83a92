//! Router assembly for the HTTP surface.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{
    confirm_profile, delete_profile, get_configuration, get_profile, report_event,
    session_progress, start_session, submit_answer, EngineHandlers,
};

/// Builds the engine router.
pub fn router(handlers: EngineHandlers) -> Router {
    Router::new()
        .route("/api/assessment/sessions", post(start_session))
        .route(
            "/api/assessment/sessions/:session_id/answers",
            post(submit_answer),
        )
        .route(
            "/api/assessment/sessions/:session_id/progress",
            get(session_progress),
        )
        .route(
            "/api/assessment/sessions/:session_id/confirm",
            post(confirm_profile),
        )
        .route("/api/events", post(report_event))
        .route("/api/users/:user_id/configuration", get(get_configuration))
        .route(
            "/api/users/:user_id/profile",
            get(get_profile).delete(delete_profile),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        .with_state(handlers)
}
