//! Attune server binary: wires configuration, adapters, and the HTTP
//! surface.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use attune::adapters::http::{router, EngineHandlers};
use attune::adapters::memory::{
    InMemoryAuditTrail, InMemoryEventLog, InMemoryProfileRepository, InMemorySessionRepository,
};
use attune::adapters::postgres::{PgAuditTrail, PgEventLog, PgProfileRepository};
use attune::application::handlers::assessment::{
    ConfirmProfileHandler, NextQuestionHandler, StartSessionHandler, SubmitAnswerHandler,
};
use attune::application::handlers::interaction::{GetConfigurationHandler, ReportEventHandler};
use attune::application::handlers::learning::RunRevisionCycleHandler;
use attune::application::handlers::profile::{DeleteProfileHandler, GetProfileHandler};
use attune::config::{AppConfig, StorageBackend};
use attune::domain::profile::BUILTIN_TEMPLATES;
use attune::ports::{AuditTrail, InteractionEventLog, ProfileRepository, SessionRepository};

struct Stores {
    profiles: Arc<dyn ProfileRepository>,
    sessions: Arc<dyn SessionRepository>,
    events: Arc<dyn InteractionEventLog>,
    audit: Arc<dyn AuditTrail>,
}

async fn build_stores(config: &AppConfig) -> Result<Stores, Box<dyn std::error::Error>> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Stores {
            profiles: Arc::new(InMemoryProfileRepository::new()),
            sessions: Arc::new(InMemorySessionRepository::new()),
            events: Arc::new(InMemoryEventLog::new(config.storage.retention)),
            audit: Arc::new(InMemoryAuditTrail::new()),
        }),
        StorageBackend::Postgres => {
            let url = config
                .storage
                .database_url
                .as_deref()
                .ok_or("storage.database_url is required for the postgres backend")?;
            let pool = PgPoolOptions::new().max_connections(8).connect(url).await?;
            Ok(Stores {
                profiles: Arc::new(PgProfileRepository::new(pool.clone())),
                // sessions are short-lived; they stay in process memory
                sessions: Arc::new(InMemorySessionRepository::new()),
                events: Arc::new(PgEventLog::new(pool.clone(), config.storage.retention)),
                audit: Arc::new(PgAuditTrail::new(pool)),
            })
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("attune=info,tower_http=info")),
        )
        .init();

    let stores = build_stores(&config).await?;
    let thresholds = config.detector.thresholds.clone();

    let revision_handler = Arc::new(RunRevisionCycleHandler::new(
        stores.profiles.clone(),
        stores.events.clone(),
        stores.audit.clone(),
        config.learning.params.clone(),
        thresholds.window,
    ));

    let handlers = EngineHandlers {
        start_session: Arc::new(StartSessionHandler::new(
            stores.sessions.clone(),
            stores.profiles.clone(),
        )),
        submit_answer: Arc::new(SubmitAnswerHandler::new(
            stores.sessions.clone(),
            stores.profiles.clone(),
        )),
        next_question: Arc::new(NextQuestionHandler::new(stores.sessions.clone())),
        confirm_profile: Arc::new(ConfirmProfileHandler::new(
            stores.sessions.clone(),
            stores.profiles.clone(),
        )),
        report_event: Arc::new(
            ReportEventHandler::new(stores.events.clone(), thresholds.clone())
                .with_revision_trigger(revision_handler, config.learning.min_new_events),
        ),
        get_configuration: Arc::new(GetConfigurationHandler::new(
            stores.profiles.clone(),
            stores.events.clone(),
            BUILTIN_TEMPLATES.clone(),
            thresholds,
        )),
        get_profile: Arc::new(GetProfileHandler::new(stores.profiles.clone())),
        delete_profile: Arc::new(DeleteProfileHandler::new(stores.profiles.clone())),
    };

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "attune listening");

    axum::serve(listener, router(handlers)).await?;
    Ok(())
}
