//! GetConfiguration - derive the adaptation configuration on demand.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::detector::{classify, DetectorThresholds, InteractionState};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::policy::{derive_configuration, AdaptationConfiguration};
use crate::domain::profile::{NeurotypeProfile, TemplateRegistry};
use crate::ports::{InteractionEventLog, ProfileRepository};

/// Query for the current configuration.
#[derive(Debug, Clone)]
pub struct GetConfigurationQuery {
    pub user_id: UserId,
}

/// Derived configuration plus the state that produced it.
///
/// `stale` marks a cached fallback served while storage was unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationSnapshot {
    pub configuration: AdaptationConfiguration,
    pub state: InteractionState,
    pub stale: bool,
}

/// Handler for configuration queries.
///
/// Keeps the last derived configuration per user as a local cache; when a
/// storage collaborator is down the cached value is served marked stale
/// instead of failing the interactive turn.
pub struct GetConfigurationHandler {
    profiles: Arc<dyn ProfileRepository>,
    events: Arc<dyn InteractionEventLog>,
    registry: TemplateRegistry,
    thresholds: DetectorThresholds,
    cache: RwLock<HashMap<UserId, ConfigurationSnapshot>>,
}

impl GetConfigurationHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        events: Arc<dyn InteractionEventLog>,
        registry: TemplateRegistry,
        thresholds: DetectorThresholds,
    ) -> Self {
        Self {
            profiles,
            events,
            registry,
            thresholds,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn handle(
        &self,
        query: GetConfigurationQuery,
    ) -> Result<ConfigurationSnapshot, DomainError> {
        let now = Timestamp::now();

        let profile = match self.profiles.find_by_user(&query.user_id).await {
            Ok(Some(profile)) => profile,
            // users without a profile get the template-default
            // configuration
            Ok(None) => NeurotypeProfile::new(query.user_id.clone(), now),
            Err(err) if err.code == ErrorCode::StorageUnavailable => {
                return self.serve_stale(&query.user_id, err).await;
            }
            Err(err) => return Err(err),
        };

        let window = match self
            .events
            .recent(&query.user_id, &self.thresholds.window, now)
            .await
        {
            Ok(window) => window,
            Err(err) if err.code == ErrorCode::StorageUnavailable => {
                return self.serve_stale(&query.user_id, err).await;
            }
            Err(err) => return Err(err),
        };

        let state = classify(&window, &self.thresholds);
        // a configuration gap here is a defect and fails loudly
        let configuration = derive_configuration(&profile, state, &self.registry)?;

        let snapshot = ConfigurationSnapshot {
            configuration,
            state,
            stale: false,
        };
        self.cache
            .write()
            .await
            .insert(query.user_id.clone(), snapshot.clone());

        debug!(user_id = %query.user_id, state = %state, "configuration derived");
        Ok(snapshot)
    }

    async fn serve_stale(
        &self,
        user_id: &UserId,
        err: DomainError,
    ) -> Result<ConfigurationSnapshot, DomainError> {
        match self.cache.read().await.get(user_id) {
            Some(cached) => {
                warn!(user_id = %user_id, error = %err, "serving cached configuration");
                Ok(ConfigurationSnapshot {
                    stale: true,
                    ..cached.clone()
                })
            }
            None => Err(err),
        }
    }
}
