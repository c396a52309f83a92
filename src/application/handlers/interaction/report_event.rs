//! ReportEvent - fire-and-forget event ingestion.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::handlers::learning::{RunRevisionCycleCommand, RunRevisionCycleHandler};
use crate::domain::detector::{classify, DetectorThresholds, InteractionEvent, InteractionState};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::InteractionEventLog;

/// Command carrying one interaction event.
#[derive(Debug, Clone)]
pub struct ReportEventCommand {
    pub user_id: UserId,
    pub event: InteractionEvent,
}

/// Result of event ingestion.
///
/// `state` is `None` when the log was unreachable; ingestion itself never
/// fails the caller's turn.
#[derive(Debug, Clone)]
pub struct ReportEventResult {
    pub state: Option<InteractionState>,
}

/// Handler for event ingestion. Re-evaluates the interaction state on
/// every new event and triggers a learning cycle after enough new events
/// accumulate.
pub struct ReportEventHandler {
    events: Arc<dyn InteractionEventLog>,
    thresholds: DetectorThresholds,
    revision: Option<Arc<RunRevisionCycleHandler>>,
    min_new_events: usize,
    counters: Mutex<HashMap<UserId, usize>>,
}

impl ReportEventHandler {
    pub fn new(events: Arc<dyn InteractionEventLog>, thresholds: DetectorThresholds) -> Self {
        Self {
            events,
            thresholds,
            revision: None,
            min_new_events: 0,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Enables the event-count learning trigger: after `min_new_events`
    /// ingested events per user, a revision cycle runs in the background.
    pub fn with_revision_trigger(
        mut self,
        revision: Arc<RunRevisionCycleHandler>,
        min_new_events: usize,
    ) -> Self {
        self.revision = Some(revision);
        self.min_new_events = min_new_events.max(1);
        self
    }

    pub async fn handle(&self, cmd: ReportEventCommand) -> Result<ReportEventResult, DomainError> {
        let now = Timestamp::now();

        if let Err(err) = self.events.append(&cmd.user_id, cmd.event.clone()).await {
            // fire-and-forget: the caller's turn survives log outages
            warn!(user_id = %cmd.user_id, error = %err, "event append failed");
            return Ok(ReportEventResult { state: None });
        }

        let state = match self
            .events
            .recent(&cmd.user_id, &self.thresholds.window, now)
            .await
        {
            Ok(window) => {
                let state = classify(&window, &self.thresholds);
                debug!(
                    user_id = %cmd.user_id,
                    state = %state,
                    window_len = window.len(),
                    "state re-evaluated"
                );
                Some(state)
            }
            Err(err) => {
                warn!(user_id = %cmd.user_id, error = %err, "window read failed");
                None
            }
        };

        self.maybe_trigger_learning(&cmd.user_id).await;

        Ok(ReportEventResult { state })
    }

    async fn maybe_trigger_learning(&self, user_id: &UserId) {
        let Some(revision) = &self.revision else {
            return;
        };

        let due = {
            let mut counters = self.counters.lock().await;
            let counter = counters.entry(user_id.clone()).or_insert(0);
            *counter += 1;
            if *counter >= self.min_new_events {
                *counter = 0;
                true
            } else {
                false
            }
        };

        if due {
            // decoupled from the interactive path; never blocks the caller
            let revision = revision.clone();
            let user_id = user_id.clone();
            tokio::spawn(async move {
                if let Err(err) = revision
                    .handle(RunRevisionCycleCommand {
                        user_id: user_id.clone(),
                    })
                    .await
                {
                    warn!(user_id = %user_id, error = %err, "triggered revision cycle failed");
                }
            });
        }
    }
}
