//! Periodic learning loop task.
//!
//! One task per user session context, decoupled from the interactive
//! request path. The task only holds the profile briefly at commit time
//! inside the revision handler; policy queries keep reading the last
//! committed profile. Cancellation takes effect between cycles.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::handlers::learning::{RunRevisionCycleCommand, RunRevisionCycleHandler};
use crate::domain::foundation::UserId;

/// Handle to a running learning loop.
pub struct LearningLoopHandle {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl LearningLoopHandle {
    /// Stops the loop and waits for the task to wind down.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }

    /// True while the task is still running.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

/// Spawns the periodic learning loop for one user.
pub fn spawn_learning_loop(
    handler: Arc<RunRevisionCycleHandler>,
    user_id: UserId,
    cadence: Duration,
) -> LearningLoopHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(cadence);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // the first tick fires immediately; revision waits a full cadence
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = handler
                        .handle(RunRevisionCycleCommand {
                            user_id: user_id.clone(),
                        })
                        .await
                    {
                        warn!(user_id = %user_id, error = %err, "revision cycle failed");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        debug!(user_id = %user_id, "learning loop stopped");
                        break;
                    }
                }
            }
        }
    });

    LearningLoopHandle { shutdown, handle }
}
