//! In-memory append-only interaction event log.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::detector::{trailing_window, InteractionEvent, WindowLimits};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{InteractionEventLog, RetentionPolicy};

/// In-memory per-user event log with retention pruning on append.
///
/// Appends may happen concurrently with detector reads; reads copy the
/// trailing window under the read lock, so a single classification pass
/// never observes interleaved mutation.
#[derive(Debug, Clone)]
pub struct InMemoryEventLog {
    events: Arc<RwLock<HashMap<UserId, VecDeque<InteractionEvent>>>>,
    retention: RetentionPolicy,
}

impl InMemoryEventLog {
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
            retention,
        }
    }
}

impl Default for InMemoryEventLog {
    fn default() -> Self {
        Self::new(RetentionPolicy::default())
    }
}

#[async_trait]
impl InteractionEventLog for InMemoryEventLog {
    async fn append(
        &self,
        user_id: &UserId,
        event: InteractionEvent,
    ) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        let log = events.entry(user_id.clone()).or_default();

        let cutoff = event.at.minus_secs(self.retention.max_age_secs);
        log.push_back(event);
        while log.len() > self.retention.max_events {
            log.pop_front();
        }
        while log.front().is_some_and(|e| e.at < cutoff) {
            log.pop_front();
        }
        Ok(())
    }

    async fn recent(
        &self,
        user_id: &UserId,
        limits: &WindowLimits,
        now: Timestamp,
    ) -> Result<Vec<InteractionEvent>, DomainError> {
        let events = self.events.read().await;
        let log = events.get(user_id).map(|l| l.iter().cloned().collect::<Vec<_>>());
        Ok(match log {
            Some(all) => trailing_window(&all, limits, now),
            None => Vec::new(),
        })
    }

    async fn len(&self, user_id: &UserId) -> Result<usize, DomainError> {
        Ok(self
            .events
            .read()
            .await
            .get(user_id)
            .map_or(0, |l| l.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detector::EventKind;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn at(secs: u64) -> Timestamp {
        Timestamp::from_unix_secs(1_704_326_400 + secs)
    }

    #[tokio::test]
    async fn append_and_read_window() {
        let log = InMemoryEventLog::default();
        for i in 0..5 {
            log.append(&user(), InteractionEvent::new(at(i), EventKind::Correction))
                .await
                .unwrap();
        }

        let window = log
            .recent(&user(), &WindowLimits::default(), at(5))
            .await
            .unwrap();
        assert_eq!(window.len(), 5);
        assert_eq!(log.len(&user()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn retention_caps_event_count() {
        let log = InMemoryEventLog::new(RetentionPolicy {
            max_events: 3,
            max_age_secs: 3600,
        });
        for i in 0..10 {
            log.append(&user(), InteractionEvent::new(at(i), EventKind::TopicSwitch))
                .await
                .unwrap();
        }

        assert_eq!(log.len(&user()).await.unwrap(), 3);
        let window = log
            .recent(&user(), &WindowLimits::default(), at(10))
            .await
            .unwrap();
        assert_eq!(window[0].at, at(7));
    }

    #[tokio::test]
    async fn retention_drops_stale_events() {
        let log = InMemoryEventLog::new(RetentionPolicy {
            max_events: 100,
            max_age_secs: 60,
        });
        log.append(&user(), InteractionEvent::new(at(0), EventKind::Correction))
            .await
            .unwrap();
        log.append(&user(), InteractionEvent::new(at(120), EventKind::Correction))
            .await
            .unwrap();

        assert_eq!(log.len(&user()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let log = InMemoryEventLog::default();
        log.append(&user(), InteractionEvent::new(at(0), EventKind::Correction))
            .await
            .unwrap();

        let other = UserId::new("user-2").unwrap();
        assert_eq!(log.len(&other).await.unwrap(), 0);
    }
}
