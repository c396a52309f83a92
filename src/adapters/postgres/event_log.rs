//! PostgreSQL adapter for the interaction event log.
//!
//! One append-only table per deployment, partitioned by user id column.
//! Retention enforcement runs on append, matching the user-configured
//! policy.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::detector::{InteractionEvent, WindowLimits};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::{InteractionEventLog, RetentionPolicy};

/// PostgreSQL implementation of InteractionEventLog.
pub struct PgEventLog {
    pool: PgPool,
    retention: RetentionPolicy,
}

impl PgEventLog {
    pub fn new(pool: PgPool, retention: RetentionPolicy) -> Self {
        Self { pool, retention }
    }
}

fn storage_error(err: sqlx::Error) -> DomainError {
    DomainError::storage_unavailable(format!("Event log unavailable: {}", err))
}

#[async_trait]
impl InteractionEventLog for PgEventLog {
    async fn append(
        &self,
        user_id: &UserId,
        event: InteractionEvent,
    ) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&event.kind).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize event: {}", e),
            )
        })?;

        sqlx::query(
            "INSERT INTO attune_events (user_id, event, occurred_at) VALUES ($1, $2, $3)",
        )
        .bind(user_id.as_str())
        .bind(&payload)
        .bind(event.at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        let cutoff = event.at.minus_secs(self.retention.max_age_secs);
        sqlx::query("DELETE FROM attune_events WHERE user_id = $1 AND occurred_at < $2")
            .bind(user_id.as_str())
            .bind(cutoff.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        sqlx::query(
            "DELETE FROM attune_events WHERE user_id = $1 AND id NOT IN \
             (SELECT id FROM attune_events WHERE user_id = $1 \
              ORDER BY occurred_at DESC, id DESC LIMIT $2)",
        )
        .bind(user_id.as_str())
        .bind(self.retention.max_events as i64)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn recent(
        &self,
        user_id: &UserId,
        limits: &WindowLimits,
        now: Timestamp,
    ) -> Result<Vec<InteractionEvent>, DomainError> {
        let cutoff = now.minus_secs(limits.max_age_secs);
        let rows = sqlx::query(
            "SELECT event, occurred_at FROM attune_events \
             WHERE user_id = $1 AND occurred_at >= $2 \
             ORDER BY occurred_at DESC, id DESC LIMIT $3",
        )
        .bind(user_id.as_str())
        .bind(cutoff.as_datetime())
        .bind(limits.max_events as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            let payload: String = row.try_get("event").map_err(storage_error)?;
            let occurred_at: chrono::DateTime<chrono::Utc> =
                row.try_get("occurred_at").map_err(storage_error)?;
            let kind = serde_json::from_str(&payload).map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to deserialize event: {}", e),
                )
            })?;
            events.push(InteractionEvent::new(
                Timestamp::from_datetime(occurred_at),
                kind,
            ));
        }
        events.reverse();
        Ok(events)
    }

    async fn len(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM attune_events WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;
        let total: i64 = row.try_get("total").map_err(storage_error)?;
        Ok(total as usize)
    }
}
