//! PostgreSQL adapter for the revision audit trail.
//!
//! Insert-only access: the adapter exposes no update or delete path.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::profile::AttributeChangeRecord;
use crate::ports::AuditTrail;

/// PostgreSQL implementation of AuditTrail.
pub struct PgAuditTrail {
    pool: PgPool,
}

impl PgAuditTrail {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_error(err: sqlx::Error) -> DomainError {
    DomainError::storage_unavailable(format!("Audit trail unavailable: {}", err))
}

#[async_trait]
impl AuditTrail for PgAuditTrail {
    async fn append(&self, record: AttributeChangeRecord) -> Result<(), DomainError> {
        let document = serde_json::to_string(&record).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize change record: {}", e),
            )
        })?;

        sqlx::query(
            "INSERT INTO attune_audit (id, user_id, record, recorded_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(&document)
        .bind(record.recorded_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AttributeChangeRecord>, DomainError> {
        let rows = sqlx::query(
            "SELECT record FROM attune_audit WHERE user_id = $1 ORDER BY recorded_at ASC",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let document: String = row.try_get("record").map_err(storage_error)?;
            let record = serde_json::from_str(&document).map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to deserialize change record: {}", e),
                )
            })?;
            records.push(record);
        }
        Ok(records)
    }
}
