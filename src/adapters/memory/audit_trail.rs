//! In-memory append-only audit trail.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::AttributeChangeRecord;
use crate::ports::AuditTrail;

/// In-memory audit trail keyed by user. Append-only by construction:
/// no mutating accessors beyond `append`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditTrail {
    records: Arc<RwLock<HashMap<UserId, Vec<AttributeChangeRecord>>>>,
}

impl InMemoryAuditTrail {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditTrail for InMemoryAuditTrail {
    async fn append(&self, record: AttributeChangeRecord) -> Result<(), DomainError> {
        self.records
            .write()
            .await
            .entry(record.user_id.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AttributeChangeRecord>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}
