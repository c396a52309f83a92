//! AuditTrail port: append-only record of learning loop revisions.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::AttributeChangeRecord;

/// Append-only audit trail.
///
/// Records are never modified or deleted once appended.
#[async_trait]
pub trait AuditTrail: Send + Sync {
    /// Appends one change record.
    async fn append(&self, record: AttributeChangeRecord) -> Result<(), DomainError>;

    /// Returns every record for a user, oldest first.
    async fn for_user(&self, user_id: &UserId)
        -> Result<Vec<AttributeChangeRecord>, DomainError>;
}
