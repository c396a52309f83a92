//! ProfileRepository port for profile persistence operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::NeurotypeProfile;

/// Repository for neurotype profiles: one record per profile.
///
/// Adapter failures surface as `StorageUnavailable` so the interactive
/// path can fall back instead of crashing the caller's turn.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persists a new profile.
    async fn create(&self, profile: &NeurotypeProfile) -> Result<(), DomainError>;

    /// Replaces the stored profile with a newer committed version.
    async fn update(&self, profile: &NeurotypeProfile) -> Result<(), DomainError>;

    /// Finds the profile owned by a user.
    async fn find_by_user(&self, user_id: &UserId)
        -> Result<Option<NeurotypeProfile>, DomainError>;

    /// Deletes the profile completely (explicit user action only).
    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Checks whether a profile exists for the user.
    async fn exists_for_user(&self, user_id: &UserId) -> Result<bool, DomainError>;
}
