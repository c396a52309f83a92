//! In-memory profile repository.
//!
//! Default wiring for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::profile::NeurotypeProfile;
use crate::ports::ProfileRepository;

/// In-memory profile storage keyed by user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, NeurotypeProfile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: &NeurotypeProfile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(profile.user_id()) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Profile already exists for this user",
            ));
        }
        profiles.insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &NeurotypeProfile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        if !profiles.contains_key(profile.user_id()) {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                "No profile stored for this user",
            ));
        }
        profiles.insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<NeurotypeProfile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        if profiles.remove(user_id).is_none() {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                "No profile stored for this user",
            ));
        }
        Ok(())
    }

    async fn exists_for_user(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.profiles.read().await.contains_key(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn profile(user: &str) -> NeurotypeProfile {
        NeurotypeProfile::new(
            UserId::new(user).unwrap(),
            Timestamp::from_unix_secs(1_704_326_400),
        )
    }

    #[tokio::test]
    async fn create_then_find_roundtrips() {
        let repo = InMemoryProfileRepository::new();
        let stored = profile("user-1");
        repo.create(&stored).await.unwrap();

        let found = repo
            .find_by_user(&UserId::new("user-1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), stored.id());
    }

    #[tokio::test]
    async fn duplicate_create_conflicts() {
        let repo = InMemoryProfileRepository::new();
        repo.create(&profile("user-1")).await.unwrap();
        let err = repo.create(&profile("user-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn update_missing_profile_fails() {
        let repo = InMemoryProfileRepository::new();
        let err = repo.update(&profile("user-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }

    #[tokio::test]
    async fn delete_removes_profile() {
        let repo = InMemoryProfileRepository::new();
        let user = UserId::new("user-1").unwrap();
        repo.create(&profile("user-1")).await.unwrap();

        repo.delete(&user).await.unwrap();
        assert!(!repo.exists_for_user(&user).await.unwrap());
    }
}
