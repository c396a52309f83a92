//! PostgreSQL adapter for ProfileRepository.
//!
//! One row per profile; the aggregate is stored as a JSON document next
//! to the columns the queries filter on. Schema provisioning is owned by
//! the deployment, not this crate.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::profile::NeurotypeProfile;
use crate::ports::ProfileRepository;

/// PostgreSQL implementation of ProfileRepository.
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn serialize(profile: &NeurotypeProfile) -> Result<String, DomainError> {
        serde_json::to_string(profile).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize profile: {}", e),
            )
        })
    }

    fn deserialize(raw: &str) -> Result<NeurotypeProfile, DomainError> {
        serde_json::from_str(raw).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to deserialize profile: {}", e),
            )
        })
    }
}

fn storage_error(err: sqlx::Error) -> DomainError {
    DomainError::storage_unavailable(format!("Profile store unavailable: {}", err))
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn create(&self, profile: &NeurotypeProfile) -> Result<(), DomainError> {
        let document = Self::serialize(profile)?;
        let result = sqlx::query(
            "INSERT INTO attune_profiles (user_id, profile, version, updated_at) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(profile.user_id().as_str())
        .bind(&document)
        .bind(profile.version().as_u32() as i32)
        .bind(profile.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Profile already exists for this user",
            ));
        }
        Ok(())
    }

    async fn update(&self, profile: &NeurotypeProfile) -> Result<(), DomainError> {
        let document = Self::serialize(profile)?;
        let result = sqlx::query(
            "UPDATE attune_profiles SET profile = $2, version = $3, updated_at = $4 \
             WHERE user_id = $1",
        )
        .bind(profile.user_id().as_str())
        .bind(&document)
        .bind(profile.version().as_u32() as i32)
        .bind(profile.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                "No profile stored for this user",
            ));
        }
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<NeurotypeProfile>, DomainError> {
        let row = sqlx::query("SELECT profile FROM attune_profiles WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        match row {
            Some(row) => {
                let document: String = row.try_get("profile").map_err(storage_error)?;
                Ok(Some(Self::deserialize(&document)?))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM attune_profiles WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                "No profile stored for this user",
            ));
        }
        Ok(())
    }

    async fn exists_for_user(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT 1 AS present FROM attune_profiles WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(row.is_some())
    }
}
