//! GetProfile - read-only profile summary.

use std::sync::Arc;

use crate::domain::foundation::{
    Confidence, ConfidenceBand, DomainError, ProfileId, Timestamp, UserId,
};
use crate::domain::profile::AttributeSnapshot;
use crate::ports::ProfileRepository;

/// Query for a profile summary.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

/// Read-only profile view.
#[derive(Debug, Clone)]
pub struct ProfileSummary {
    pub profile_id: ProfileId,
    pub template: String,
    pub version: u32,
    pub attributes: Vec<AttributeSnapshot>,
    pub overall_confidence: Confidence,
    pub overall_band: ConfidenceBand,
    pub updated_at: Timestamp,
}

/// Handler for profile summary queries.
pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(
        &self,
        query: GetProfileQuery,
    ) -> Result<Option<ProfileSummary>, DomainError> {
        let Some(profile) = self.profiles.find_by_user(&query.user_id).await? else {
            return Ok(None);
        };

        let attributes = profile.snapshot();
        let set: Vec<&AttributeSnapshot> =
            attributes.iter().filter(|a| a.value.is_some()).collect();
        let overall_confidence = if set.is_empty() {
            Confidence::ZERO
        } else {
            Confidence::clamped(
                set.iter().map(|a| a.confidence.value()).sum::<f32>() / set.len() as f32,
            )
        };

        Ok(Some(ProfileSummary {
            profile_id: profile.id(),
            template: profile.template().to_string(),
            version: profile.version().as_u32(),
            overall_band: overall_confidence.band(),
            overall_confidence,
            attributes,
            updated_at: profile.updated_at(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileRepository;
    use crate::domain::profile::{AdhdType, AttributeValue, NeurotypeProfile};
    use crate::ports::ProfileRepository as _;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn missing_profile_returns_none() {
        let handler = GetProfileHandler::new(Arc::new(InMemoryProfileRepository::new()));
        let summary = handler
            .handle(GetProfileQuery { user_id: user() })
            .await
            .unwrap();
        assert!(summary.is_none());
    }

    #[tokio::test]
    async fn summary_averages_set_attribute_confidence() {
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let mut profile = NeurotypeProfile::new(user(), Timestamp::now());
        profile
            .set_assessed(
                AttributeValue::AdhdType(AdhdType::Combined),
                Confidence::new(0.8).unwrap(),
                Timestamp::now(),
            )
            .unwrap();
        profiles.create(&profile).await.unwrap();

        let handler = GetProfileHandler::new(profiles);
        let summary = handler
            .handle(GetProfileQuery { user_id: user() })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(summary.overall_confidence, Confidence::new(0.8).unwrap());
        assert_eq!(summary.overall_band, ConfidenceBand::Good);
        assert_eq!(summary.attributes.len(), 16);
    }
}
