//! DeleteProfile - explicit user-initiated profile deletion.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ProfileRepository;

/// Command to delete a profile. Only ever issued on explicit user
/// request; nothing in the engine deletes profiles automatically.
#[derive(Debug, Clone)]
pub struct DeleteProfileCommand {
    pub user_id: UserId,
}

/// Handler for profile deletion.
pub struct DeleteProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl DeleteProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, cmd: DeleteProfileCommand) -> Result<(), DomainError> {
        self.profiles.delete(&cmd.user_id).await?;
        info!(user_id = %cmd.user_id, "profile deleted on user request");
        Ok(())
    }
}
