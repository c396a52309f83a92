//! Profile command and query handlers.

mod delete_profile;
mod get_profile;

pub use delete_profile::{DeleteProfileCommand, DeleteProfileHandler};
pub use get_profile::{GetProfileHandler, GetProfileQuery, ProfileSummary};
