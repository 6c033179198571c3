//! ProfileRepository port for profile persistence operations

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Repository for user profile documents.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load a profile. Missing documents are an error with
    /// [`crate::domain::foundation::ErrorCode::UserNotFound`].
    async fn get_user_profile(&self, user_id: &UserId) -> Result<User, DomainError>;

    /// Overwrite the profile document with `user`.
    async fn update_user_profile(&self, user: &User) -> Result<(), DomainError>;

    /// Re-authenticate the signed-in account with `old_password`, then set
    /// `new_password`. Nothing changes if re-authentication fails.
    async fn reauthenticate_and_update_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError>;
}
