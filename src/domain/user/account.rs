//! Signed-in account as reported by the auth backend.

use crate::domain::foundation::UserId;

/// The auth provider's view of the current account.
///
/// This is separate from [`super::User`]: the profile document lives in the
/// database, while verification state is owned by the auth backend and only
/// becomes fresh after a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthAccount {
    pub uid: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

impl AuthAccount {
    pub fn new(
        uid: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        email_verified: bool,
    ) -> Self {
        Self {
            uid,
            email: email.into(),
            display_name,
            email_verified,
        }
    }

    /// Returns the display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}
