//! AuthRepository port for account and session operations.
//!
//! Wraps the auth backend. Adapters translate provider exceptions into a
//! [`DomainError`] whose message is ready to show to the user.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::foundation::DomainError;
use crate::domain::user::AuthAccount;

/// Account and session operations against the auth backend.
///
/// # Contract
///
/// Implementations must:
/// - Return the refreshed account from `login`, `login_with_google` and
///   `reload_user`, including the current `email_verified` flag
/// - Send a verification email as part of `register`
/// - Return `Ok(None)` from `check_session` when nobody is signed in
/// - Map a missing account after a call that should have produced one to
///   [`DomainError::unexpected`]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Sign in with email and password.
    async fn login(&self, email: &str, password: &str) -> Result<AuthAccount, DomainError>;

    /// Create an account, store its profile document and send the
    /// verification email.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthAccount, DomainError>;

    async fn sign_out(&self) -> Result<(), DomainError>;

    async fn send_password_reset_email(&self, email: &str) -> Result<(), DomainError>;

    /// Re-fetch the current account from the backend.
    async fn reload_user(&self) -> Result<AuthAccount, DomainError>;

    /// The persisted session, if any.
    async fn check_session(&self) -> Result<Option<AuthAccount>, DomainError>;

    /// Sign in with a Google ID token obtained by the platform UI.
    async fn login_with_google(&self, id_token: &str) -> Result<AuthAccount, DomainError>;

    async fn resend_verification_email(&self) -> Result<(), DomainError>;

    /// Copy the auth backend's verification flag into the profile document.
    async fn sync_verification_status(&self) -> Result<(), DomainError>;

    /// Emits the signed-in account (or `None`) every time the session
    /// changes, starting with the current state.
    fn auth_state_changes(&self) -> BoxStream<'static, Option<AuthAccount>>;
}
