//! In-memory auth backend and profile documents.
//!
//! Accounts, sessions and profile documents are linked (registration
//! writes a profile, verification sync updates it, password changes
//! re-check the signed-in account), so a single store implements both
//! [`AuthRepository`] and [`ProfileRepository`].
//!
//! # Security Note
//!
//! This adapter is for **testing and development only**. Passwords are
//! kept in plain text and locks are taken with `.expect()`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use futures::stream::BoxStream;
use tokio::sync::watch;
use tracing::{debug, info};

use super::live::watch_stream;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{AuthAccount, User};
use crate::ports::{AuthRepository, ProfileRepository};

#[derive(Debug, Clone)]
struct AccountRecord {
    account: AuthAccount,
    password: String,
}

/// Auth backend plus the `users` collection, held in memory.
///
/// # Panics
///
/// Methods panic if an internal lock is poisoned.
#[derive(Debug)]
pub struct InMemoryAccountStore {
    /// Keyed by lowercased email
    accounts: RwLock<HashMap<String, AccountRecord>>,
    google_tokens: RwLock<HashMap<String, AuthAccount>>,
    profiles: RwLock<HashMap<UserId, User>>,
    session: watch::Sender<Option<AuthAccount>>,
    reset_emails: RwLock<Vec<String>>,
    verification_emails: RwLock<Vec<String>>,
    force_error: RwLock<Option<DomainError>>,
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            google_tokens: RwLock::new(HashMap::new()),
            profiles: RwLock::new(HashMap::new()),
            session,
            reset_emails: RwLock::new(Vec::new()),
            verification_emails: RwLock::new(Vec::new()),
            force_error: RwLock::new(None),
        }
    }

    // === Test Helpers ===

    /// Adds an existing account together with its profile document.
    pub fn with_account(self, name: &str, email: &str, password: &str, email_verified: bool) -> Self {
        self.insert_account(name, email, password, email_verified);
        self
    }

    /// Makes `id_token` sign in as `account`, creating its profile on first use.
    pub fn with_google_account(self, id_token: impl Into<String>, account: AuthAccount) -> Self {
        self.google_tokens
            .write()
            .expect("InMemoryAccountStore: google lock poisoned")
            .insert(id_token.into(), account);
        self
    }

    /// Forces every operation to fail with `error` until cleared.
    pub fn fail_with(&self, error: DomainError) {
        *self
            .force_error
            .write()
            .expect("InMemoryAccountStore: error lock poisoned") = Some(error);
    }

    pub fn clear_failure(&self) {
        *self
            .force_error
            .write()
            .expect("InMemoryAccountStore: error lock poisoned") = None;
    }

    /// Simulates the user clicking the verification link.
    ///
    /// Like the real backend, the signed-in account only reflects this
    /// after the next reload.
    pub fn verify_email(&self, email: &str) {
        let mut accounts = self
            .accounts
            .write()
            .expect("InMemoryAccountStore: accounts lock poisoned");
        if let Some(record) = accounts.get_mut(&normalize(email)) {
            record.account.email_verified = true;
        }
    }

    /// Simulates the backend revoking the current session.
    pub fn expire_session(&self) {
        self.session.send_replace(None);
    }

    pub fn current_account(&self) -> Option<AuthAccount> {
        self.session.borrow().clone()
    }

    pub fn profile(&self, user_id: &UserId) -> Option<User> {
        self.profiles
            .read()
            .expect("InMemoryAccountStore: profiles lock poisoned")
            .get(user_id)
            .cloned()
    }

    pub fn reset_emails_sent(&self) -> Vec<String> {
        self.reset_emails
            .read()
            .expect("InMemoryAccountStore: reset lock poisoned")
            .clone()
    }

    pub fn verification_emails_sent(&self) -> Vec<String> {
        self.verification_emails
            .read()
            .expect("InMemoryAccountStore: verification lock poisoned")
            .clone()
    }

    /// Number of live `auth_state_changes` streams.
    pub fn session_listener_count(&self) -> usize {
        self.session.receiver_count()
    }

    // === Internals ===

    fn check_failure(&self) -> Result<(), DomainError> {
        match self
            .force_error
            .read()
            .expect("InMemoryAccountStore: error lock poisoned")
            .clone()
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn insert_account(&self, name: &str, email: &str, password: &str, email_verified: bool) -> AuthAccount {
        let account = AuthAccount::new(
            UserId::generate(),
            email.trim(),
            Some(name.trim().to_string()),
            email_verified,
        );
        self.accounts
            .write()
            .expect("InMemoryAccountStore: accounts lock poisoned")
            .insert(
                normalize(email),
                AccountRecord {
                    account: account.clone(),
                    password: password.to_string(),
                },
            );
        self.ensure_profile(&account);
        account
    }

    fn ensure_profile(&self, account: &AuthAccount) {
        self.profiles
            .write()
            .expect("InMemoryAccountStore: profiles lock poisoned")
            .entry(account.uid.clone())
            .or_insert_with(|| {
                User::new(
                    account.uid.clone(),
                    account.display_name_or_email(),
                    account.email.clone(),
                )
                .with_email_verified(account.email_verified)
            });
    }

    fn record_for_session(&self) -> Result<AccountRecord, DomainError> {
        let current = self.current_account().ok_or_else(not_signed_in)?;
        let accounts = self
            .accounts
            .read()
            .expect("InMemoryAccountStore: accounts lock poisoned");
        match accounts.get(&normalize(&current.email)) {
            Some(record) => Ok(record.clone()),
            // Google accounts have no password record
            None => Ok(AccountRecord {
                account: current,
                password: String::new(),
            }),
        }
    }

    fn start_session(&self, account: &AuthAccount) {
        self.session.send_replace(Some(account.clone()));
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn not_signed_in() -> DomainError {
    DomainError::new(ErrorCode::NotAuthenticated, "Korisnik nije prijavljen.")
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::InvalidCredentials, "Neispravna e-mail adresa ili lozinka.")
}

#[async_trait]
impl AuthRepository for InMemoryAccountStore {
    async fn login(&self, email: &str, password: &str) -> Result<AuthAccount, DomainError> {
        self.check_failure()?;
        let record = self
            .accounts
            .read()
            .expect("InMemoryAccountStore: accounts lock poisoned")
            .get(&normalize(email))
            .cloned()
            .ok_or_else(invalid_credentials)?;
        if record.password != password {
            return Err(invalid_credentials());
        }

        self.start_session(&record.account);
        debug!(user_id = %record.account.uid, "Signed in");
        Ok(record.account)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthAccount, DomainError> {
        self.check_failure()?;
        let exists = self
            .accounts
            .read()
            .expect("InMemoryAccountStore: accounts lock poisoned")
            .contains_key(&normalize(email));
        if exists {
            return Err(DomainError::new(
                ErrorCode::EmailAlreadyInUse,
                "Ova e-mail adresa se već koristi.",
            ));
        }

        let account = self.insert_account(name, email, password, false);
        self.verification_emails
            .write()
            .expect("InMemoryAccountStore: verification lock poisoned")
            .push(account.email.clone());
        self.start_session(&account);
        info!(user_id = %account.uid, "Account registered");
        Ok(account)
    }

    async fn sign_out(&self) -> Result<(), DomainError> {
        self.check_failure()?;
        self.session.send_replace(None);
        Ok(())
    }

    async fn send_password_reset_email(&self, email: &str) -> Result<(), DomainError> {
        self.check_failure()?;
        let known = self
            .accounts
            .read()
            .expect("InMemoryAccountStore: accounts lock poisoned")
            .contains_key(&normalize(email));
        if !known {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                "Ne postoji korisnik s ovom e-mail adresom.",
            ));
        }
        self.reset_emails
            .write()
            .expect("InMemoryAccountStore: reset lock poisoned")
            .push(email.trim().to_string());
        Ok(())
    }

    async fn reload_user(&self) -> Result<AuthAccount, DomainError> {
        self.check_failure()?;
        let record = self.record_for_session()?;
        // Refresh the cached session copy without notifying listeners
        self.session.send_if_modified(|current| {
            *current = Some(record.account.clone());
            false
        });
        Ok(record.account)
    }

    async fn check_session(&self) -> Result<Option<AuthAccount>, DomainError> {
        self.check_failure()?;
        Ok(self.current_account())
    }

    async fn login_with_google(&self, id_token: &str) -> Result<AuthAccount, DomainError> {
        self.check_failure()?;
        let account = self
            .google_tokens
            .read()
            .expect("InMemoryAccountStore: google lock poisoned")
            .get(id_token)
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::InvalidCredentials, "Google prijava nije uspjela."))?;

        self.ensure_profile(&account);
        self.start_session(&account);
        Ok(account)
    }

    async fn resend_verification_email(&self) -> Result<(), DomainError> {
        self.check_failure()?;
        let current = self.current_account().ok_or_else(not_signed_in)?;
        self.verification_emails
            .write()
            .expect("InMemoryAccountStore: verification lock poisoned")
            .push(current.email);
        Ok(())
    }

    async fn sync_verification_status(&self) -> Result<(), DomainError> {
        self.check_failure()?;
        let record = self.record_for_session()?;
        let mut profiles = self
            .profiles
            .write()
            .expect("InMemoryAccountStore: profiles lock poisoned");
        let profile = profiles
            .get_mut(&record.account.uid)
            .ok_or_else(DomainError::unexpected)?;
        profile.is_email_verified = record.account.email_verified;
        Ok(())
    }

    fn auth_state_changes(&self) -> BoxStream<'static, Option<AuthAccount>> {
        watch_stream(self.session.subscribe())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryAccountStore {
    async fn get_user_profile(&self, user_id: &UserId) -> Result<User, DomainError> {
        self.check_failure()?;
        self.profile(user_id).ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, "Korisnik nije pronađen.")
                .with_detail("user_id", user_id.as_str())
        })
    }

    async fn update_user_profile(&self, user: &User) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut profiles = self
            .profiles
            .write()
            .expect("InMemoryAccountStore: profiles lock poisoned");
        match profiles.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                debug!(user_id = %user.id, "Profile document updated");
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::UserNotFound, "Korisnik nije pronađen.")
                .with_detail("user_id", user.id.as_str())),
        }
    }

    async fn reauthenticate_and_update_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        self.check_failure()?;
        let current = self.current_account().ok_or_else(not_signed_in)?;
        let mut accounts = self
            .accounts
            .write()
            .expect("InMemoryAccountStore: accounts lock poisoned");
        let record = accounts
            .get_mut(&normalize(&current.email))
            .ok_or_else(|| DomainError::new(ErrorCode::RecentLoginRequired, "Ponovno se prijavite."))?;
        if record.password != old_password {
            return Err(DomainError::new(
                ErrorCode::InvalidCredentials,
                "Trenutna lozinka nije ispravna.",
            ));
        }
        record.password = new_password.to_string();
        info!(user_id = %current.uid, "Password changed");
        Ok(())
    }
}
