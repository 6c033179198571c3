//! AuthViewModel - sign-up, sign-in and session state.
//!
//! Every operation follows the same shape: raise `is_loading`, call the
//! auth repository, fold the outcome into [`AuthUiState`], lower
//! `is_loading`. Navigation-worthy outcomes are also pushed as
//! [`AuthEvent`]s so the UI never has to inspect message text to route.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::application::state::{messages, OneShotQueue, StateStore, SubscriptionGuard, SubscriptionSlot};
use crate::domain::foundation::DomainError;
use crate::domain::user::AuthAccount;
use crate::domain::validation::{FormValidator, LoginValidation, SignupValidation, ValidationResult};
use crate::ports::{AuthRepository, CrashReporter};

const SCREEN_NAME: &str = "auth";

/// Rendering state of the auth screens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthUiState {
    pub is_loading: bool,
    pub user: Option<AuthAccount>,
    pub error_message: Option<String>,
    pub is_user_logged_in: bool,
    pub needs_verification: bool,
}

impl AuthUiState {
    /// Derive the session flags from a freshly loaded account.
    fn apply_account(&mut self, account: AuthAccount) {
        self.is_user_logged_in = account.email_verified;
        self.needs_verification = !account.email_verified;
        self.user = Some(account);
    }

    fn clear_session(&mut self) {
        self.user = None;
        self.is_user_logged_in = false;
        self.needs_verification = false;
    }
}

/// One-shot outcomes the UI reacts to, typically by navigating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn,
    /// The account exists but its email is not verified yet.
    VerificationRequired,
    VerificationEmailSent,
    PasswordResetSent,
    SignedOut,
}

/// Raw sign-up form input.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

pub struct AuthViewModel {
    auth: Arc<dyn AuthRepository>,
    crash_reporter: Arc<dyn CrashReporter>,
    state: StateStore<AuthUiState>,
    events: OneShotQueue<AuthEvent>,
    session_listener: SubscriptionSlot,
}

impl AuthViewModel {
    pub fn new(auth: Arc<dyn AuthRepository>, crash_reporter: Arc<dyn CrashReporter>) -> Self {
        crash_reporter.update_current_screen(SCREEN_NAME);
        Self {
            auth,
            crash_reporter,
            state: StateStore::new(AuthUiState::default()),
            events: OneShotQueue::new(),
            session_listener: SubscriptionSlot::new(),
        }
    }

    pub fn state(&self) -> AuthUiState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<AuthUiState> {
        self.state.subscribe()
    }

    /// Next pending event, consumed on read.
    pub fn take_event(&self) -> Option<AuthEvent> {
        self.events.take()
    }

    pub fn events(&self) -> &OneShotQueue<AuthEvent> {
        &self.events
    }

    /// Register a new account. Returns the form validation; the repository
    /// is only called when it is valid.
    pub async fn signup(&self, form: &SignupForm) -> SignupValidation {
        let validation =
            SignupValidation::validate(&form.name, &form.email, &form.password, &form.confirm_password);
        if !validation.is_valid() {
            debug!("Sign-up form rejected by validation");
            return validation;
        }

        self.begin();
        match self.auth.register(form.name.trim(), &form.email, &form.password).await {
            Ok(account) => {
                info!(user_id = %account.uid, "Account registered, awaiting verification");
                self.state.update(|s| {
                    s.is_loading = false;
                    s.error_message = None;
                    s.is_user_logged_in = false;
                    s.needs_verification = true;
                    s.user = Some(account);
                });
                self.events.push(AuthEvent::VerificationRequired);
            }
            Err(error) => self.fail(error),
        }
        validation
    }

    /// Sign in with email and password.
    ///
    /// An unverified account is not treated as logged in: the state gets
    /// `needs_verification` and [`AuthEvent::VerificationRequired`] is emitted.
    pub async fn login(&self, email: &str, password: &str) -> LoginValidation {
        let validation = LoginValidation::validate(email, password);
        if !validation.is_valid() {
            debug!("Login form rejected by validation");
            return validation;
        }

        self.begin();
        match self.auth.login(email, password).await {
            Ok(account) => self.complete_login(account).await,
            Err(error) => self.fail(error),
        }
        validation
    }

    pub async fn login_with_google(&self, id_token: &str) {
        self.begin();
        match self.auth.login_with_google(id_token).await {
            Ok(account) => self.complete_login(account).await,
            Err(error) => self.fail(error),
        }
    }

    pub async fn sign_out(&self) {
        self.begin();
        match self.auth.sign_out().await {
            Ok(()) => {
                info!("Signed out");
                self.state.set(AuthUiState::default());
                self.events.push(AuthEvent::SignedOut);
            }
            Err(error) => self.fail(error),
        }
    }

    /// Send a password reset link. Returns the email validation; nothing is
    /// sent for an invalid address.
    pub async fn forgot_password(&self, email: &str) -> ValidationResult {
        let validation = FormValidator::validate_email(email);
        if !validation.is_valid() {
            return validation;
        }

        self.begin();
        match self.auth.send_password_reset_email(email).await {
            Ok(()) => {
                self.finish();
                self.events.push(AuthEvent::PasswordResetSent);
            }
            Err(error) => self.fail(error),
        }
        validation
    }

    pub async fn resend_verification_email(&self) {
        self.begin();
        match self.auth.resend_verification_email().await {
            Ok(()) => {
                self.finish();
                self.events.push(AuthEvent::VerificationEmailSent);
            }
            Err(error) => self.fail(error),
        }
    }

    /// Restore a persisted session on app start.
    pub async fn check_session(&self) {
        self.begin();
        match self.auth.check_session().await {
            Ok(Some(account)) => {
                debug!(user_id = %account.uid, verified = account.email_verified, "Session restored");
                if account.email_verified {
                    self.crash_reporter.set_user_id(&account.uid);
                }
                self.state.update(|s| {
                    s.is_loading = false;
                    s.error_message = None;
                    s.apply_account(account);
                });
            }
            Ok(None) => {
                debug!("No persisted session");
                self.state.update(|s| {
                    s.is_loading = false;
                    s.clear_session();
                });
            }
            Err(error) => self.fail(error),
        }
    }

    /// Reload the account to pick up a verification done in another app
    /// (e.g. the mail client). Emits [`AuthEvent::LoggedIn`] once verified.
    pub async fn refresh_verification_status(&self) {
        self.begin();
        match self.auth.reload_user().await {
            Ok(account) if account.email_verified => self.complete_login(account).await,
            Ok(account) => {
                self.state.update(|s| {
                    s.is_loading = false;
                    s.apply_account(account);
                });
            }
            Err(error) => self.fail(error),
        }
    }

    /// Follow the backend's session stream for as long as this view model
    /// lives. Each change reloads the account and re-derives the session
    /// flags; a `None` emission or a failed reload means signed out.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_session_listener(&self) {
        let mut changes = self.auth.auth_state_changes();
        let auth = Arc::clone(&self.auth);
        let crash_reporter = Arc::clone(&self.crash_reporter);
        let state = self.state.clone();

        let handle = tokio::spawn(async move {
            while let Some(change) = changes.next().await {
                if change.is_none() {
                    debug!("Auth state changed: signed out");
                    state.update(AuthUiState::clear_session);
                    continue;
                }

                match auth.reload_user().await {
                    Ok(account) => {
                        debug!(user_id = %account.uid, verified = account.email_verified, "Auth state changed");
                        state.update(|s| s.apply_account(account));
                    }
                    Err(error) => {
                        warn!(error = %error, "Reloading account after auth state change failed");
                        crash_reporter.log_exception(&error);
                        state.update(AuthUiState::clear_session);
                    }
                }
            }
        });
        self.session_listener.replace(SubscriptionGuard::new(handle));
    }

    pub fn stop_session_listener(&self) {
        self.session_listener.cancel();
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error_message = None);
    }

    async fn complete_login(&self, account: AuthAccount) {
        if !account.email_verified {
            info!(user_id = %account.uid, "Login blocked until email is verified");
            self.state.update(|s| {
                s.is_loading = false;
                s.error_message = Some(messages::EMAIL_NOT_VERIFIED.to_string());
                s.apply_account(account);
            });
            self.events.push(AuthEvent::VerificationRequired);
            return;
        }

        info!(user_id = %account.uid, "Logged in");
        self.crash_reporter.set_user_id(&account.uid);
        if let Err(error) = self.auth.sync_verification_status().await {
            warn!(error = %error, "Could not sync verification status to profile");
            self.crash_reporter.log_exception(&error);
        }

        self.state.update(|s| {
            s.is_loading = false;
            s.error_message = None;
            s.apply_account(account);
        });
        self.events.push(AuthEvent::LoggedIn);
    }

    fn begin(&self) {
        self.state.update(|s| {
            s.is_loading = true;
            s.error_message = None;
        });
    }

    fn finish(&self) {
        self.state.update(|s| s.is_loading = false);
    }

    fn fail(&self, error: DomainError) {
        warn!(code = %error.code, "Auth operation failed");
        self.crash_reporter.log_exception(&error);
        self.state.update(|s| {
            s.is_loading = false;
            s.error_message = Some(error.message);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, UserId};
    use async_trait::async_trait;
    use futures::stream::BoxStream;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn receiver_stream<T: Send + 'static>(rx: mpsc::UnboundedReceiver<T>) -> BoxStream<'static, T> {
        futures::stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|item| (item, rx)) }).boxed()
    }

    fn account(verified: bool) -> AuthAccount {
        AuthAccount::new(UserId::new("user-1").unwrap(), "ana@example.com", None, verified)
    }

    #[derive(Default)]
    struct MockAuthRepository {
        login_result: Mutex<Option<Result<AuthAccount, DomainError>>>,
        reload_result: Mutex<Option<Result<AuthAccount, DomainError>>>,
        session: Mutex<Option<AuthAccount>>,
        calls: Mutex<Vec<&'static str>>,
        changes: Mutex<Option<mpsc::UnboundedReceiver<Option<AuthAccount>>>>,
    }

    impl MockAuthRepository {
        fn with_login(self, result: Result<AuthAccount, DomainError>) -> Self {
            *self.login_result.lock().unwrap() = Some(result);
            self
        }

        fn with_reload(self, result: Result<AuthAccount, DomainError>) -> Self {
            *self.reload_result.lock().unwrap() = Some(result);
            self
        }

        fn with_session(self, account: Option<AuthAccount>) -> Self {
            *self.session.lock().unwrap() = account;
            self
        }

        fn with_changes(self, rx: mpsc::UnboundedReceiver<Option<AuthAccount>>) -> Self {
            *self.changes.lock().unwrap() = Some(rx);
            self
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn login(&self, _email: &str, _password: &str) -> Result<AuthAccount, DomainError> {
            self.record("login");
            self.login_result
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err(DomainError::unexpected()))
        }

        async fn register(&self, _name: &str, _email: &str, _password: &str) -> Result<AuthAccount, DomainError> {
            self.record("register");
            Ok(account(false))
        }

        async fn sign_out(&self) -> Result<(), DomainError> {
            self.record("sign_out");
            Ok(())
        }

        async fn send_password_reset_email(&self, _email: &str) -> Result<(), DomainError> {
            self.record("send_password_reset_email");
            Ok(())
        }

        async fn reload_user(&self) -> Result<AuthAccount, DomainError> {
            self.record("reload_user");
            self.reload_result
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err(DomainError::unexpected()))
        }

        async fn check_session(&self) -> Result<Option<AuthAccount>, DomainError> {
            self.record("check_session");
            Ok(self.session.lock().unwrap().clone())
        }

        async fn login_with_google(&self, _id_token: &str) -> Result<AuthAccount, DomainError> {
            self.record("login_with_google");
            Ok(account(true))
        }

        async fn resend_verification_email(&self) -> Result<(), DomainError> {
            self.record("resend_verification_email");
            Ok(())
        }

        async fn sync_verification_status(&self) -> Result<(), DomainError> {
            self.record("sync_verification_status");
            Ok(())
        }

        fn auth_state_changes(&self) -> BoxStream<'static, Option<AuthAccount>> {
            match self.changes.lock().unwrap().take() {
                Some(rx) => receiver_stream(rx),
                None => futures::stream::empty().boxed(),
            }
        }
    }

    #[derive(Default)]
    struct RecordingCrashReporter {
        exceptions: Mutex<Vec<ErrorCode>>,
        user_ids: Mutex<Vec<String>>,
    }

    impl CrashReporter for RecordingCrashReporter {
        fn log_exception(&self, error: &DomainError) {
            self.exceptions.lock().unwrap().push(error.code);
        }

        fn set_user_id(&self, user_id: &UserId) {
            self.user_ids.lock().unwrap().push(user_id.to_string());
        }

        fn update_current_screen(&self, _screen_name: &str) {}
    }

    fn view_model(repo: MockAuthRepository) -> (AuthViewModel, Arc<MockAuthRepository>, Arc<RecordingCrashReporter>) {
        let repo = Arc::new(repo);
        let reporter = Arc::new(RecordingCrashReporter::default());
        let vm = AuthViewModel::new(repo.clone(), reporter.clone());
        (vm, repo, reporter)
    }

    #[tokio::test]
    async fn login_with_unverified_account_requires_verification() {
        let (vm, _repo, _reporter) = view_model(MockAuthRepository::default().with_login(Ok(account(false))));

        let validation = vm.login("ana@example.com", "tajna123").await;

        assert!(validation.is_valid());
        let state = vm.state();
        assert!(!state.is_user_logged_in);
        assert!(state.needs_verification);
        assert!(!state.is_loading);
        assert_eq!(state.error_message.as_deref(), Some(messages::EMAIL_NOT_VERIFIED));
        assert_eq!(vm.take_event(), Some(AuthEvent::VerificationRequired));
        assert_eq!(vm.take_event(), None);
    }

    #[tokio::test]
    async fn login_with_verified_account_logs_in() {
        let (vm, repo, reporter) = view_model(MockAuthRepository::default().with_login(Ok(account(true))));

        vm.login("ana@example.com", "tajna123").await;

        let state = vm.state();
        assert!(state.is_user_logged_in);
        assert!(!state.needs_verification);
        assert_eq!(state.error_message, None);
        assert_eq!(vm.take_event(), Some(AuthEvent::LoggedIn));
        assert_eq!(repo.calls(), vec!["login", "sync_verification_status"]);
        assert_eq!(*reporter.user_ids.lock().unwrap(), vec!["user-1".to_string()]);
    }

    #[tokio::test]
    async fn invalid_login_form_never_reaches_repository() {
        let (vm, repo, _reporter) = view_model(MockAuthRepository::default());

        let validation = vm.login("not-an-email", "123").await;

        assert!(!validation.is_valid());
        assert!(repo.calls().is_empty());
        assert!(!vm.state().is_loading);
    }

    #[tokio::test]
    async fn login_failure_surfaces_message_and_reports() {
        let error = DomainError::new(ErrorCode::InvalidCredentials, "Pogrešan e-mail ili lozinka.");
        let (vm, _repo, reporter) = view_model(MockAuthRepository::default().with_login(Err(error)));

        vm.login("ana@example.com", "tajna123").await;

        let state = vm.state();
        assert!(!state.is_loading);
        assert!(!state.is_user_logged_in);
        assert_eq!(state.error_message.as_deref(), Some("Pogrešan e-mail ili lozinka."));
        assert_eq!(*reporter.exceptions.lock().unwrap(), vec![ErrorCode::InvalidCredentials]);
        assert_eq!(vm.take_event(), None);
    }

    #[tokio::test]
    async fn signup_leaves_user_pending_verification() {
        let (vm, repo, _reporter) = view_model(MockAuthRepository::default());
        let form = SignupForm {
            name: "Ana Kovač".to_string(),
            email: "ana@example.com".to_string(),
            password: "tajna123".to_string(),
            confirm_password: "tajna123".to_string(),
        };

        let validation = vm.signup(&form).await;

        assert!(validation.is_valid());
        assert_eq!(repo.calls(), vec!["register"]);
        let state = vm.state();
        assert!(state.needs_verification);
        assert!(!state.is_user_logged_in);
        assert_eq!(vm.take_event(), Some(AuthEvent::VerificationRequired));
    }

    #[tokio::test]
    async fn signup_with_mismatched_passwords_is_rejected_locally() {
        let (vm, repo, _reporter) = view_model(MockAuthRepository::default());
        let form = SignupForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "tajna123".to_string(),
            confirm_password: "tajna321".to_string(),
        };

        let validation = vm.signup(&form).await;

        assert!(!validation.is_valid());
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn forgot_password_validates_email_first() {
        let (vm, repo, _reporter) = view_model(MockAuthRepository::default());

        assert!(!vm.forgot_password("").await.is_valid());
        assert!(repo.calls().is_empty());

        assert!(vm.forgot_password("ana@example.com").await.is_valid());
        assert_eq!(repo.calls(), vec!["send_password_reset_email"]);
        assert_eq!(vm.take_event(), Some(AuthEvent::PasswordResetSent));
    }

    #[tokio::test]
    async fn sign_out_resets_state() {
        let (vm, _repo, _reporter) = view_model(MockAuthRepository::default().with_login(Ok(account(true))));
        vm.login("ana@example.com", "tajna123").await;
        vm.take_event();

        vm.sign_out().await;

        assert_eq!(vm.state(), AuthUiState::default());
        assert_eq!(vm.take_event(), Some(AuthEvent::SignedOut));
    }

    #[tokio::test]
    async fn check_session_derives_flags_from_verification() {
        let (vm, _repo, _reporter) = view_model(MockAuthRepository::default().with_session(Some(account(true))));
        vm.check_session().await;
        assert!(vm.state().is_user_logged_in);

        let (vm, _repo, _reporter) = view_model(MockAuthRepository::default().with_session(Some(account(false))));
        vm.check_session().await;
        assert!(!vm.state().is_user_logged_in);
        assert!(vm.state().needs_verification);

        let (vm, _repo, _reporter) = view_model(MockAuthRepository::default());
        vm.check_session().await;
        assert!(vm.state().user.is_none());
        assert!(!vm.state().is_user_logged_in);
    }

    #[tokio::test]
    async fn refresh_verification_logs_in_once_verified() {
        let (vm, repo, _reporter) = view_model(MockAuthRepository::default().with_reload(Ok(account(true))));

        vm.refresh_verification_status().await;

        assert!(vm.state().is_user_logged_in);
        assert_eq!(vm.take_event(), Some(AuthEvent::LoggedIn));
        assert_eq!(repo.calls(), vec!["reload_user", "sync_verification_status"]);
    }

    #[tokio::test]
    async fn google_login_is_logged_in() {
        let (vm, _repo, _reporter) = view_model(MockAuthRepository::default());
        vm.login_with_google("google-token").await;
        assert!(vm.state().is_user_logged_in);
    }

    #[tokio::test]
    async fn resend_verification_email_emits_event() {
        let (vm, _repo, _reporter) = view_model(MockAuthRepository::default());
        vm.resend_verification_email().await;
        assert_eq!(vm.take_event(), Some(AuthEvent::VerificationEmailSent));
    }

    #[tokio::test]
    async fn session_listener_rederives_flags_on_change() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (vm, _repo, _reporter) = view_model(
            MockAuthRepository::default()
                .with_changes(rx)
                .with_reload(Ok(account(true))),
        );
        let mut updates = vm.subscribe();
        vm.start_session_listener();

        tx.send(Some(account(false))).unwrap();
        let state = tokio::time::timeout(
            Duration::from_secs(1),
            updates.wait_for(|s| s.is_user_logged_in),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert!(!state.needs_verification);

        // Session expiry
        tx.send(None).unwrap();
        tokio::time::timeout(
            Duration::from_secs(1),
            updates.wait_for(|s| !s.is_user_logged_in && s.user.is_none()),
        )
        .await
        .unwrap()
        .unwrap();
    }

    #[tokio::test]
    async fn dropping_view_model_stops_listener() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (vm, _repo, _reporter) = view_model(MockAuthRepository::default().with_changes(rx));
        vm.start_session_listener();

        drop(vm);

        tokio::time::timeout(Duration::from_secs(1), tx.closed())
            .await
            .unwrap();
    }
}
