//! ChangePasswordViewModel - re-authenticate and set a new password.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::application::state::{messages, StateStore};
use crate::domain::foundation::DomainError;
use crate::domain::validation::{ChangePasswordValidation, ValidationErrorType};
use crate::ports::{CrashReporter, ProfileRepository};

const SCREEN_NAME: &str = "change_password";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct ChangePasswordFormState {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub old_password_error: Option<ValidationErrorType>,
    pub new_password_error: Option<ValidationErrorType>,
    pub confirm_password_error: Option<ValidationErrorType>,
    pub is_loading: bool,
}

impl ChangePasswordFormState {
    fn apply_validation(&mut self, validation: &ChangePasswordValidation) {
        self.old_password_error = validation.old_password.error();
        self.new_password_error = validation.new_password.error();
        self.confirm_password_error = validation.confirm_password.error();
    }
}

impl fmt::Debug for ChangePasswordFormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordFormState")
            .field("old_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("old_password_error", &self.old_password_error)
            .field("new_password_error", &self.new_password_error)
            .field("confirm_password_error", &self.confirm_password_error)
            .field("is_loading", &self.is_loading)
            .finish()
    }
}

/// What the screen should do after a successful change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangePasswordOutcome {
    NavigateBack,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChangePasswordError {
    #[error("{}", messages::FORM_INVALID)]
    InvalidForm,

    #[error("{}", .0.message)]
    Repository(#[from] DomainError),
}

pub struct ChangePasswordViewModel {
    profiles: Arc<dyn ProfileRepository>,
    crash_reporter: Arc<dyn CrashReporter>,
    form_state: StateStore<ChangePasswordFormState>,
}

impl ChangePasswordViewModel {
    pub fn new(profiles: Arc<dyn ProfileRepository>, crash_reporter: Arc<dyn CrashReporter>) -> Self {
        crash_reporter.update_current_screen(SCREEN_NAME);
        Self {
            profiles,
            crash_reporter,
            form_state: StateStore::default(),
        }
    }

    pub fn form_state(&self) -> ChangePasswordFormState {
        self.form_state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<ChangePasswordFormState> {
        self.form_state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.form_state.get().is_loading
    }

    pub fn on_old_password_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.old_password = value;
            f.old_password_error = None;
        });
    }

    pub fn on_new_password_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.new_password = value;
            f.new_password_error = None;
        });
    }

    pub fn on_confirm_password_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.confirm_password = value;
            f.confirm_password_error = None;
        });
    }

    pub async fn change_password(&self) -> Result<ChangePasswordOutcome, ChangePasswordError> {
        let (old_password, new_password) = self.form_state.modify(|form| {
            let validation = ChangePasswordValidation::validate(
                &form.old_password,
                &form.new_password,
                &form.confirm_password,
            );
            form.apply_validation(&validation);
            if !validation.is_valid() {
                return Err(ChangePasswordError::InvalidForm);
            }
            form.is_loading = true;
            Ok((form.old_password.clone(), form.new_password.clone()))
        })?;

        let result = self
            .profiles
            .reauthenticate_and_update_password(&old_password, &new_password)
            .await;
        self.form_state.update(|f| f.is_loading = false);

        match result {
            Ok(()) => {
                info!("Password changed");
                self.form_state.set(ChangePasswordFormState::default());
                Ok(ChangePasswordOutcome::NavigateBack)
            }
            Err(error) => {
                warn!(code = %error.code, "Changing password failed");
                self.crash_reporter.log_exception(&error);
                Err(error.into())
            }
        }
    }
}
