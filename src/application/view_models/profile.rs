//! ProfileViewModel - profile screen state and the editable profile draft.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::state::{messages, StateStore, UiState};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{ProfileDetails, User};
use crate::domain::validation::{FormValidator, ProfileEditValidation, ValidationErrorType, ValidationResult};
use crate::ports::{CrashReporter, ImageStorage, ProfileRepository};

const SCREEN_NAME: &str = "profile";

/// Draft of the profile edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFormState {
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub name_error: Option<ValidationErrorType>,
    pub phone_error: Option<ValidationErrorType>,
    pub street_error: Option<ValidationErrorType>,
    pub city_error: Option<ValidationErrorType>,
    pub zip_error: Option<ValidationErrorType>,
    pub is_saving: bool,
}

impl ProfileFormState {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            phone: user.phone.clone(),
            street: user.street.clone(),
            city: user.city.clone(),
            zip: user.zip.clone(),
            ..Self::default()
        }
    }

    pub fn details(&self) -> ProfileDetails {
        ProfileDetails {
            name: self.name.clone(),
            phone: self.phone.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            zip: self.zip.clone(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.name_error.is_some()
            || self.phone_error.is_some()
            || self.street_error.is_some()
            || self.city_error.is_some()
            || self.zip_error.is_some()
    }

    fn validate(&self) -> ProfileEditValidation {
        ProfileEditValidation::validate(&self.name, &self.phone, &self.street, &self.city, &self.zip)
    }

    fn apply_validation(&mut self, validation: &ProfileEditValidation) {
        self.name_error = validation.name.error();
        self.phone_error = validation.phone.error();
        self.street_error = validation.street.error();
        self.city_error = validation.city.error();
        self.zip_error = validation.zip.error();
    }
}

/// Why a profile save did not go through.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileSaveError {
    #[error("{}", messages::FORM_INVALID)]
    InvalidForm,

    #[error("{}", messages::PROFILE_NOT_LOADED)]
    NotLoaded,

    #[error("{}", .0.message)]
    Repository(#[from] DomainError),
}

pub struct ProfileViewModel {
    profiles: Arc<dyn ProfileRepository>,
    images: Arc<dyn ImageStorage>,
    crash_reporter: Arc<dyn CrashReporter>,
    ui_state: StateStore<UiState<User>>,
    form_state: StateStore<ProfileFormState>,
}

impl ProfileViewModel {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        images: Arc<dyn ImageStorage>,
        crash_reporter: Arc<dyn CrashReporter>,
    ) -> Self {
        crash_reporter.update_current_screen(SCREEN_NAME);
        Self {
            profiles,
            images,
            crash_reporter,
            ui_state: StateStore::new(UiState::Loading),
            form_state: StateStore::new(ProfileFormState::default()),
        }
    }

    pub fn ui_state(&self) -> UiState<User> {
        self.ui_state.get()
    }

    pub fn form_state(&self) -> ProfileFormState {
        self.form_state.get()
    }

    pub fn subscribe_ui_state(&self) -> tokio::sync::watch::Receiver<UiState<User>> {
        self.ui_state.subscribe()
    }

    pub fn subscribe_form_state(&self) -> tokio::sync::watch::Receiver<ProfileFormState> {
        self.form_state.subscribe()
    }

    /// Load the profile and seed the draft from it.
    pub async fn load_profile(&self, user_id: &UserId) {
        self.ui_state.set(UiState::Loading);
        match self.profiles.get_user_profile(user_id).await {
            Ok(user) => {
                debug!(user_id = %user.id, "Profile loaded");
                self.form_state.set(ProfileFormState::from_user(&user));
                self.ui_state.set(UiState::Success(user));
            }
            Err(error) => {
                warn!(user_id = %user_id, code = %error.code, "Loading profile failed");
                self.crash_reporter.log_exception(&error);
                self.ui_state.set(UiState::Error(error.message));
            }
        }
    }

    // === Field edits: store the value, clear that field's error ===

    pub fn on_name_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.name = value;
            f.name_error = None;
        });
    }

    pub fn on_phone_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.phone = value;
            f.phone_error = None;
        });
    }

    pub fn on_street_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.street = value;
            f.street_error = None;
        });
    }

    pub fn on_city_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.city = value;
            f.city_error = None;
        });
    }

    pub fn on_zip_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.zip = value;
            f.zip_error = None;
        });
    }

    // === Focus-loss validation ===

    pub fn validate_name(&self) -> ValidationResult {
        self.form_state.modify(|f| {
            let result = FormValidator::validate_name(&f.name);
            f.name_error = result.error();
            result
        })
    }

    pub fn validate_phone(&self) -> ValidationResult {
        self.form_state.modify(|f| {
            let result = FormValidator::validate_phone(&f.phone);
            f.phone_error = result.error();
            result
        })
    }

    pub fn validate_street(&self) -> ValidationResult {
        self.form_state.modify(|f| {
            let result = FormValidator::validate_street(&f.street);
            f.street_error = result.error();
            result
        })
    }

    pub fn validate_city(&self) -> ValidationResult {
        self.form_state.modify(|f| {
            let result = FormValidator::validate_city(&f.city);
            f.city_error = result.error();
            result
        })
    }

    pub fn validate_zip(&self) -> ValidationResult {
        self.form_state.modify(|f| {
            let result = FormValidator::validate_zip(&f.zip);
            f.zip_error = result.error();
            result
        })
    }

    /// Validate every field and, if the draft is valid, write it back.
    ///
    /// An invalid draft fills in all error fields and never reaches the
    /// repository. Edits made while the save is in flight stay in the
    /// draft; they are not part of this save.
    pub async fn save_profile(&self) -> Result<User, ProfileSaveError> {
        let current = self.ui_state.get().into_data();

        let (user, details) = self.form_state.modify(|form| {
            let validation = form.validate();
            form.apply_validation(&validation);
            if !validation.is_valid() {
                return Err(ProfileSaveError::InvalidForm);
            }
            let user = current.ok_or(ProfileSaveError::NotLoaded)?;
            form.is_saving = true;
            Ok((user, form.details()))
        })?;

        let updated = user.with_details(&details);
        let result = self.profiles.update_user_profile(&updated).await;
        self.form_state.update(|f| f.is_saving = false);

        match result {
            Ok(()) => {
                info!(user_id = %updated.id, "Profile saved");
                self.ui_state.set(UiState::Success(updated.clone()));
                Ok(updated)
            }
            Err(error) => {
                warn!(user_id = %updated.id, code = %error.code, "Saving profile failed");
                self.crash_reporter.log_exception(&error);
                Err(ProfileSaveError::Repository(error))
            }
        }
    }

    /// Upload a new profile picture and point the profile at it.
    ///
    /// The previous picture is deleted once the profile is updated; if the
    /// update fails the freshly uploaded file is deleted instead.
    pub async fn update_profile_image(&self, local_uri: &str) -> Result<User, ProfileSaveError> {
        let user = self.ui_state.get().into_data().ok_or(ProfileSaveError::NotLoaded)?;
        self.form_state.update(|f| f.is_saving = true);

        let result = self.replace_profile_image(&user, local_uri).await;
        self.form_state.update(|f| f.is_saving = false);

        match result {
            Ok(updated) => {
                self.ui_state.set(UiState::Success(updated.clone()));
                Ok(updated)
            }
            Err(error) => {
                warn!(user_id = %user.id, code = %error.code, "Updating profile image failed");
                self.crash_reporter.log_exception(&error);
                Err(ProfileSaveError::Repository(error))
            }
        }
    }

    async fn replace_profile_image(&self, user: &User, local_uri: &str) -> Result<User, DomainError> {
        let url = self.images.upload_image(local_uri).await?;
        let updated = user.with_profile_image(url.clone());

        if let Err(error) = self.profiles.update_user_profile(&updated).await {
            self.delete_image_quietly(&url).await;
            return Err(error);
        }

        if let Some(previous) = &user.profile_image_url {
            self.delete_image_quietly(previous).await;
        }
        info!(user_id = %updated.id, "Profile image updated");
        Ok(updated)
    }

    async fn delete_image_quietly(&self, url: &str) {
        if let Err(error) = self.images.delete_image(url).await {
            warn!(code = %error.code, "Deleting stale profile image failed");
            self.crash_reporter.log_exception(&error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::NoopCrashReporter;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockProfileRepository {
        user: Mutex<Option<User>>,
        update_calls: Mutex<Vec<User>>,
        should_fail: bool,
    }

    impl MockProfileRepository {
        fn with_user(user: User) -> Self {
            Self {
                user: Mutex::new(Some(user)),
                update_calls: Mutex::new(Vec::new()),
                should_fail: false,
            }
        }

        fn failing(mut self) -> Self {
            self.should_fail = true;
            self
        }

        fn update_count(&self) -> usize {
            self.update_calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ProfileRepository for MockProfileRepository {
        async fn get_user_profile(&self, _user_id: &UserId) -> Result<User, DomainError> {
            self.user
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "Korisnik nije pronađen."))
        }

        async fn update_user_profile(&self, user: &User) -> Result<(), DomainError> {
            self.update_calls.lock().unwrap().push(user.clone());
            if self.should_fail {
                return Err(DomainError::new(ErrorCode::DatabaseError, "Spremanje nije uspjelo."));
            }
            *self.user.lock().unwrap() = Some(user.clone());
            Ok(())
        }

        async fn reauthenticate_and_update_password(&self, _old: &str, _new: &str) -> Result<(), DomainError> {
            unimplemented!()
        }
    }

    #[derive(Default)]
    struct MockImageStorage {
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ImageStorage for MockImageStorage {
        async fn upload_image(&self, uri: &str) -> Result<String, DomainError> {
            Ok(format!("https://cdn.example.com/{}", uri.rsplit('/').next().unwrap_or(uri)))
        }

        async fn delete_image(&self, url: &str) -> Result<(), DomainError> {
            self.deleted.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn test_user() -> User {
        User {
            id: UserId::new("user-1").unwrap(),
            name: "Ana Kovač".to_string(),
            email: "ana@example.com".to_string(),
            phone: "+385911234567".to_string(),
            street: "Ilica 12".to_string(),
            city: "Zagreb".to_string(),
            zip: "10000".to_string(),
            ..User::default()
        }
    }

    fn view_model(repo: Arc<MockProfileRepository>) -> (ProfileViewModel, Arc<MockImageStorage>) {
        let images = Arc::new(MockImageStorage::default());
        let vm = ProfileViewModel::new(repo, images.clone(), Arc::new(NoopCrashReporter));
        (vm, images)
    }

    async fn loaded(repo: Arc<MockProfileRepository>) -> (ProfileViewModel, Arc<MockImageStorage>) {
        let (vm, images) = view_model(repo);
        vm.load_profile(&UserId::new("user-1").unwrap()).await;
        (vm, images)
    }

    #[tokio::test]
    async fn load_success_seeds_draft() {
        let (vm, _) = loaded(Arc::new(MockProfileRepository::with_user(test_user()))).await;

        assert_eq!(vm.ui_state(), UiState::Success(test_user()));
        let form = vm.form_state();
        assert_eq!(form.name, "Ana Kovač");
        assert_eq!(form.zip, "10000");
        assert!(!form.has_errors());
    }

    #[tokio::test]
    async fn load_failure_shows_error() {
        let repo = Arc::new(MockProfileRepository {
            user: Mutex::new(None),
            update_calls: Mutex::new(Vec::new()),
            should_fail: false,
        });
        let (vm, _) = loaded(repo).await;

        assert_eq!(vm.ui_state().error_message(), Some("Korisnik nije pronađen."));
    }

    #[tokio::test]
    async fn save_with_blank_name_never_calls_repository() {
        let repo = Arc::new(MockProfileRepository::with_user(test_user()));
        let (vm, _) = loaded(repo.clone()).await;

        vm.on_name_change("");
        let result = vm.save_profile().await;

        let error = result.unwrap_err();
        assert_eq!(error, ProfileSaveError::InvalidForm);
        assert_eq!(error.to_string(), "Molimo ispravno popunite sva polja.");
        assert_eq!(repo.update_count(), 0);
        assert_eq!(vm.form_state().name_error, Some(ValidationErrorType::EmptyName));
        assert!(!vm.form_state().is_saving);
    }

    #[tokio::test]
    async fn invalid_save_populates_every_error_field() {
        let (vm, _) = loaded(Arc::new(MockProfileRepository::with_user(test_user()))).await;

        vm.on_phone_change("123");
        vm.on_zip_change("1");
        let _ = vm.save_profile().await;

        let form = vm.form_state();
        assert_eq!(form.name_error, None);
        assert_eq!(form.phone_error, Some(ValidationErrorType::InvalidPhoneFormat));
        assert_eq!(form.street_error, None);
        assert_eq!(form.zip_error, Some(ValidationErrorType::InvalidZipFormat));
    }

    #[tokio::test]
    async fn valid_save_updates_ui_state() {
        let repo = Arc::new(MockProfileRepository::with_user(test_user()));
        let (vm, _) = loaded(repo.clone()).await;

        vm.on_city_change("Split");
        vm.on_zip_change("21000");
        let saved = vm.save_profile().await.unwrap();

        assert_eq!(saved.city, "Split");
        assert_eq!(repo.update_count(), 1);
        assert_eq!(vm.ui_state().data().map(|u| u.zip.as_str()), Some("21000"));
        assert!(!vm.form_state().is_saving);
    }

    #[tokio::test]
    async fn repository_failure_reports_message_and_clears_saving() {
        let repo = Arc::new(MockProfileRepository::with_user(test_user()).failing());
        let (vm, _) = loaded(repo).await;

        let error = vm.save_profile().await.unwrap_err();

        assert_eq!(error.to_string(), "Spremanje nije uspjelo.");
        assert!(!vm.form_state().is_saving);
        assert_eq!(vm.ui_state(), UiState::Success(test_user()));
    }

    #[tokio::test]
    async fn save_before_load_is_rejected() {
        let repo = Arc::new(MockProfileRepository::with_user(test_user()));
        let (vm, _) = view_model(repo.clone());
        vm.on_name_change("Ana");
        vm.on_phone_change("0911234567");
        vm.on_street_change("Ilica 1");
        vm.on_city_change("Zagreb");
        vm.on_zip_change("10000");

        assert_eq!(vm.save_profile().await, Err(ProfileSaveError::NotLoaded));
        assert_eq!(repo.update_count(), 0);
    }

    #[tokio::test]
    async fn field_change_clears_only_that_error() {
        let (vm, _) = loaded(Arc::new(MockProfileRepository::with_user(test_user()))).await;
        vm.on_name_change("A");
        vm.on_zip_change("abc");
        assert!(!vm.validate_name().is_valid());
        assert!(!vm.validate_zip().is_valid());

        vm.on_name_change("Ana");

        let form = vm.form_state();
        assert_eq!(form.name_error, None);
        assert_eq!(form.zip_error, Some(ValidationErrorType::InvalidZipFormat));
    }

    #[tokio::test]
    async fn focus_loss_validation_stores_result() {
        let (vm, _) = loaded(Arc::new(MockProfileRepository::with_user(test_user()))).await;

        vm.on_street_change("Ilica");
        let result = vm.validate_street();

        assert_eq!(result.error(), Some(ValidationErrorType::InvalidStreetFormat));
        assert_eq!(vm.form_state().street_error, result.error());
        assert!(vm.validate_city().is_valid());
        assert!(vm.validate_phone().is_valid());
    }

    #[tokio::test]
    async fn profile_image_replaces_previous_picture() {
        let user = test_user().with_profile_image("https://cdn.example.com/old.jpg");
        let repo = Arc::new(MockProfileRepository::with_user(user));
        let (vm, images) = loaded(repo).await;

        let updated = vm.update_profile_image("content://media/new.jpg").await.unwrap();

        assert_eq!(
            updated.profile_image_url.as_deref(),
            Some("https://cdn.example.com/new.jpg")
        );
        assert_eq!(
            *images.deleted.lock().unwrap(),
            vec!["https://cdn.example.com/old.jpg".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_profile_update_removes_uploaded_image() {
        let repo = Arc::new(MockProfileRepository::with_user(test_user()).failing());
        let (vm, images) = loaded(repo).await;

        let result = vm.update_profile_image("content://media/new.jpg").await;

        assert!(result.is_err());
        assert_eq!(
            *images.deleted.lock().unwrap(),
            vec!["https://cdn.example.com/new.jpg".to_string()]
        );
        assert!(!vm.form_state().is_saving);
    }
}
