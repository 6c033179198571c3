//! Application layer - screen state containers.
//!
//! View models orchestrate validation and port calls; `state` holds the
//! observable building blocks they are made of.

pub mod state;
pub mod view_models;

pub use state::{messages, OneShotQueue, StateStore, SubscriptionGuard, SubscriptionSlot, UiState};
pub use view_models::{
    AddBookError, AddBookFormState, AddBookViewModel, AuthEvent, AuthUiState, AuthViewModel,
    CartViewModel, ChangePasswordError, ChangePasswordFormState, ChangePasswordOutcome,
    ChangePasswordViewModel, HomeState, HomeViewModel, ProfileFormState, ProfileSaveError,
    ProfileViewModel, SignupForm,
};
