//! State containers, one per screen.
//!
//! Each view model owns its [`StateStore`](super::state::StateStore)s, takes
//! its ports as `Arc<dyn Port>` in the constructor and exposes snapshots and
//! watch receivers to the UI. Mutations go through the view model only.

mod add_book;
mod auth;
mod cart;
mod change_password;
mod home;
mod profile;

pub use add_book::{AddBookError, AddBookFormState, AddBookViewModel};
pub use auth::{AuthEvent, AuthUiState, AuthViewModel, SignupForm};
pub use cart::CartViewModel;
pub use change_password::{
    ChangePasswordError, ChangePasswordFormState, ChangePasswordOutcome, ChangePasswordViewModel,
};
pub use home::{HomeState, HomeViewModel};
pub use profile::{ProfileFormState, ProfileSaveError, ProfileViewModel};
