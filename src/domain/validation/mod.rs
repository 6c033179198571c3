//! Form validation engine.
//!
//! - [`ValidationErrorType`]: reason codes and their localized messages
//! - [`ValidationResult`]: outcome for a single field
//! - [`FormValidator`]: the per-field rules
//! - `*Validation`: whole-form results built from the field rules

mod error_type;
mod forms;
mod result;
mod rules;

pub use error_type::ValidationErrorType;
pub use forms::{
    AddBookValidation, ChangePasswordValidation, LoginValidation, ProfileEditValidation,
    SignupValidation,
};
pub use result::ValidationResult;
pub use rules::{
    is_blank, parse_price, FormValidator, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH, PASSWORD_SYMBOLS,
};
