//! Pass/fail outcome of validating one field.

use super::ValidationErrorType;

/// Outcome of a single field rule.
///
/// There is no way to build a valid result carrying an error or an invalid
/// result without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    error: Option<ValidationErrorType>,
}

impl ValidationResult {
    /// A passing result.
    pub const fn valid() -> Self {
        Self { error: None }
    }

    /// A failing result with the given reason.
    pub const fn invalid(error: ValidationErrorType) -> Self {
        Self { error: Some(error) }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<ValidationErrorType> {
        self.error
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

impl From<Option<ValidationErrorType>> for ValidationResult {
    fn from(error: Option<ValidationErrorType>) -> Self {
        Self { error }
    }
}
