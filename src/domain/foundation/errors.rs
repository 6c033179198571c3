//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Generic message shown when a backend call fails in a way nobody mapped.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Došlo je do neočekivane pogreške. Pokušajte ponovno.";

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    UserNotFound,
    BookNotFound,
    CartItemNotFound,

    // Authentication errors
    InvalidCredentials,
    EmailAlreadyInUse,
    NotAuthenticated,
    RecentLoginRequired,

    // Backend errors
    NetworkUnavailable,
    StorageError,
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::BookNotFound => "BOOK_NOT_FOUND",
            ErrorCode::CartItemNotFound => "CART_ITEM_NOT_FOUND",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::EmailAlreadyInUse => "EMAIL_ALREADY_IN_USE",
            ErrorCode::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorCode::RecentLoginRequired => "RECENT_LOGIN_REQUIRED",
            ErrorCode::NetworkUnavailable => "NETWORK_UNAVAILABLE",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// This is the `Err` side of every port call. The message is what the
/// screen shows, so adapters are expected to put a user-readable text in it.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Error for failures that were not mapped to anything more specific,
    /// e.g. a missing account right after a successful sign-in.
    pub fn unexpected() -> Self {
        Self::new(ErrorCode::InternalError, UNEXPECTED_ERROR_MESSAGE)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::BookNotFound, "Knjiga nije pronađena");
        assert_eq!(format!("{}", err), "[BOOK_NOT_FOUND] Knjiga nije pronađena");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::DatabaseError, "write failed")
            .with_detail("collection", "books");

        assert_eq!(err.details.get("collection"), Some(&"books".to_string()));
    }

    #[test]
    fn validation_error_records_field() {
        let err = DomainError::validation("email", "Neispravan e-mail");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"email".to_string()));
    }

    #[test]
    fn unexpected_error_uses_generic_message() {
        let err = DomainError::unexpected();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message(), UNEXPECTED_ERROR_MESSAGE);
    }
}
