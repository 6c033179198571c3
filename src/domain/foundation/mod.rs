//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and the error type that form the
//! vocabulary of the marketplace domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, UNEXPECTED_ERROR_MESSAGE};
pub use ids::{BookId, CartItemId, UserId};
pub use timestamp::Timestamp;
