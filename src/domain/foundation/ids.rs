//! Strongly-typed identifier value objects.
//!
//! Document ids are assigned by the backend as opaque strings, so every id
//! here wraps a non-empty `String` rather than a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::DomainError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the id, returning an error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(DomainError::validation($field, concat!($field, " cannot be empty")));
                }
                Ok(Self(id))
            }

            /// Creates a new random id for documents created client-side.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Unique identifier of an account (the auth provider's uid).
    UserId,
    "user_id"
);

string_id!(
    /// Unique identifier of a book listing.
    BookId,
    "book_id"
);

string_id!(
    /// Unique identifier of a cart entry.
    CartItemId,
    "cart_item_id"
);
