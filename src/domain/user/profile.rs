//! User profile document.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// A marketplace member as stored in the `users` collection.
///
/// Every field has a default so partially written documents still decode.
/// The state layer never mutates a `User` in place; it builds a changed
/// copy with the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub profile_image_url: Option<String>,
    pub is_email_verified: bool,
    pub created_at: Timestamp,
}

impl User {
    /// Creates a fresh profile right after registration.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: Timestamp::now(),
            ..Self::default()
        }
    }

    /// Copy with the editable profile fields replaced.
    pub fn with_details(&self, details: &ProfileDetails) -> Self {
        Self {
            name: details.name.trim().to_string(),
            phone: details.phone.trim().to_string(),
            street: details.street.trim().to_string(),
            city: details.city.trim().to_string(),
            zip: details.zip.trim().to_string(),
            ..self.clone()
        }
    }

    /// Copy with a new profile picture.
    pub fn with_profile_image(&self, url: impl Into<String>) -> Self {
        Self {
            profile_image_url: Some(url.into()),
            ..self.clone()
        }
    }

    /// Copy with the verification flag set.
    pub fn with_email_verified(&self, verified: bool) -> Self {
        Self {
            is_email_verified: verified,
            ..self.clone()
        }
    }

    /// The editable subset of this profile.
    pub fn details(&self) -> ProfileDetails {
        ProfileDetails {
            name: self.name.clone(),
            phone: self.phone.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            zip: self.zip.clone(),
        }
    }
}

/// Editable profile fields, as typed into the profile form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDetails {
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub zip: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(UserId::new("u-1").unwrap(), "Ana", "ana@example.com")
    }

    #[test]
    fn with_details_leaves_original_untouched() {
        let original = user();
        let details = ProfileDetails {
            name: " Ana Kovač ".to_string(),
            phone: "0911234567".to_string(),
            street: "Ilica 1".to_string(),
            city: "Zagreb".to_string(),
            zip: "10000".to_string(),
        };

        let updated = original.with_details(&details);

        assert_eq!(original.name, "Ana");
        assert_eq!(updated.name, "Ana Kovač");
        assert_eq!(updated.city, "Zagreb");
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.email, original.email);
    }

    #[test]
    fn details_round_trip_through_with_details() {
        let original = user().with_details(&ProfileDetails {
            name: "Ana".to_string(),
            phone: "0911234567".to_string(),
            street: "Ilica 1".to_string(),
            city: "Zagreb".to_string(),
            zip: "10000".to_string(),
        });
        assert_eq!(original.with_details(&original.details()), original);
    }

    #[test]
    fn partial_document_decodes_with_defaults() {
        let user: User = serde_json::from_str(r#"{"id":"u-9","name":"Ivo"}"#).unwrap();

        assert_eq!(user.id.as_str(), "u-9");
        assert_eq!(user.name, "Ivo");
        assert!(user.email.is_empty());
        assert_eq!(user.profile_image_url, None);
        assert!(!user.is_email_verified);
    }

    #[test]
    fn document_keys_are_camel_case() {
        let json = serde_json::to_value(user().with_profile_image("https://img/1")).unwrap();
        assert_eq!(json["profileImageUrl"], "https://img/1");
        assert_eq!(json["isEmailVerified"], false);
    }
}
