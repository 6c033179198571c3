//! Managed backend configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Connection settings for the hosted auth, database and storage backend.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Backend project identifier
    pub project_id: String,

    /// Client API key
    pub api_key: SecretString,

    /// Bucket holding listing and profile images, without `gs://`
    pub storage_bucket: String,

    /// Custom auth domain, when not the project default
    pub auth_domain: Option<String>,
}

impl BackendConfig {
    /// Auth domain to use, falling back to the project default.
    pub fn effective_auth_domain(&self) -> String {
        self.auth_domain
            .clone()
            .unwrap_or_else(|| format!("{}.firebaseapp.com", self.project_id))
    }

    /// Validate backend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__PROJECT_ID"));
        }

        let api_key = self.api_key.expose_secret();
        if api_key.is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__API_KEY"));
        }
        if api_key.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidApiKey);
        }

        if self.storage_bucket.is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__STORAGE_BUCKET"));
        }
        if self.storage_bucket.starts_with("gs://")
            || self.storage_bucket.chars().any(char::is_uppercase)
        {
            return Err(ValidationError::InvalidStorageBucket(self.storage_bucket.clone()));
        }

        Ok(())
    }
}
