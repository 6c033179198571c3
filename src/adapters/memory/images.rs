//! In-memory image bucket.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ImageStorage;

/// Stores uploaded uris under generated download urls.
///
/// # Panics
///
/// Methods panic if an internal lock is poisoned. Test and development use only.
#[derive(Debug)]
pub struct InMemoryImageStorage {
    base_url: String,
    /// Download url -> source uri
    objects: RwLock<HashMap<String, String>>,
    fail_uploads: RwLock<bool>,
}

impl Default for InMemoryImageStorage {
    fn default() -> Self {
        Self::for_bucket("book-market.appspot.com")
    }
}

impl InMemoryImageStorage {
    pub fn for_bucket(bucket: &str) -> Self {
        Self {
            base_url: format!("https://storage.googleapis.com/{bucket}/images"),
            objects: RwLock::new(HashMap::new()),
            fail_uploads: RwLock::new(false),
        }
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        *self
            .fail_uploads
            .write()
            .expect("InMemoryImageStorage: flag lock poisoned") = fail;
    }

    pub fn contains(&self, url: &str) -> bool {
        self.objects
            .read()
            .expect("InMemoryImageStorage: objects lock poisoned")
            .contains_key(url)
    }

    pub fn object_count(&self) -> usize {
        self.objects
            .read()
            .expect("InMemoryImageStorage: objects lock poisoned")
            .len()
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn upload_image(&self, uri: &str) -> Result<String, DomainError> {
        let failing = *self
            .fail_uploads
            .read()
            .expect("InMemoryImageStorage: flag lock poisoned");
        if failing || uri.trim().is_empty() {
            return Err(DomainError::new(ErrorCode::StorageError, "Učitavanje slike nije uspjelo.")
                .with_detail("uri", uri));
        }

        let url = format!("{}/{}.jpg", self.base_url, Uuid::new_v4());
        self.objects
            .write()
            .expect("InMemoryImageStorage: objects lock poisoned")
            .insert(url.clone(), uri.to_string());
        debug!(url = %url, "Image uploaded");
        Ok(url)
    }

    async fn delete_image(&self, url: &str) -> Result<(), DomainError> {
        let removed = self
            .objects
            .write()
            .expect("InMemoryImageStorage: objects lock poisoned")
            .remove(url);
        match removed {
            Some(_) => Ok(()),
            None => Err(DomainError::new(ErrorCode::StorageError, "Slika nije pronađena.")
                .with_detail("url", url)),
        }
    }
}
