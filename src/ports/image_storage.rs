//! ImageStorage port for uploading listing and profile pictures.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// File storage for images.
///
/// Uris are local content references handed over by the platform picker;
/// urls are the public download links the backend returns.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Upload one image and return its download url.
    async fn upload_image(&self, uri: &str) -> Result<String, DomainError>;

    /// Upload several images, returning urls in the same order.
    ///
    /// Fails as a whole on the first failed upload. Images uploaded before
    /// the failure are deleted again, ignoring deletion errors.
    async fn upload_images(&self, uris: &[String]) -> Result<Vec<String>, DomainError> {
        let mut urls = Vec::with_capacity(uris.len());
        for uri in uris {
            match self.upload_image(uri).await {
                Ok(url) => urls.push(url),
                Err(error) => {
                    for url in &urls {
                        let _ = self.delete_image(url).await;
                    }
                    return Err(error);
                }
            }
        }
        Ok(urls)
    }

    async fn delete_image(&self, url: &str) -> Result<(), DomainError>;
}
