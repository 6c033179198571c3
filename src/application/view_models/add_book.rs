//! AddBookViewModel - draft and submission of a new listing.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::application::state::{messages, StateStore};
use crate::domain::book::Book;
use crate::domain::foundation::{BookId, DomainError, Timestamp, UserId};
use crate::domain::validation::{parse_price, AddBookValidation, ValidationErrorType};
use crate::ports::{BookRepository, CrashReporter, ImageStorage};

const SCREEN_NAME: &str = "add_book";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddBookFormState {
    pub title: String,
    pub author: String,
    pub price: String,
    pub description: String,
    pub image_uris: Vec<String>,
    pub title_error: Option<ValidationErrorType>,
    pub author_error: Option<ValidationErrorType>,
    pub price_error: Option<ValidationErrorType>,
    pub images_error: Option<ValidationErrorType>,
    pub is_saving: bool,
}

impl AddBookFormState {
    fn apply_validation(&mut self, validation: &AddBookValidation) {
        self.title_error = validation.title.error();
        self.author_error = validation.author.error();
        self.price_error = validation.price.error();
        self.images_error = validation.images.error();
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddBookError {
    #[error("{}", messages::FORM_INVALID)]
    InvalidForm,

    #[error("{}", .0.message)]
    Repository(#[from] DomainError),
}

pub struct AddBookViewModel {
    books: Arc<dyn BookRepository>,
    images: Arc<dyn ImageStorage>,
    crash_reporter: Arc<dyn CrashReporter>,
    form_state: StateStore<AddBookFormState>,
}

impl AddBookViewModel {
    pub fn new(
        books: Arc<dyn BookRepository>,
        images: Arc<dyn ImageStorage>,
        crash_reporter: Arc<dyn CrashReporter>,
    ) -> Self {
        crash_reporter.update_current_screen(SCREEN_NAME);
        Self {
            books,
            images,
            crash_reporter,
            form_state: StateStore::default(),
        }
    }

    pub fn form_state(&self) -> AddBookFormState {
        self.form_state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<AddBookFormState> {
        self.form_state.subscribe()
    }

    pub fn on_title_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.title = value;
            f.title_error = None;
        });
    }

    pub fn on_author_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.author = value;
            f.author_error = None;
        });
    }

    pub fn on_price_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| {
            f.price = value;
            f.price_error = None;
        });
    }

    pub fn on_description_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.form_state.update(|f| f.description = value);
    }

    pub fn add_image(&self, uri: impl Into<String>) {
        let uri = uri.into();
        self.form_state.update(|f| {
            f.image_uris.push(uri);
            f.images_error = None;
        });
    }

    pub fn remove_image(&self, uri: &str) {
        self.form_state.update(|f| f.image_uris.retain(|existing| existing != uri));
    }

    /// Validate, upload the picked images and publish the listing.
    ///
    /// The draft is reset only after the listing is stored.
    pub async fn submit(&self, seller_id: &UserId) -> Result<BookId, AddBookError> {
        let draft = self.form_state.modify(|form| {
            let validation =
                AddBookValidation::validate(&form.title, &form.author, &form.price, &form.image_uris);
            form.apply_validation(&validation);
            if !validation.is_valid() {
                return Err(AddBookError::InvalidForm);
            }
            form.is_saving = true;
            Ok(form.clone())
        })?;

        match self.publish(&draft, seller_id).await {
            Ok(book_id) => {
                info!(book_id = %book_id, seller_id = %seller_id, "Listing published");
                self.form_state.set(AddBookFormState::default());
                Ok(book_id)
            }
            Err(error) => {
                warn!(seller_id = %seller_id, code = %error.code, "Publishing listing failed");
                self.crash_reporter.log_exception(&error);
                self.form_state.update(|f| f.is_saving = false);
                Err(error.into())
            }
        }
    }

    async fn publish(&self, draft: &AddBookFormState, seller_id: &UserId) -> Result<BookId, DomainError> {
        let price = parse_price(&draft.price)
            .ok_or_else(|| DomainError::validation("price", ValidationErrorType::InvalidPrice.message()))?;
        let image_uris: Vec<String> = draft
            .image_uris
            .iter()
            .filter(|uri| !uri.trim().is_empty())
            .cloned()
            .collect();
        let image_urls = self.images.upload_images(&image_uris).await?;

        let book = Book {
            id: BookId::generate(),
            title: draft.title.trim().to_string(),
            author: draft.author.trim().to_string(),
            description: draft.description.trim().to_string(),
            price,
            image_urls,
            seller_id: seller_id.clone(),
            created_at: Timestamp::now(),
        };
        match self.books.add_book(&book).await {
            Ok(book_id) => Ok(book_id),
            Err(error) => {
                for url in &book.image_urls {
                    self.delete_image_quietly(url).await;
                }
                Err(error)
            }
        }
    }

    async fn delete_image_quietly(&self, url: &str) {
        if let Err(error) = self.images.delete_image(url).await {
            warn!(url = %url, code = %error.code, "Deleting unpublished listing image failed");
            self.crash_reporter.log_exception(&error);
        }
    }
}
