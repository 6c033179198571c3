//! BookRepository port for book listings.

use async_trait::async_trait;

use crate::domain::book::Book;
use crate::domain::foundation::{BookId, DomainError};

use super::LiveStream;

/// Repository for the `books` collection.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Live view of every listing, newest first.
    fn observe_books(&self) -> LiveStream<Vec<Book>>;

    /// Find a listing by id.
    async fn get_book(&self, book_id: &BookId) -> Result<Option<Book>, DomainError>;

    /// Store a new listing, returning the id the backend assigned.
    async fn add_book(&self, book: &Book) -> Result<BookId, DomainError>;

    async fn delete_book(&self, book_id: &BookId) -> Result<(), DomainError>;
}
