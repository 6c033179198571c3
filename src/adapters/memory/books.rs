//! In-memory `books` collection.

use async_trait::async_trait;
use tracing::debug;

use super::live::LiveCollection;
use crate::domain::book::Book;
use crate::domain::foundation::{BookId, DomainError, ErrorCode, Timestamp};
use crate::ports::{BookRepository, LiveStream};

/// Book listings with a live query over the whole collection.
///
/// # Panics
///
/// Methods panic if an internal lock is poisoned. Test and development use only.
#[derive(Debug)]
pub struct InMemoryBookRepository {
    books: LiveCollection<Book>,
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: LiveCollection::new(books),
        }
    }

    pub fn books(&self) -> Vec<Book> {
        self.books.snapshot()
    }

    /// Pushes `error` to every `observe_books` listener.
    pub fn publish_error(&self, error: DomainError) {
        self.books.publish_error(error);
    }

    pub fn listener_count(&self) -> usize {
        self.books.listener_count()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    fn observe_books(&self) -> LiveStream<Vec<Book>> {
        self.books.stream()
    }

    async fn get_book(&self, book_id: &BookId) -> Result<Option<Book>, DomainError> {
        Ok(self.books.snapshot().into_iter().find(|book| &book.id == book_id))
    }

    async fn add_book(&self, book: &Book) -> Result<BookId, DomainError> {
        let mut stored = book.clone();
        if stored.id.as_str().is_empty() {
            stored.id = BookId::generate();
        }
        if stored.created_at == Timestamp::default() {
            stored.created_at = Timestamp::now();
        }
        let book_id = stored.id.clone();

        self.books.mutate(|books| {
            books.retain(|existing| existing.id != book_id);
            books.push(stored);
        });
        debug!(book_id = %book_id, "Book stored");
        Ok(book_id)
    }

    async fn delete_book(&self, book_id: &BookId) -> Result<(), DomainError> {
        let removed = self.books.mutate(|books| {
            let before = books.len();
            books.retain(|book| &book.id != book_id);
            books.len() != before
        });
        if !removed {
            return Err(DomainError::new(ErrorCode::BookNotFound, "Knjiga nije pronađena.")
                .with_detail("book_id", book_id.as_str()));
        }
        debug!(book_id = %book_id, "Book deleted");
        Ok(())
    }
}
