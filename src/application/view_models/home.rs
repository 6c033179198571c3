//! HomeViewModel - live book listing with client-side search.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::application::state::{StateStore, SubscriptionGuard, SubscriptionSlot};
use crate::domain::book::{filter_books, Book};
use crate::domain::foundation::{BookId, DomainError, ErrorCode};
use crate::ports::{BookRepository, CrashReporter};

const SCREEN_NAME: &str = "home";

#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub is_loading: bool,
    pub books: Vec<Book>,
    pub error_message: Option<String>,
    pub search_query: String,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            is_loading: true,
            books: Vec::new(),
            error_message: None,
            search_query: String::new(),
        }
    }
}

impl HomeState {
    /// Books matching the current query; all books for a blank query.
    pub fn filtered_books(&self) -> Vec<Book> {
        filter_books(&self.books, &self.search_query)
    }
}

pub struct HomeViewModel {
    books: Arc<dyn BookRepository>,
    crash_reporter: Arc<dyn CrashReporter>,
    state: StateStore<HomeState>,
    subscription: SubscriptionSlot,
}

impl HomeViewModel {
    pub fn new(books: Arc<dyn BookRepository>, crash_reporter: Arc<dyn CrashReporter>) -> Self {
        crash_reporter.update_current_screen(SCREEN_NAME);
        Self {
            books,
            crash_reporter,
            state: StateStore::default(),
            subscription: SubscriptionSlot::new(),
        }
    }

    pub fn state(&self) -> HomeState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<HomeState> {
        self.state.subscribe()
    }

    /// Start (or restart) the live listing subscription.
    ///
    /// An error emission keeps the last known books and only sets
    /// `error_message`; the next successful emission clears it.
    pub fn get_books(&self) {
        self.subscription.cancel();
        self.state.update(|s| s.is_loading = true);

        let mut updates = self.books.observe_books();
        let crash_reporter = Arc::clone(&self.crash_reporter);
        let state = self.state.clone();

        let handle = tokio::spawn(async move {
            while let Some(update) = updates.next().await {
                match update {
                    Ok(books) => {
                        debug!(count = books.len(), "Book listing updated");
                        state.update(|s| {
                            s.books = books;
                            s.error_message = None;
                            s.is_loading = false;
                        });
                    }
                    Err(error) => {
                        warn!(code = %error.code, "Book listing subscription reported an error");
                        crash_reporter.log_exception(&error);
                        state.update(|s| {
                            s.error_message = Some(error.message);
                            s.is_loading = false;
                        });
                    }
                }
            }
        });
        self.subscription.replace(SubscriptionGuard::new(handle));
    }

    pub fn stop_observing(&self) {
        self.subscription.cancel();
    }

    pub fn on_search_query_change(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.update(|s| s.search_query = query);
    }

    pub fn filtered_books(&self) -> Vec<Book> {
        self.state.get().filtered_books()
    }

    /// One-shot lookup for the detail screen.
    pub async fn get_book(&self, book_id: &BookId) -> Result<Book, DomainError> {
        match self.books.get_book(book_id).await {
            Ok(Some(book)) => Ok(book),
            Ok(None) => Err(DomainError::new(ErrorCode::BookNotFound, "Knjiga nije pronađena.")
                .with_detail("book_id", book_id.as_str())),
            Err(error) => {
                self.crash_reporter.log_exception(&error);
                Err(error)
            }
        }
    }

    /// Remove one of the user's own listings. The live subscription
    /// reflects the removal.
    pub async fn delete_listing(&self, book_id: &BookId) -> Result<(), DomainError> {
        if let Err(error) = self.books.delete_book(book_id).await {
            warn!(book_id = %book_id, code = %error.code, "Deleting listing failed");
            self.crash_reporter.log_exception(&error);
            return Err(error);
        }
        info!(book_id = %book_id, "Listing deleted");
        Ok(())
    }
}
