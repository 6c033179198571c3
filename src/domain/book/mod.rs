//! Book listings.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookId, Timestamp, UserId};

/// A book offered for sale, as stored in the `books` collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub image_urls: Vec<String>,
    pub seller_id: UserId,
    pub created_at: Timestamp,
}

impl Book {
    /// First image, used as the cover thumbnail.
    pub fn cover_url(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Case-insensitive substring match against title and author.
    ///
    /// A blank query matches every book.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query) || self.author.to_lowercase().contains(&query)
    }
}

/// Books whose title or author contains `query`, in their original order.
pub fn filter_books(books: &[Book], query: &str) -> Vec<Book> {
    books
        .iter()
        .filter(|book| book.matches_query(query))
        .cloned()
        .collect()
}
