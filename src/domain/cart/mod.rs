//! Shopping cart entries and totals.

use serde::{Deserialize, Serialize};

use crate::domain::book::Book;
use crate::domain::foundation::{BookId, CartItemId, Timestamp};

/// One book in a user's cart (`users/{uid}/cart/{id}`).
///
/// Title, price and cover are copied from the listing when the item is
/// added, so the cart renders without loading every book.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartItem {
    pub id: CartItemId,
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub added_at: Timestamp,
}

impl CartItem {
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: CartItemId::generate(),
            book_id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price,
            image_url: book.cover_url().map(str::to_string),
            added_at: Timestamp::now(),
        }
    }
}

/// Cart contents with the total derived from them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_price: f64,
}

impl CartSummary {
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let total_price = items.iter().map(|item| item.price).sum();
        Self { items, total_price }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_book(&self, book_id: &BookId) -> bool {
        self.items.iter().any(|item| &item.book_id == book_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64) -> CartItem {
        CartItem {
            id: CartItemId::generate(),
            price,
            ..CartItem::default()
        }
    }

    #[test]
    fn total_is_sum_of_prices() {
        let summary = CartSummary::from_items(vec![item(10.5), item(4.5), item(5.0)]);
        assert_eq!(summary.total_price, 20.0);
        assert_eq!(summary.items.len(), 3);
    }

    #[test]
    fn empty_cart_totals_zero() {
        let summary = CartSummary::from_items(Vec::new());
        assert!(summary.is_empty());
        assert_eq!(summary.total_price, 0.0);
    }

    #[test]
    fn from_book_copies_listing_fields() {
        let book = Book {
            id: BookId::new("b-1").unwrap(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            price: 12.0,
            image_urls: vec!["https://img/dune".to_string()],
            ..Book::default()
        };

        let item = CartItem::from_book(&book);

        assert_eq!(item.book_id, book.id);
        assert_eq!(item.title, "Dune");
        assert_eq!(item.price, 12.0);
        assert_eq!(item.image_url.as_deref(), Some("https://img/dune"));

        let summary = CartSummary::from_items(vec![item]);
        assert!(summary.contains_book(&book.id));
    }
}
