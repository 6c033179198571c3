//! In-memory `users/{uid}/cart` sub-collections.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use super::live::LiveCollection;
use crate::domain::cart::CartItem;
use crate::domain::foundation::{CartItemId, DomainError, ErrorCode, UserId};
use crate::ports::{CartRepository, LiveStream};

/// One live cart per user, created on first access.
///
/// # Panics
///
/// Methods panic if an internal lock is poisoned. Test and development use only.
#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    carts: RwLock<HashMap<UserId, Arc<LiveCollection<CartItem>>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(self, user_id: &UserId, items: Vec<CartItem>) -> Self {
        self.cart(user_id).mutate(|cart| cart.extend(items));
        self
    }

    pub fn items(&self, user_id: &UserId) -> Vec<CartItem> {
        self.cart(user_id).snapshot()
    }

    /// Pushes `error` to every listener of `user_id`'s cart.
    pub fn publish_error(&self, user_id: &UserId, error: DomainError) {
        self.cart(user_id).publish_error(error);
    }

    pub fn listener_count(&self, user_id: &UserId) -> usize {
        self.cart(user_id).listener_count()
    }

    fn cart(&self, user_id: &UserId) -> Arc<LiveCollection<CartItem>> {
        if let Some(cart) = self
            .carts
            .read()
            .expect("InMemoryCartRepository: carts lock poisoned")
            .get(user_id)
        {
            return Arc::clone(cart);
        }
        let mut carts = self
            .carts
            .write()
            .expect("InMemoryCartRepository: carts write lock poisoned");
        Arc::clone(
            carts
                .entry(user_id.clone())
                .or_insert_with(|| Arc::new(LiveCollection::new(Vec::new()))),
        )
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    fn observe_cart(&self, user_id: &UserId) -> LiveStream<Vec<CartItem>> {
        self.cart(user_id).stream()
    }

    async fn add_to_cart(&self, user_id: &UserId, item: &CartItem) -> Result<(), DomainError> {
        let mut item = item.clone();
        if item.id.as_str().is_empty() {
            item.id = CartItemId::generate();
        }
        let item_id = item.id.clone();

        self.cart(user_id).mutate(|cart| {
            cart.retain(|existing| existing.id != item_id);
            cart.push(item);
        });
        debug!(user_id = %user_id, item_id = %item_id, "Cart item stored");
        Ok(())
    }

    async fn remove_from_cart(&self, user_id: &UserId, item_id: &CartItemId) -> Result<(), DomainError> {
        let removed = self.cart(user_id).mutate(|cart| {
            let before = cart.len();
            cart.retain(|item| &item.id != item_id);
            cart.len() != before
        });
        if !removed {
            return Err(DomainError::new(ErrorCode::CartItemNotFound, "Stavka nije pronađena u košarici.")
                .with_detail("item_id", item_id.as_str()));
        }
        debug!(user_id = %user_id, item_id = %item_id, "Cart item removed");
        Ok(())
    }
}
