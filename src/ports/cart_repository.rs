//! CartRepository port for per-user carts.

use async_trait::async_trait;

use crate::domain::cart::CartItem;
use crate::domain::foundation::{CartItemId, DomainError, UserId};

use super::LiveStream;

/// Repository for `users/{uid}/cart`.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Live view of the user's cart.
    fn observe_cart(&self, user_id: &UserId) -> LiveStream<Vec<CartItem>>;

    async fn add_to_cart(&self, user_id: &UserId, item: &CartItem) -> Result<(), DomainError>;

    /// Remove an entry. Removing an id that is not in the cart is an error
    /// with [`crate::domain::foundation::ErrorCode::CartItemNotFound`].
    async fn remove_from_cart(&self, user_id: &UserId, item_id: &CartItemId) -> Result<(), DomainError>;
}
