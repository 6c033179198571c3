//! CartViewModel - the signed-in user's cart.
//!
//! Cart contents only ever arrive through the live subscription started by
//! [`CartViewModel::observe_cart`]. Add and remove go straight to the
//! repository and report back through a one-shot action message.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::application::state::{messages, OneShotQueue, StateStore, SubscriptionGuard, SubscriptionSlot, UiState};
use crate::domain::book::Book;
use crate::domain::cart::{CartItem, CartSummary};
use crate::domain::foundation::{CartItemId, DomainError, ErrorCode, UserId};
use crate::ports::{CartRepository, CrashReporter};

const SCREEN_NAME: &str = "cart";

pub struct CartViewModel {
    carts: Arc<dyn CartRepository>,
    crash_reporter: Arc<dyn CrashReporter>,
    ui_state: StateStore<UiState<CartSummary>>,
    action_messages: OneShotQueue<String>,
    user_id: StateStore<Option<UserId>>,
    subscription: SubscriptionSlot,
}

impl CartViewModel {
    pub fn new(carts: Arc<dyn CartRepository>, crash_reporter: Arc<dyn CrashReporter>) -> Self {
        crash_reporter.update_current_screen(SCREEN_NAME);
        Self {
            carts,
            crash_reporter,
            ui_state: StateStore::new(UiState::Loading),
            action_messages: OneShotQueue::new(),
            user_id: StateStore::new(None),
            subscription: SubscriptionSlot::new(),
        }
    }

    pub fn ui_state(&self) -> UiState<CartSummary> {
        self.ui_state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<UiState<CartSummary>> {
        self.ui_state.subscribe()
    }

    /// Start observing `user_id`'s cart, replacing any earlier subscription.
    pub fn observe_cart(&self, user_id: UserId) {
        self.subscription.cancel();
        self.ui_state.set(UiState::Loading);

        let mut updates = self.carts.observe_cart(&user_id);
        let crash_reporter = Arc::clone(&self.crash_reporter);
        let ui_state = self.ui_state.clone();
        let observed_user = user_id.clone();
        self.user_id.set(Some(user_id));

        let handle = tokio::spawn(async move {
            while let Some(update) = updates.next().await {
                match update {
                    Ok(items) => {
                        let summary = CartSummary::from_items(items);
                        debug!(user_id = %observed_user, count = summary.items.len(), total = summary.total_price, "Cart updated");
                        ui_state.set(UiState::Success(summary));
                    }
                    Err(error) => {
                        warn!(user_id = %observed_user, code = %error.code, "Cart subscription reported an error");
                        crash_reporter.log_exception(&error);
                        ui_state.set(UiState::Error(error.message));
                    }
                }
            }
        });
        self.subscription.replace(SubscriptionGuard::new(handle));
    }

    pub fn stop_observing(&self) {
        self.subscription.cancel();
        self.user_id.set(None);
    }

    pub async fn add_to_cart(&self, book: &Book) -> Result<(), DomainError> {
        let result = self.try_add(book).await;
        self.report(result, messages::CART_ITEM_ADDED)
    }

    pub async fn remove_from_cart(&self, item_id: &CartItemId) -> Result<(), DomainError> {
        let result = match self.require_user() {
            Ok(user_id) => self.carts.remove_from_cart(&user_id, item_id).await,
            Err(error) => Err(error),
        };
        if result.is_ok() {
            info!(item_id = %item_id, "Removed book from cart");
        }
        self.report(result, messages::CART_ITEM_REMOVED)
    }

    /// Pending action message, handed out once.
    pub fn consume_action_message(&self) -> Option<String> {
        self.action_messages.take()
    }

    pub fn action_messages(&self) -> tokio::sync::watch::Receiver<std::collections::VecDeque<String>> {
        self.action_messages.subscribe()
    }

    async fn try_add(&self, book: &Book) -> Result<(), DomainError> {
        let user_id = self.require_user()?;

        if book.seller_id == user_id {
            return Err(DomainError::new(ErrorCode::ValidationFailed, messages::CANNOT_BUY_OWN_BOOK)
                .with_detail("book_id", book.id.as_str()));
        }

        let already_present = self
            .ui_state
            .get()
            .data()
            .is_some_and(|summary| summary.contains_book(&book.id));
        if already_present {
            return Err(
                DomainError::new(ErrorCode::ValidationFailed, messages::CART_ITEM_ALREADY_PRESENT)
                    .with_detail("book_id", book.id.as_str()),
            );
        }

        self.carts.add_to_cart(&user_id, &CartItem::from_book(book)).await?;
        info!(user_id = %user_id, book_id = %book.id, "Added book to cart");
        Ok(())
    }

    fn require_user(&self) -> Result<UserId, DomainError> {
        self.user_id
            .get()
            .ok_or_else(|| DomainError::new(ErrorCode::NotAuthenticated, messages::NOT_SIGNED_IN))
    }

    fn report(&self, result: Result<(), DomainError>, success_message: &str) -> Result<(), DomainError> {
        match &result {
            Ok(()) => self.action_messages.push(success_message.to_string()),
            Err(error) => {
                if error.code != ErrorCode::ValidationFailed {
                    self.crash_reporter.log_exception(error);
                }
                self.action_messages.push(error.message.clone());
            }
        }
        result
    }
}
