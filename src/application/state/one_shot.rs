//! Values that must be observed exactly once.

use std::collections::VecDeque;

use tokio::sync::watch;

use super::StateStore;

/// Queue of transient notifications (snackbar texts, navigation events).
///
/// Producers push; the UI takes. Each value is handed out once, no matter
/// how many observers race for it.
#[derive(Debug, Clone)]
pub struct OneShotQueue<T> {
    store: StateStore<VecDeque<T>>,
}

impl<T: Clone> OneShotQueue<T> {
    pub fn new() -> Self {
        Self {
            store: StateStore::new(VecDeque::new()),
        }
    }

    pub fn push(&self, value: T) {
        self.store.update(|queue| queue.push_back(value));
    }

    /// Oldest pending value, removing it.
    pub fn take(&self) -> Option<T> {
        self.store.modify(VecDeque::pop_front)
    }

    /// Pending values without consuming them.
    pub fn peek_all(&self) -> Vec<T> {
        self.store.get().into_iter().collect()
    }

    /// Wakes whenever something is pushed or taken.
    pub fn subscribe(&self) -> watch::Receiver<VecDeque<T>> {
        self.store.subscribe()
    }
}

impl<T: Clone> Default for OneShotQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
