//! Ownership of background listener tasks.

use std::sync::{Mutex, PoisonError};

use tokio::task::JoinHandle;

/// Keeps a spawned listener task alive and aborts it on drop.
///
/// Aborting drops the task's stream, which unregisters the backend
/// listener behind it.
#[derive(Debug)]
pub struct SubscriptionGuard {
    handle: JoinHandle<()>,
}

impl SubscriptionGuard {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// At most one active subscription. Installing a new one cancels the old.
#[derive(Debug, Default)]
pub struct SubscriptionSlot {
    current: Mutex<Option<SubscriptionGuard>>,
}

impl SubscriptionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, guard: SubscriptionGuard) {
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(guard);
        drop(previous);
    }

    pub fn cancel(&self) {
        let previous = self.current.lock().unwrap_or_else(PoisonError::into_inner).take();
        drop(previous);
    }

    pub fn is_active(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|guard| !guard.is_finished())
    }
}
