//! Observable state holder used by every view model.

use std::sync::Arc;

use tokio::sync::watch;

/// Holds the current value of one piece of screen state.
///
/// Readers get cloned snapshots or a [`watch::Receiver`] that wakes on every
/// change. Writers either replace the whole value or run a closure under the
/// channel's lock, so a reader never sees a half-applied update.
///
/// Clones share the same underlying value; that is how spawned subscription
/// tasks write back into the view model that started them.
#[derive(Debug)]
pub struct StateStore<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for StateStore<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T: Clone> StateStore<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replace the whole value.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Apply `f` to the value in place and notify observers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.sender.send_modify(f);
    }

    /// Like [`update`](Self::update) but hands back whatever `f` returns.
    pub fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut output = None;
        self.sender.send_modify(|value| output = Some(f(value)));
        match output {
            Some(output) => output,
            None => unreachable!("send_modify always runs the closure"),
        }
    }

    /// Receiver that observes every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T: Clone + Default> Default for StateStore<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
