//! Live collection backing the in-memory repositories.

use std::sync::RwLock;

use futures::stream::{BoxStream, StreamExt};
use tokio::sync::watch;

use crate::domain::foundation::DomainError;
use crate::ports::LiveStream;

/// A list of documents plus the listeners observing it.
///
/// Every mutation republishes the full snapshot. Slow listeners only see
/// the latest snapshot, the same way a live query coalesces updates.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned. Test and development
/// use only.
#[derive(Debug)]
pub struct LiveCollection<T> {
    items: RwLock<Vec<T>>,
    feed: watch::Sender<Result<Vec<T>, DomainError>>,
}

impl<T: Clone + Send + Sync + 'static> LiveCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        let (feed, _) = watch::channel(Ok(items.clone()));
        Self {
            items: RwLock::new(items),
            feed,
        }
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.items
            .read()
            .expect("LiveCollection: items lock poisoned")
            .clone()
    }

    /// Mutate the items and publish the result to every listener.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let mut items = self
            .items
            .write()
            .expect("LiveCollection: items write lock poisoned");
        let output = f(&mut items);
        self.feed.send_modify(|feed| *feed = Ok(items.clone()));
        output
    }

    /// Deliver `error` to every listener. Stored items are untouched and
    /// the next mutation publishes them again.
    pub fn publish_error(&self, error: DomainError) {
        self.feed.send_modify(|feed| *feed = Err(error));
    }

    /// Stream starting with the current snapshot.
    pub fn stream(&self) -> LiveStream<Vec<T>> {
        watch_stream(self.feed.subscribe())
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.feed.receiver_count()
    }
}

/// Current value of `rx`, then every change until the sender goes away.
pub(crate) fn watch_stream<T>(rx: watch::Receiver<T>) -> BoxStream<'static, T>
where
    T: Clone + Send + Sync + 'static,
{
    futures::stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let value = rx.borrow_and_update().clone();
        Some((value, (rx, false)))
    })
    .boxed()
}
