//! Live query stream type shared by the subscription ports.

use futures::stream::BoxStream;

use crate::domain::foundation::DomainError;

/// Stream of snapshots from a live collection query.
///
/// Each item is the full current result set (or the error the listener
/// reported). The listener stays registered for as long as the stream is
/// alive; dropping the stream unregisters it.
pub type LiveStream<T> = BoxStream<'static, Result<T, DomainError>>;
