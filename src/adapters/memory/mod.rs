//! In-memory adapters for tests and local development.
//!
//! - [`InMemoryAccountStore`] - auth backend plus profile documents
//! - [`InMemoryBookRepository`] - live `books` collection
//! - [`InMemoryCartRepository`] - live per-user carts
//! - [`InMemoryImageStorage`] - image bucket
//!
//! Live queries are backed by [`LiveCollection`]: dropping the returned
//! stream unregisters the listener, which tests can observe through the
//! `listener_count` helpers.

mod accounts;
mod books;
mod carts;
mod images;
mod live;

pub use accounts::InMemoryAccountStore;
pub use books::InMemoryBookRepository;
pub use carts::InMemoryCartRepository;
pub use images::InMemoryImageStorage;
pub use live::LiveCollection;
