//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the state containers and the managed backend. Adapters implement these
//! ports; every view model receives them through its constructor as
//! `Arc<dyn Port>`.
//!
//! ## Repository Ports
//!
//! - `AuthRepository` - Sign-in, registration, verification, session stream
//! - `BookRepository` - Book listings with a live collection query
//! - `CartRepository` - Per-user cart with a live collection query
//! - `ProfileRepository` - Profile documents and password changes
//!
//! ## Service Ports
//!
//! - `ImageStorage` - Image upload and deletion
//! - `CrashReporter` - Fire-and-forget telemetry

mod auth_repository;
mod book_repository;
mod cart_repository;
mod crash_reporter;
mod image_storage;
mod live_stream;
mod profile_repository;

pub use auth_repository::AuthRepository;
pub use book_repository::BookRepository;
pub use cart_repository::CartRepository;
pub use crash_reporter::{CrashReporter, NoopCrashReporter};
pub use image_storage::ImageStorage;
pub use live_stream::LiveStream;
pub use profile_repository::ProfileRepository;
