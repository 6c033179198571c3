//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory backend (auth, profiles, books, carts, images)
//! - `telemetry` - `tracing` subscriber setup and crash reporting

pub mod memory;
pub mod telemetry;

pub use memory::{
    InMemoryAccountStore, InMemoryBookRepository, InMemoryCartRepository, InMemoryImageStorage,
};
pub use telemetry::{init_tracing, TelemetryInitError, TracingCrashReporter};
