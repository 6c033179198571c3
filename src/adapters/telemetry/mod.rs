//! Telemetry adapters.
//!
//! - [`init_tracing`] installs the global `tracing` subscriber
//! - [`TracingCrashReporter`] implements the `CrashReporter` port on top of
//!   `tracing` events

mod crash_reporter;
mod subscriber;

pub use crash_reporter::TracingCrashReporter;
pub use subscriber::{init_tracing, TelemetryInitError};
