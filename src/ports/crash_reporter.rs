//! CrashReporter port - fire-and-forget telemetry sink.

use crate::domain::foundation::{DomainError, UserId};

/// Receives non-fatal failures and context for crash reports.
///
/// Calls never fail and never block; nothing in the core depends on what
/// the sink does with them.
pub trait CrashReporter: Send + Sync {
    fn log_exception(&self, error: &DomainError);

    fn set_user_id(&self, user_id: &UserId);

    fn update_current_screen(&self, screen_name: &str);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCrashReporter;

impl CrashReporter for NoopCrashReporter {
    fn log_exception(&self, _error: &DomainError) {}

    fn set_user_id(&self, _user_id: &UserId) {}

    fn update_current_screen(&self, _screen_name: &str) {}
}
