//! Crash reporter that writes to the `tracing` pipeline.

use std::sync::RwLock;

use tracing::{error, info};

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::CrashReporter;

#[derive(Debug, Default, Clone)]
struct ReporterContext {
    user_id: Option<UserId>,
    screen: Option<String>,
}

/// Emits every reported exception as an `error!` event tagged with the
/// last known user and screen.
///
/// When constructed disabled, every call is ignored.
#[derive(Debug)]
pub struct TracingCrashReporter {
    enabled: bool,
    context: RwLock<ReporterContext>,
}

impl Default for TracingCrashReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TracingCrashReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            context: RwLock::new(ReporterContext::default()),
        }
    }

    pub fn current_user(&self) -> Option<UserId> {
        self.read_context().user_id
    }

    pub fn current_screen(&self) -> Option<String> {
        self.read_context().screen
    }

    fn read_context(&self) -> ReporterContext {
        match self.context.read() {
            Ok(context) => context.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn write_context(&self, f: impl FnOnce(&mut ReporterContext)) {
        match self.context.write() {
            Ok(mut context) => f(&mut context),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl CrashReporter for TracingCrashReporter {
    fn log_exception(&self, exception: &DomainError) {
        if !self.enabled {
            return;
        }
        let context = self.read_context();
        error!(
            code = %exception.code,
            user_id = context.user_id.as_ref().map(UserId::as_str),
            screen = context.screen.as_deref(),
            "{}",
            exception.message
        );
    }

    fn set_user_id(&self, user_id: &UserId) {
        if !self.enabled {
            return;
        }
        self.write_context(|context| context.user_id = Some(user_id.clone()));
    }

    fn update_current_screen(&self, screen_name: &str) {
        if !self.enabled {
            return;
        }
        info!(screen = screen_name, "Screen view");
        self.write_context(|context| context.screen = Some(screen_name.to_string()));
    }
}
