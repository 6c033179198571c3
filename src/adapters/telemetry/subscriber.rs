//! Global `tracing` subscriber setup.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::TelemetryConfig;

#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.log_filter` when set. A second call is a
/// no-op: the first installed subscriber stays in place.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryInitError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter).map_err(|e| TelemetryInitError::InvalidFilter {
            filter: config.log_filter.clone(),
            reason: e.to_string(),
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json().with_ansi(false)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let config = TelemetryConfig::default();
        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&config).is_ok());
    }

    #[test]
    fn invalid_filter_is_reported() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = TelemetryConfig {
            log_filter: "book_marketplace=loud".to_string(),
            ..Default::default()
        };

        let error = init_tracing(&config).unwrap_err();

        assert!(error.to_string().contains("book_marketplace=loud"));
    }
}
