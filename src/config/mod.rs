//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BOOK_MARKET` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use book_marketplace::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Images go to {}", config.backend.storage_bucket);
//! ```

mod backend;
mod error;
mod telemetry;

pub use backend::BackendConfig;
pub use error::{ConfigError, ValidationError};
pub use telemetry::TelemetryConfig;

use std::path::Path;

use serde::Deserialize;

const ENV_PREFIX: &str = "BOOK_MARKET";
const ENV_SEPARATOR: &str = "__";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Managed backend connection (project, api key, storage bucket)
    pub backend: BackendConfig,

    /// Logging and crash reporting
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BOOK_MARKET` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BOOK_MARKET__BACKEND__PROJECT_ID=book-market` -> `backend.project_id`
    /// - `BOOK_MARKET__TELEMETRY__JSON=true` -> `telemetry.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, with environment variables taking
    /// precedence over the file's values.
    ///
    /// The format follows the file extension (`.toml`, `.json`, `.yaml`).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.backend.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    fn environment() -> config::Environment {
        config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("BOOK_MARKET__BACKEND__PROJECT_ID", "book-market");
        env::set_var("BOOK_MARKET__BACKEND__API_KEY", "AIzaSyTest123");
        env::set_var("BOOK_MARKET__BACKEND__STORAGE_BUCKET", "book-market.appspot.com");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("BOOK_MARKET__BACKEND__PROJECT_ID");
        env::remove_var("BOOK_MARKET__BACKEND__API_KEY");
        env::remove_var("BOOK_MARKET__BACKEND__STORAGE_BUCKET");
        env::remove_var("BOOK_MARKET__BACKEND__AUTH_DOMAIN");
        env::remove_var("BOOK_MARKET__TELEMETRY__LOG_FILTER");
        env::remove_var("BOOK_MARKET__TELEMETRY__JSON");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.backend.project_id, "book-market");
        assert_eq!(config.backend.api_key.expose_secret(), "AIzaSyTest123");
        assert_eq!(config.backend.auth_domain, None);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_telemetry_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.telemetry.log_filter, "info");
        assert!(!config.telemetry.json);
        assert!(config.telemetry.crash_reporting);
    }

    #[test]
    fn test_telemetry_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("BOOK_MARKET__TELEMETRY__LOG_FILTER", "debug");
        env::set_var("BOOK_MARKET__TELEMETRY__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.telemetry.log_filter, "debug");
        assert!(config.telemetry.json);
    }

    #[test]
    fn test_missing_backend_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[backend]
project_id = "from-file"
api_key = "AIzaSyFile"
storage_bucket = "file-bucket"

[telemetry]
json = true
"#
        )
        .unwrap();

        env::set_var("BOOK_MARKET__BACKEND__PROJECT_ID", "from-env");
        let result = AppConfig::load_from_file(file.path());
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.backend.project_id, "from-env");
        assert_eq!(config.backend.storage_bucket, "file-bucket");
        assert!(config.telemetry.json);
        assert!(config.validate().is_ok());
    }
}
