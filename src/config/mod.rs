//! Application configuration module.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `ATTUNE` prefix with
//! `__` as the nesting separator, e.g. `ATTUNE__SERVER__PORT=8085`.

mod detector;
mod error;
mod learning;
mod server;
mod storage;

pub use detector::DetectorConfig;
pub use error::{ConfigError, ConfigValidationError};
pub use learning::LearningConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Storage backend and retention.
    pub storage: StorageConfig,
    /// State detector thresholds.
    pub detector: DetectorConfig,
    /// Learning loop cadence and thresholds.
    pub learning: LearningConfig,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads a `.env` file when present, then environment variables with
    /// the `ATTUNE` prefix. Every section has working defaults, so an
    /// empty environment yields a valid development configuration.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ATTUNE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates all sections.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.detector.validate()?;
        self.learning.validate()?;
        Ok(())
    }
}
