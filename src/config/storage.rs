//! Storage backend configuration.

use serde::Deserialize;

use crate::ports::RetentionPolicy;

use super::error::ConfigValidationError;

/// Which storage adapters to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Memory
    }
}

/// Storage settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    pub retention: RetentionPolicy,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend == StorageBackend::Postgres {
            match &self.database_url {
                Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {}
                Some(_) => {
                    return Err(ConfigValidationError::invalid(
                        "storage.database_url",
                        "must start with postgres:// or postgresql://",
                    ))
                }
                None => {
                    return Err(ConfigValidationError::invalid(
                        "storage.database_url",
                        "required for the postgres backend",
                    ))
                }
            }
        }
        if self.retention.max_events == 0 {
            return Err(ConfigValidationError::invalid(
                "storage.retention.max_events",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
