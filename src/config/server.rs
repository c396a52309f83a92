//! HTTP server configuration.

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ConfigValidationError;

/// Server bind settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8085,
        }
    }
}

impl ServerConfig {
    /// Parses the bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ConfigValidationError::invalid(
                    "server.host",
                    format!("'{}:{}' is not a valid socket address", self.host, self.port),
                )
            })
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.host.trim().is_empty() {
            return Err(ConfigValidationError::invalid(
                "server.host",
                "host cannot be empty",
            ));
        }
        self.socket_addr().map(|_| ())
    }
}
