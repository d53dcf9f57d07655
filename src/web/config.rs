//! Exposition server configuration.

use crate::error::{ExporterError, Result};
use serde::{Deserialize, Serialize};

/// Path of the liveness endpoint
pub const HEALTH_PATH: &str = "/health";

/// Configuration for the exposition server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Host to bind the server to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
    /// Path the metrics are served on
    pub metrics_path: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_WEB_PORT,
            metrics_path: crate::DEFAULT_METRICS_PATH.to_string(),
        }
    }
}

impl WebConfig {
    /// Create a new web configuration with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the host for the web server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port for the web server.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the metrics path. A missing leading `/` is added.
    pub fn with_metrics_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.metrics_path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        self
    }

    /// Reject a metrics path that collides with the liveness endpoint.
    pub fn validate(&self) -> Result<()> {
        if self.metrics_path == HEALTH_PATH {
            return Err(ExporterError::config_error(format!(
                "metrics path {} is reserved for the liveness endpoint",
                HEALTH_PATH
            )));
        }
        Ok(())
    }

    /// Get the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
