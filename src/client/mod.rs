//! HTTP client for the SonarQube REST API.
//!
//! [`SonarClient`] issues authenticated GET requests against a configured
//! [`Endpoint`] and decodes the JSON bodies into the records in [`data`].
//! A request counts as successful only when the transport call succeeds and
//! the response carries a 2xx status; anything else is a transport error.

pub mod data;
pub mod traits;

pub use data::{ActivityStatus, HealthStatus, SearchState, Statistics, SystemInfo};
pub use traits::SonarApi;

use crate::error::{ExporterError, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Path of the overall health endpoint.
pub const HEALTH_PATH: &str = "api/system/health";

/// Path of the Compute Engine activity counters.
pub const ACTIVITY_STATUS_PATH: &str = "api/ce/activity_status";

/// Path of the system information report.
pub const SYSTEM_INFO_PATH: &str = "api/system/info";

/// Principal used for HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Location of the remote service and the principal to authenticate as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
    credentials: Option<Credentials>,
}

impl Endpoint {
    /// Create an unauthenticated endpoint. The base URL always ends with `/`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            base_url,
            credentials: None,
        }
    }

    /// Authenticate as the given principal. An empty username leaves the
    /// endpoint unauthenticated.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        self.credentials = if username.is_empty() {
            None
        } else {
            Some(Credentials {
                username,
                password: password.into(),
            })
        };
        self
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured principal, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Full URL of an API path relative to the base.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// SonarQube REST client.
#[derive(Debug, Clone)]
pub struct SonarClient {
    endpoint: Endpoint,
    http: reqwest::Client,
}

impl SonarClient {
    /// Create a client for the endpoint. `timeout` bounds each request;
    /// `None` leaves requests unbounded.
    pub fn new(endpoint: Endpoint, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| ExporterError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { endpoint, http })
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Perform one GET against `endpoint + path` and return the raw body.
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.endpoint.url_for(path);
        debug!("GET {}", url);

        let mut request = self.http.get(&url);
        if let Some(credentials) = &self.endpoint.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExporterError::transport_error(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExporterError::transport_error(format!(
                "GET {} returned HTTP {}",
                url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ExporterError::transport_error(format!("Failed to read body of {}: {}", url, e)))?;

        Ok(body.to_vec())
    }

    /// Fetch a path and decode its JSON body.
    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.fetch(path).await?;
        serde_json::from_slice(&body)
            .map_err(|e| ExporterError::decode_error(format!("{}: {}", path, e)))
    }

    /// Overall health of the instance.
    pub async fn get_health(&self) -> Result<HealthStatus> {
        self.fetch_json(HEALTH_PATH).await
    }

    /// Compute Engine queue counters.
    pub async fn get_activity_status(&self) -> Result<ActivityStatus> {
        self.fetch_json(ACTIVITY_STATUS_PATH).await
    }

    /// System information report, including statistics and search state.
    pub async fn get_system_info(&self) -> Result<SystemInfo> {
        self.fetch_json(SYSTEM_INFO_PATH).await
    }
}

impl SonarApi for SonarClient {
    async fn health(&self) -> Result<HealthStatus> {
        self.get_health().await
    }

    async fn activity_status(&self) -> Result<ActivityStatus> {
        self.get_activity_status().await
    }

    async fn system_info(&self) -> Result<SystemInfo> {
        self.get_system_info().await
    }
}
