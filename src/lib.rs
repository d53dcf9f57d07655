//! # SonarQube Exporter
//!
//! Republishes SonarQube health, Compute Engine activity and instance
//! statistics as Prometheus metrics.
//!
//! Each request to the metrics endpoint runs one scrape: the primary health
//! query decides whether the target is `up`; activity and system-info
//! queries are best-effort and only drop their own samples on failure.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sonarqube_exporter::{start_web_server, Collector, Endpoint, SonarClient, WebConfig, SONARQUBE_METRICS};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = Endpoint::new("http://sonarqube:9000").with_credentials("admin", "admin");
//!     let client = SonarClient::new(endpoint, None)?;
//!     let collector = Collector::new(client, &SONARQUBE_METRICS);
//!
//!     start_web_server(WebConfig::default(), collector).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod metrics;
pub mod web;

// Re-export public API
pub use client::{Endpoint, SonarApi, SonarClient};
pub use error::{ExporterError, Result};
pub use metrics::{
    encode_text, Collector, MetricDescriptor, MetricDescriptors, MetricSample, ScrapeResult,
    SONARQUBE_METRICS,
};
pub use web::{start_web_server, WebConfig};

/// Prefix shared by every exported metric name
pub const NAMESPACE: &str = "sonarqube";

/// The default exposition port
pub const DEFAULT_WEB_PORT: u16 = 2112;

/// The default exposition path
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// The default per-request timeout against SonarQube, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
