//! Metric model, mapping and scrape orchestration.
//!
//! This module turns SonarQube records into metric samples: the stable
//! descriptor table, the pure field mapper, the per-scrape collector and
//! the text exposition encoder.

pub mod collector;
pub mod data;
pub mod descriptors;
pub mod exposition;
pub mod mapper;

// Re-export commonly used items
pub use collector::{Collector, DataSource, FailurePolicy};
pub use data::{MetricKind, MetricSample, ScrapeResult};
pub use descriptors::{MetricDescriptor, MetricDescriptors, SONARQUBE_METRICS};
pub use exposition::encode_text;
