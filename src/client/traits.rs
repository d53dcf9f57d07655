//! Data-source seam between the collector and the remote service.

use crate::client::data::{ActivityStatus, HealthStatus, SystemInfo};
use crate::error::Result;

/// Typed access to the SonarQube data sources.
///
/// [`SonarClient`](crate::client::SonarClient) implements this over HTTP;
/// the collector only depends on the trait, so each data source can be
/// substituted independently.
pub trait SonarApi {
    /// Query the overall health indicator.
    fn health(&self) -> impl std::future::Future<Output = Result<HealthStatus>> + Send;

    /// Query the Compute Engine activity counters.
    fn activity_status(&self) -> impl std::future::Future<Output = Result<ActivityStatus>> + Send;

    /// Query aggregate statistics and search-engine state.
    fn system_info(&self) -> impl std::future::Future<Output = Result<SystemInfo>> + Send;
}
