//! Typed records decoded from SonarQube REST responses.

use serde::{Deserialize, Serialize};

/// Payload of `api/system/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall health indicator, `GREEN`, `YELLOW` or `RED`
    pub health: String,
    /// Reasons reported for a non-green health
    #[serde(default)]
    pub causes: Vec<HealthCause>,
}

/// One reason attached to a degraded health status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCause {
    pub message: String,
}

/// Payload of `api/ce/activity_status`: Compute Engine queue counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStatus {
    /// Tasks waiting in the queue
    pub pending: u64,
    /// Tasks that failed
    pub failing: u64,
    /// Tasks currently running
    pub in_progress: u64,
}

/// Payload of `api/system/info`, restricted to the sections the exporter reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(rename = "Health", default, skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    #[serde(rename = "Statistics")]
    pub statistics: Statistics,
    #[serde(rename = "Search State", default, skip_serializing_if = "Option::is_none")]
    pub search_state: Option<SearchState>,
}

/// Aggregate instance statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub user_count: u64,
    #[serde(default)]
    pub project_count: u64,
    /// Total non-comment lines of code
    #[serde(default)]
    pub ncloc: u64,
    #[serde(default)]
    pub ncloc_by_language: Vec<LanguageLoc>,
    #[serde(default)]
    pub project_count_by_language: Vec<LanguageProjectCount>,
}

/// Lines of code for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageLoc {
    pub language: String,
    pub ncloc: u64,
}

/// Number of projects using one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageProjectCount {
    pub language: String,
    pub count: u64,
}

/// State of the embedded search engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "CPU Usage (%)", default, skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<f64>,
    /// Free disk space with its unit, e.g. `"120 GB"`
    #[serde(rename = "Disk Available", default, skip_serializing_if = "Option::is_none")]
    pub disk_available: Option<String>,
}
