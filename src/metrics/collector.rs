//! Scrape orchestration.
//!
//! One call to [`Collector::scrape`] walks `Idle → Fetching → Assembling →
//! Done` and yields a [`ScrapeResult`]. Data sources follow a fixed failure
//! policy:
//!
//! - [`DataSource::Health`] is the primary source and fails fast: when it
//!   errors the batch is exactly `up = 0` and nothing else is queried.
//! - [`DataSource::ActivityStatus`] and [`DataSource::SystemInfo`] are
//!   best-effort: they are queried concurrently once the primary answered,
//!   and a failure only drops that source's samples.
//!
//! Nothing is kept between scrapes.

use crate::client::SonarApi;
use crate::error::{ExporterError, Result};
use crate::metrics::data::{MetricSample, ScrapeResult};
use crate::metrics::descriptors::MetricDescriptors;
use crate::metrics::mapper::{self, HEALTHY};
use std::fmt;
use tracing::{debug, error, warn};

/// One logical remote query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Health,
    ActivityStatus,
    SystemInfo,
}

/// What a failed data source does to the scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the scrape and report the target down
    FailFast,
    /// Log and omit this source's samples
    BestEffort,
}

impl DataSource {
    pub fn policy(self) -> FailurePolicy {
        match self {
            DataSource::Health => FailurePolicy::FailFast,
            DataSource::ActivityStatus | DataSource::SystemInfo => FailurePolicy::BestEffort,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataSource::Health => "health",
            DataSource::ActivityStatus => "activity status",
            DataSource::SystemInfo => "system info",
        })
    }
}

/// Progress of a single scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapePhase {
    Idle,
    Fetching,
    Assembling,
    Done,
}

impl ScrapePhase {
    fn advance(self, next: ScrapePhase) -> ScrapePhase {
        debug!("scrape phase {:?} -> {:?}", self, next);
        next
    }
}

/// Outcome of one data-source query after its failure policy is applied.
enum Settled<T> {
    Ready(T),
    Omitted,
    Down(ExporterError),
}

fn settle<T>(source: DataSource, result: Result<T>) -> Settled<T> {
    match (result, source.policy()) {
        (Ok(value), _) => Settled::Ready(value),
        (Err(e), FailurePolicy::FailFast) => {
            error!("SonarQube {} query failed, reporting target down: {}", source, e);
            Settled::Down(e)
        }
        (Err(e), FailurePolicy::BestEffort) => {
            warn!("SonarQube {} query failed, omitting its samples: {}", source, e);
            Settled::Omitted
        }
    }
}

/// Collects SonarQube metrics on demand.
pub struct Collector<A> {
    api: A,
    metrics: &'static MetricDescriptors,
}

impl<A: SonarApi> Collector<A> {
    /// Create a collector over the given data sources and descriptor table.
    pub fn new(api: A, metrics: &'static MetricDescriptors) -> Self {
        Self { api, metrics }
    }

    /// The descriptor table samples are created from.
    pub fn descriptors(&self) -> &'static MetricDescriptors {
        self.metrics
    }

    /// The underlying data sources.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run one scrape.
    pub async fn scrape(&self) -> ScrapeResult {
        let phase = ScrapePhase::Idle.advance(ScrapePhase::Fetching);

        let health = match settle(DataSource::Health, self.api.health().await) {
            Settled::Ready(health) => health,
            Settled::Down(e) => {
                phase.advance(ScrapePhase::Done);
                return ScrapeResult::unavailable(vec![mapper::map_up(self.metrics, false)], e.to_string());
            }
            // Unreachable for a fail-fast source; kept for exhaustiveness.
            Settled::Omitted => {
                phase.advance(ScrapePhase::Done);
                return ScrapeResult::unavailable(
                    vec![mapper::map_up(self.metrics, false)],
                    "health query produced no result",
                );
            }
        };

        if health.health != HEALTHY {
            let causes: Vec<_> = health.causes.iter().map(|c| c.message.as_str()).collect();
            warn!("SonarQube reports {} health, causes: {:?}", health.health, causes);
        }

        let (activity, system_info) =
            tokio::join!(self.api.activity_status(), self.api.system_info());

        let phase = phase.advance(ScrapePhase::Assembling);

        let mut samples: Vec<MetricSample> = vec![
            mapper::map_up(self.metrics, true),
            mapper::map_health(self.metrics, &health.health),
        ];

        if let Settled::Ready(status) = settle(DataSource::ActivityStatus, activity) {
            samples.extend(mapper::map_activity_status(self.metrics, &status));
        }

        if let Settled::Ready(info) = settle(DataSource::SystemInfo, system_info) {
            let stats = &info.statistics;
            samples.extend(mapper::map_general_stats(self.metrics, stats));
            samples.extend(mapper::map_code_demographics(self.metrics, stats));
            samples.extend(mapper::map_project_count_demographics(self.metrics, stats));

            if let Some(search_state) = &info.search_state {
                samples.extend(mapper::map_search_state(self.metrics, search_state));
            }
        }

        phase.advance(ScrapePhase::Done);
        debug!("scrape produced {} samples", samples.len());

        ScrapeResult::available(samples)
    }
}
