//! Conversion of SonarQube records into metric samples.
//!
//! Every function here is pure: the same record always maps to the same
//! samples, in the same order.

use crate::client::data::{ActivityStatus, SearchState, Statistics};
use crate::error::{ExporterError, Result};
use crate::metrics::data::MetricSample;
use crate::metrics::descriptors::MetricDescriptors;
use tracing::debug;

/// Health indicator value reported by a fully healthy instance.
pub const HEALTHY: &str = "GREEN";

/// Map a health indicator to a binary gauge value.
pub fn health_value(indicator: &str) -> f64 {
    if indicator == HEALTHY {
        1.0
    } else {
        0.0
    }
}

/// Parse the leading whitespace-delimited numeric token of a value such as
/// `"120 MB"`, discarding the unit.
pub fn parse_leading_number(raw: &str) -> Result<f64> {
    raw.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or_else(|| ExporterError::parse_error(format!("no leading number in {:?}", raw)))
}

/// `up` sample.
pub fn map_up(metrics: &MetricDescriptors, available: bool) -> MetricSample {
    metrics.up.sample(&[], if available { 1.0 } else { 0.0 })
}

/// `health_status` sample.
pub fn map_health(metrics: &MetricDescriptors, indicator: &str) -> MetricSample {
    metrics.health_status.sample(&[], health_value(indicator))
}

/// Three `activity_status` samples: pending, failing and in progress.
pub fn map_activity_status(metrics: &MetricDescriptors, status: &ActivityStatus) -> Vec<MetricSample> {
    let descriptor = &metrics.activity_status;
    vec![
        descriptor.sample(&["pending"], status.pending as f64),
        descriptor.sample(&["failing"], status.failing as f64),
        descriptor.sample(&["inProgress"], status.in_progress as f64),
    ]
}

/// Three `general_stats` samples: users, projects and total lines of code.
pub fn map_general_stats(metrics: &MetricDescriptors, stats: &Statistics) -> Vec<MetricSample> {
    let descriptor = &metrics.general_stats;
    vec![
        descriptor.sample(&["UserCount"], stats.user_count as f64),
        descriptor.sample(&["ProjectCount"], stats.project_count as f64),
        descriptor.sample(&["NCLoC"], stats.ncloc as f64),
    ]
}

/// Lines of code per language as `(language, value)` pairs.
pub fn ncloc_by_language(stats: &Statistics) -> impl Iterator<Item = (&str, f64)> + '_ {
    stats
        .ncloc_by_language
        .iter()
        .map(|entry| (entry.language.as_str(), entry.ncloc as f64))
}

/// Project count per language as `(language, value)` pairs.
pub fn project_count_by_language(stats: &Statistics) -> impl Iterator<Item = (&str, f64)> + '_ {
    stats
        .project_count_by_language
        .iter()
        .map(|entry| (entry.language.as_str(), entry.count as f64))
}

/// One `code_demographics` sample per language entry.
pub fn map_code_demographics<'a>(
    metrics: &'a MetricDescriptors,
    stats: &'a Statistics,
) -> impl Iterator<Item = MetricSample> + 'a {
    ncloc_by_language(stats)
        .map(move |(language, value)| metrics.code_demographics.sample(&[language], value))
}

/// One `project_count_demographics` sample per language entry.
pub fn map_project_count_demographics<'a>(
    metrics: &'a MetricDescriptors,
    stats: &'a Statistics,
) -> impl Iterator<Item = MetricSample> + 'a {
    project_count_by_language(stats).map(move |(language, value)| {
        metrics
            .project_count_demographics
            .sample(&[language], value)
    })
}

/// `search_status` samples: health, CPU usage and available disk.
///
/// CPU usage and disk are omitted when the report lacks them; disk is also
/// omitted when its value has no leading number.
pub fn map_search_state(metrics: &MetricDescriptors, state: &SearchState) -> Vec<MetricSample> {
    let descriptor = &metrics.search_status;
    let mut samples = vec![descriptor.sample(&["health"], health_value(&state.state))];

    if let Some(cpu_usage) = state.cpu_usage {
        samples.push(descriptor.sample(&["cpuUsage"], cpu_usage));
    }

    if let Some(disk_available) = &state.disk_available {
        match parse_leading_number(disk_available) {
            Ok(value) => samples.push(descriptor.sample(&["diskAvailable"], value)),
            Err(e) => debug!("Omitting diskAvailable sample: {}", e),
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::data::{LanguageLoc, LanguageProjectCount};
    use crate::metrics::SONARQUBE_METRICS;

    fn statistics(languages: &[(&str, u64, u64)]) -> Statistics {
        Statistics {
            user_count: 25,
            project_count: 7,
            ncloc: 180_000,
            ncloc_by_language: languages
                .iter()
                .map(|(lang, ncloc, _)| LanguageLoc {
                    language: lang.to_string(),
                    ncloc: *ncloc,
                })
                .collect(),
            project_count_by_language: languages
                .iter()
                .map(|(lang, _, count)| LanguageProjectCount {
                    language: lang.to_string(),
                    count: *count,
                })
                .collect(),
        }
    }

    #[test]
    fn test_health_mapping_is_binary() {
        assert_eq!(health_value("GREEN"), 1.0);
        for other in ["YELLOW", "RED", "", "green", "GREEN ", "unknown"] {
            assert_eq!(health_value(other), 0.0, "{:?}", other);
        }
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("120 MB").unwrap(), 120.0);
        assert_eq!(parse_leading_number("  46.5 GB").unwrap(), 46.5);
        assert_eq!(parse_leading_number("7").unwrap(), 7.0);
        assert!(parse_leading_number("MB").is_err());
        assert!(parse_leading_number("").is_err());
        assert!(parse_leading_number("120MB").is_err());
        assert!(parse_leading_number("NaN MB").is_err());
    }

    #[test]
    fn test_activity_status_mapping() {
        let status = ActivityStatus {
            pending: 2,
            failing: 15,
            in_progress: 1,
        };
        let samples = map_activity_status(&SONARQUBE_METRICS, &status);

        let pairs: Vec<_> = samples
            .iter()
            .map(|s| (s.label("metric").unwrap(), s.value))
            .collect();
        assert_eq!(pairs, vec![("pending", 2.0), ("failing", 15.0), ("inProgress", 1.0)]);
        assert!(samples.iter().all(|s| s.name == "sonarqube_activity_status"));
    }

    #[test]
    fn test_general_stats_mapping() {
        let samples = map_general_stats(&SONARQUBE_METRICS, &statistics(&[]));
        let labels: Vec<_> = samples.iter().map(|s| s.label("metric").unwrap()).collect();
        assert_eq!(labels, vec!["UserCount", "ProjectCount", "NCLoC"]);
        assert_eq!(samples[2].value, 180_000.0);
    }

    #[test]
    fn test_language_breakdowns_follow_payload() {
        let stats = statistics(&[("java", 150_000, 5), ("py", 20_000, 3), ("xml", 10_000, 6)]);

        let code: Vec<_> = map_code_demographics(&SONARQUBE_METRICS, &stats).collect();
        assert_eq!(code.len(), 3);
        assert_eq!(code[1].label("lang"), Some("py"));
        assert_eq!(code[1].value, 20_000.0);

        let projects: Vec<_> = map_project_count_demographics(&SONARQUBE_METRICS, &stats).collect();
        assert_eq!(projects.len(), 3);
        assert_eq!(projects[2].label("lang"), Some("xml"));
        assert_eq!(projects[2].value, 6.0);
    }

    #[test]
    fn test_empty_language_breakdowns() {
        let stats = statistics(&[]);
        assert_eq!(map_code_demographics(&SONARQUBE_METRICS, &stats).count(), 0);
        assert_eq!(map_project_count_demographics(&SONARQUBE_METRICS, &stats).count(), 0);
    }

    #[test]
    fn test_search_state_mapping() {
        let state = SearchState {
            state: "GREEN".to_string(),
            cpu_usage: Some(12.5),
            disk_available: Some("120 MB".to_string()),
        };
        let samples = map_search_state(&SONARQUBE_METRICS, &state);

        let pairs: Vec<_> = samples
            .iter()
            .map(|s| (s.label("metric").unwrap(), s.value))
            .collect();
        assert_eq!(pairs, vec![("health", 1.0), ("cpuUsage", 12.5), ("diskAvailable", 120.0)]);
    }

    #[test]
    fn test_search_state_unparseable_disk_is_omitted() {
        let state = SearchState {
            state: "YELLOW".to_string(),
            cpu_usage: None,
            disk_available: Some("MB".to_string()),
        };
        let samples = map_search_state(&SONARQUBE_METRICS, &state);

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].label("metric"), Some("health"));
        assert_eq!(samples[0].value, 0.0);
    }
}
