//! Stable metric descriptors advertised by the exporter.
//!
//! The descriptor table is built once as a constant and handed to the
//! collector by reference. Names and label keys form the contract with
//! downstream consumers; only label values vary between scrapes.

use crate::metrics::data::{MetricKind, MetricSample};

/// Name, help text and label schema of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub label_keys: &'static [&'static str],
    pub kind: MetricKind,
}

impl MetricDescriptor {
    /// Declare a gauge.
    pub const fn gauge(
        name: &'static str,
        help: &'static str,
        label_keys: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            label_keys,
            kind: MetricKind::Gauge,
        }
    }

    /// Create a sample of this metric. `label_values` are paired with the
    /// declared label keys in order and must have the same length.
    pub fn sample(&self, label_values: &[&str], value: f64) -> MetricSample {
        debug_assert_eq!(
            label_values.len(),
            self.label_keys.len(),
            "label arity mismatch for {}",
            self.name
        );

        MetricSample {
            name: self.name,
            labels: self
                .label_keys
                .iter()
                .zip(label_values)
                .map(|(key, value)| (*key, (*value).to_string()))
                .collect(),
            value,
            kind: self.kind,
        }
    }

    /// Whether a sample matches this descriptor's name and label schema.
    pub fn accepts(&self, sample: &MetricSample) -> bool {
        sample.name == self.name
            && sample.kind == self.kind
            && sample.labels.len() == self.label_keys.len()
            && sample
                .labels
                .iter()
                .zip(self.label_keys)
                .all(|((key, _), declared)| key == declared)
    }
}

/// The full set of metrics the exporter publishes.
#[derive(Debug)]
pub struct MetricDescriptors {
    pub up: MetricDescriptor,
    pub health_status: MetricDescriptor,
    pub activity_status: MetricDescriptor,
    pub general_stats: MetricDescriptor,
    pub code_demographics: MetricDescriptor,
    pub project_count_demographics: MetricDescriptor,
    pub search_status: MetricDescriptor,
}

impl MetricDescriptors {
    /// All descriptors in advertisement order.
    pub fn all(&self) -> [&MetricDescriptor; 7] {
        [
            &self.up,
            &self.health_status,
            &self.activity_status,
            &self.general_stats,
            &self.code_demographics,
            &self.project_count_demographics,
            &self.search_status,
        ]
    }

    /// Look up a descriptor by metric name.
    pub fn find(&self, name: &str) -> Option<&MetricDescriptor> {
        self.all().into_iter().find(|d| d.name == name)
    }
}

/// Descriptors for the `sonarqube` namespace.
pub static SONARQUBE_METRICS: MetricDescriptors = MetricDescriptors {
    up: MetricDescriptor::gauge("sonarqube_up", "Was the last sonar query successful.", &[]),
    health_status: MetricDescriptor::gauge("sonarqube_health_status", "SonarQube Health Status", &[]),
    activity_status: MetricDescriptor::gauge(
        "sonarqube_activity_status",
        "SonarQube Activity Status",
        &["metric"],
    ),
    general_stats: MetricDescriptor::gauge(
        "sonarqube_general_stats",
        "SonarQube General Statistics",
        &["metric"],
    ),
    code_demographics: MetricDescriptor::gauge(
        "sonarqube_code_demographics",
        "SonarQube Code Demographics",
        &["lang"],
    ),
    project_count_demographics: MetricDescriptor::gauge(
        "sonarqube_project_count_demographics",
        "SonarQube Project Count Demographics",
        &["lang"],
    ),
    search_status: MetricDescriptor::gauge(
        "sonarqube_search_status",
        "SonarQube Search Engine Status",
        &["metric"],
    ),
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique_and_namespaced() {
        let names: HashSet<_> = SONARQUBE_METRICS.all().iter().map(|d| d.name).collect();
        assert_eq!(names.len(), 7);
        assert!(names.iter().all(|n| n.starts_with(crate::NAMESPACE)));
    }

    #[test]
    fn test_sample_pairs_labels_in_order() {
        let sample = SONARQUBE_METRICS.code_demographics.sample(&["java"], 1200.0);
        assert_eq!(sample.labels, vec![("lang", "java".to_string())]);
        assert!(SONARQUBE_METRICS.code_demographics.accepts(&sample));
        assert!(!SONARQUBE_METRICS.project_count_demographics.accepts(&sample));
    }

    #[test]
    fn test_find() {
        let descriptor = SONARQUBE_METRICS.find("sonarqube_search_status").unwrap();
        assert_eq!(descriptor.label_keys, &["metric"]);
        assert!(SONARQUBE_METRICS.find("sonarqube_unknown").is_none());
    }
}
