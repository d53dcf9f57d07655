//! Data structures for metric samples and scrape results.

use serde::Serialize;

/// Kind of a metric as advertised in the exposition format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Latest observed reading, not cumulative
    Gauge,
}

/// One metric reading.
///
/// Samples are only created through
/// [`MetricDescriptor::sample`](crate::metrics::descriptors::MetricDescriptor::sample),
/// so the label keys always match the declared ones for the name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSample {
    /// Fully qualified metric name
    pub name: &'static str,
    /// Label pairs in declaration order
    pub labels: Vec<(&'static str, String)>,
    /// Sample value
    pub value: f64,
    /// Metric kind
    pub kind: MetricKind,
}

impl MetricSample {
    /// Value of a label, if the sample carries it.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Outcome of one scrape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeResult {
    /// Samples in emission order
    pub samples: Vec<MetricSample>,
    /// Whether the primary data source answered
    pub available: bool,
    /// Why the primary data source failed, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResult {
    /// Result of a scrape whose primary source answered.
    pub fn available(samples: Vec<MetricSample>) -> Self {
        Self {
            samples,
            available: true,
            error: None,
        }
    }

    /// Result of a scrape whose primary source failed.
    pub fn unavailable(samples: Vec<MetricSample>, cause: impl Into<String>) -> Self {
        Self {
            samples,
            available: false,
            error: Some(cause.into()),
        }
    }

    /// Samples with the given metric name, in emission order.
    pub fn samples_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MetricSample> + 'a {
        self.samples.iter().filter(move |s| s.name == name)
    }

    /// Value of the first sample with the given name and optional label value.
    pub fn value_of(&self, name: &str, label_value: Option<&str>) -> Option<f64> {
        self.samples_named(name)
            .find(|s| match label_value {
                Some(wanted) => s.labels.iter().any(|(_, v)| v == wanted),
                None => true,
            })
            .map(|s| s.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &'static str, labels: Vec<(&'static str, String)>, value: f64) -> MetricSample {
        MetricSample {
            name,
            labels,
            value,
            kind: MetricKind::Gauge,
        }
    }

    #[test]
    fn test_value_lookup() {
        let result = ScrapeResult::available(vec![
            sample("sonarqube_up", vec![], 1.0),
            sample("sonarqube_activity_status", vec![("metric", "pending".into())], 3.0),
            sample("sonarqube_activity_status", vec![("metric", "failing".into())], 4.0),
        ]);

        assert_eq!(result.value_of("sonarqube_up", None), Some(1.0));
        assert_eq!(result.value_of("sonarqube_activity_status", Some("failing")), Some(4.0));
        assert_eq!(result.value_of("sonarqube_activity_status", Some("inProgress")), None);
        assert_eq!(result.samples_named("sonarqube_activity_status").count(), 2);
        assert_eq!(result.samples[1].label("metric"), Some("pending"));
    }

    #[test]
    fn test_unavailable_serialization() {
        let result = ScrapeResult::unavailable(
            vec![sample("sonarqube_up", vec![], 0.0)],
            "Transport error: connection refused",
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["available"], false);
        assert_eq!(json["error"], "Transport error: connection refused");
        assert_eq!(json["samples"][0]["kind"], "gauge");
    }
}
