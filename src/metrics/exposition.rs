//! Prometheus text exposition of scrape results.

use crate::error::{ExporterError, Result};
use crate::metrics::data::{MetricKind, MetricSample, ScrapeResult};
use crate::metrics::descriptors::MetricDescriptors;
use prometheus::proto::{Gauge, LabelPair, Metric, MetricFamily, MetricType};
use prometheus::{Encoder, TextEncoder};

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

fn metric_type(kind: MetricKind) -> MetricType {
    match kind {
        MetricKind::Gauge => MetricType::GAUGE,
    }
}

fn to_metric(sample: &MetricSample) -> Metric {
    let mut metric = Metric::default();
    for (key, value) in &sample.labels {
        let mut pair = LabelPair::default();
        pair.set_name(key.to_string());
        pair.set_value(value.clone());
        metric.mut_label().push(pair);
    }

    let mut gauge = Gauge::default();
    gauge.set_value(sample.value);
    metric.set_gauge(gauge);
    metric
}

/// Group samples into metric families, ordered by first appearance.
pub fn metric_families(result: &ScrapeResult, metrics: &MetricDescriptors) -> Vec<MetricFamily> {
    let mut families: Vec<MetricFamily> = Vec::new();

    for sample in &result.samples {
        let index = match families.iter().position(|f| f.get_name() == sample.name) {
            Some(index) => index,
            None => {
                let help = metrics.find(sample.name).map(|d| d.help).unwrap_or(sample.name);

                let mut family = MetricFamily::default();
                family.set_name(sample.name.to_string());
                family.set_help(help.to_string());
                family.set_field_type(metric_type(sample.kind));
                families.push(family);
                families.len() - 1
            }
        };

        families[index].mut_metric().push(to_metric(sample));
    }

    families
}

/// Render a scrape result in the Prometheus text format.
pub fn encode_text(result: &ScrapeResult, metrics: &MetricDescriptors) -> Result<String> {
    let families = metric_families(result, metrics);

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&families, &mut buffer)?;

    String::from_utf8(buffer)
        .map_err(|e| ExporterError::Encode(prometheus::Error::Msg(format!("invalid UTF-8: {}", e))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::SONARQUBE_METRICS;

    #[test]
    fn test_down_target_encoding() {
        let result = ScrapeResult::unavailable(
            vec![SONARQUBE_METRICS.up.sample(&[], 0.0)],
            "Transport error: connection refused",
        );
        let text = encode_text(&result, &SONARQUBE_METRICS).unwrap();

        assert_eq!(
            text,
            "# HELP sonarqube_up Was the last sonar query successful.\n\
             # TYPE sonarqube_up gauge\n\
             sonarqube_up 0\n"
        );
    }

    #[test]
    fn test_families_group_labelled_samples() {
        let activity = &SONARQUBE_METRICS.activity_status;
        let result = ScrapeResult::available(vec![
            SONARQUBE_METRICS.up.sample(&[], 1.0),
            activity.sample(&["pending"], 2.0),
            activity.sample(&["failing"], 15.0),
            activity.sample(&["inProgress"], 1.0),
            SONARQUBE_METRICS.code_demographics.sample(&["java"], 1500.0),
        ]);

        let families = metric_families(&result, &SONARQUBE_METRICS);
        let names: Vec<_> = families.iter().map(|f| f.get_name()).collect();
        assert_eq!(
            names,
            vec!["sonarqube_up", "sonarqube_activity_status", "sonarqube_code_demographics"]
        );
        assert_eq!(families[1].get_metric().len(), 3);

        let text = encode_text(&result, &SONARQUBE_METRICS).unwrap();
        assert!(text.contains("# TYPE sonarqube_activity_status gauge\n"));
        assert!(text.contains("sonarqube_activity_status{metric=\"pending\"} 2\n"));
        assert!(text.contains("sonarqube_activity_status{metric=\"inProgress\"} 1\n"));
        assert!(text.contains("sonarqube_code_demographics{lang=\"java\"} 1500\n"));
    }

    #[test]
    fn test_empty_result_encodes_to_nothing() {
        let result = ScrapeResult::available(vec![]);
        assert_eq!(encode_text(&result, &SONARQUBE_METRICS).unwrap(), "");
    }
}
