use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sonarqube_exporter::{
    client::data::{LanguageLoc, LanguageProjectCount, SearchState, Statistics, SystemInfo},
    encode_text,
    metrics::mapper,
    ScrapeResult, SONARQUBE_METRICS,
};

/// Build a system-info report with `languages` language entries
fn system_info(languages: usize) -> SystemInfo {
    SystemInfo {
        health: Some("GREEN".to_string()),
        statistics: Statistics {
            user_count: 250,
            project_count: 1200,
            ncloc: 45_000_000,
            ncloc_by_language: (0..languages)
                .map(|i| LanguageLoc {
                    language: format!("lang{}", i),
                    ncloc: 10_000 * i as u64,
                })
                .collect(),
            project_count_by_language: (0..languages)
                .map(|i| LanguageProjectCount {
                    language: format!("lang{}", i),
                    count: i as u64,
                })
                .collect(),
        },
        search_state: Some(SearchState {
            state: "GREEN".to_string(),
            cpu_usage: Some(12.0),
            disk_available: Some("120 GB".to_string()),
        }),
    }
}

/// Map a system-info report the way one scrape does
fn map_system_info(info: &SystemInfo) -> ScrapeResult {
    let metrics = &SONARQUBE_METRICS;
    let stats = &info.statistics;

    let mut samples = vec![mapper::map_up(metrics, true), mapper::map_health(metrics, "GREEN")];
    samples.extend(mapper::map_general_stats(metrics, stats));
    samples.extend(mapper::map_code_demographics(metrics, stats));
    samples.extend(mapper::map_project_count_demographics(metrics, stats));
    if let Some(search_state) = &info.search_state {
        samples.extend(mapper::map_search_state(metrics, search_state));
    }

    ScrapeResult::available(samples)
}

/// Benchmark record-to-sample mapping
fn bench_mapping(c: &mut Criterion) {
    for languages in [0, 10, 100].iter() {
        let info = system_info(*languages);
        c.bench_with_input(BenchmarkId::new("map_system_info", languages), &info, |b, info| {
            b.iter(|| map_system_info(info))
        });
    }
}

/// Benchmark text exposition encoding
fn bench_encoding(c: &mut Criterion) {
    for languages in [0, 10, 100].iter() {
        let result = map_system_info(&system_info(*languages));
        c.bench_with_input(BenchmarkId::new("encode_text", languages), &result, |b, result| {
            b.iter(|| encode_text(result, &SONARQUBE_METRICS).expect("Should encode"))
        });
    }
}

/// Benchmark system-info JSON decoding
fn bench_decoding(c: &mut Criterion) {
    let json = serde_json::to_string(&system_info(50)).expect("Should serialize");

    c.bench_function("decode_system_info", |b| {
        b.iter(|| serde_json::from_str::<SystemInfo>(&json).expect("Should decode"))
    });
}

/// Benchmark disk-available parsing
fn bench_parse_leading_number(c: &mut Criterion) {
    c.bench_function("parse_leading_number", |b| {
        b.iter(|| mapper::parse_leading_number("120 GB"))
    });
}

criterion_group!(
    benches,
    bench_mapping,
    bench_encoding,
    bench_decoding,
    bench_parse_leading_number
);
criterion_main!(benches);
