//! Criterion benchmarks for intentbot.
//!
//! Covers the hot paths of a conversation turn:
//! - N-gram analysis
//! - Matcher training on catalogs of different sizes
//! - Classification of a single utterance

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use intentbot::analysis::analyzer::{Analyzer, NgramAnalyzer};
use intentbot::catalog::IntentRecord;
use intentbot::config::ClassifierConfig;
use intentbot::ml::intent_classifier::Matcher;
use std::hint::black_box;

const WORDS: [&str; 24] = [
    "hello", "weather", "order", "pizza", "refund", "account", "password", "reset", "ticket",
    "flight", "booking", "cancel", "delivery", "status", "price", "discount", "support", "agent",
    "schedule", "meeting", "music", "play", "alarm", "timer",
];

/// Generate a catalog with `intents` records of `patterns` phrasings each.
fn generate_catalog(intents: usize, patterns: usize) -> Vec<IntentRecord> {
    (0..intents)
        .map(|i| {
            let phrasings = (0..patterns)
                .map(|j| {
                    (0..6)
                        .map(|k| WORDS[(i * 7 + j * 5 + k * 11) % WORDS.len()])
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            IntentRecord::new(
                format!("intent_{i}"),
                phrasings,
                vec![format!("response {i}")],
            )
        })
        .collect()
}

/// Benchmark text analysis.
fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    let analyzer = NgramAnalyzer::new(1, 4).unwrap();
    let text = "Could you please check the delivery status of my pizza order for tonight";

    group.bench_function("ngram_1_4", |b| {
        b.iter(|| {
            let tokens = analyzer.analyze(black_box(text)).unwrap();
            black_box(tokens.count())
        })
    });

    group.finish();
}

/// Benchmark matcher training.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10);

    let config = ClassifierConfig::default();
    for (intents, patterns) in [(5, 8), (20, 8), (40, 12)] {
        let catalog = generate_catalog(intents, patterns);
        group.throughput(Throughput::Elements((intents * patterns) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(intents), &catalog, |b, catalog| {
            b.iter(|| black_box(Matcher::train(catalog, &config)))
        });
    }

    group.finish();
}

/// Benchmark classification.
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let matcher = Matcher::train(&generate_catalog(20, 8), &ClassifierConfig::default());

    group.bench_function("known_terms", |b| {
        b.iter(|| black_box(matcher.classify(black_box("reset my account password please"))))
    });
    group.bench_function("unknown_terms", |b| {
        b.iter(|| black_box(matcher.classify(black_box("xyzzy plugh"))))
    });

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_training, bench_classify);
criterion_main!(benches);
