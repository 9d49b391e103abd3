use std::time::{Duration, Instant};

use intentbot::catalog::IntentRecord;
use intentbot::config::ClassifierConfig;
use intentbot::error::Result;
use intentbot::ml::intent_classifier::{MatchResult, Matcher};

const SHARED: [&str; 12] = [
    "please", "can", "you", "help", "me", "with", "my", "the", "order", "account", "today",
    "now",
];

/// 40 intents with 12 phrasings each; every phrasing carries its topic word.
fn large_catalog() -> Vec<IntentRecord> {
    (0..40)
        .map(|i| {
            let patterns = (0..12)
                .map(|j| {
                    format!(
                        "{} {} topic{i} {} variant{j}",
                        SHARED[(i + j) % SHARED.len()],
                        SHARED[(i * 3 + j) % SHARED.len()],
                        SHARED[(j * 5 + 1) % SHARED.len()],
                    )
                })
                .collect();
            IntentRecord::new(format!("tag{i}"), patterns, vec![format!("reply {i}")])
        })
        .collect()
}

#[test]
fn forty_intent_catalog_trains_within_budget() -> Result<()> {
    let catalog = large_catalog();
    let config = ClassifierConfig::default();

    let started = Instant::now();
    let matcher = Matcher::train(&catalog, &config);
    let elapsed = started.elapsed();

    assert!(matcher.is_trained());
    assert_eq!(matcher.tags().len(), 40);
    assert!(
        matcher.training_iterations() < config.max_iterations,
        "took all {} iterations",
        config.max_iterations
    );
    assert!(
        elapsed < Duration::from_secs(60),
        "training took {elapsed:?}"
    );

    for intent in &catalog {
        for pattern in &intent.patterns {
            assert_eq!(
                matcher.classify(pattern),
                MatchResult::Matched(intent.tag.clone()),
                "pattern {pattern:?}"
            );
        }
    }
    Ok(())
}
