//! Helpers for turning catalog records into training data.

use crate::catalog::IntentRecord;
use crate::ml::intent_classifier::types::TrainingExample;

/// Flatten catalog records into one training example per pattern.
///
/// Records without patterns contribute nothing.
pub fn training_examples(records: &[IntentRecord]) -> Vec<TrainingExample> {
    records
        .iter()
        .flat_map(|record| {
            record
                .patterns
                .iter()
                .map(move |pattern| TrainingExample::new(pattern.clone(), record.tag.clone()))
        })
        .collect()
}
