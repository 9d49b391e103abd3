//! Catalog-facing matcher: trains on intent records and never fails a query.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::analysis::analyzer::NgramAnalyzer;
use crate::catalog::IntentRecord;
use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::core::training_examples;
use crate::ml::intent_classifier::ml_classifier::MLBasedIntentClassifier;
use crate::ml::intent_classifier::types::MatchResult;

/// Maps user text to intent tags.
///
/// A matcher is rebuilt from the whole catalog whenever the catalog changes;
/// there is no incremental update. With no patterns to learn from it stays
/// untrained and every query is [`MatchResult::Unmatched`].
#[derive(Debug)]
pub struct Matcher {
    config: ClassifierConfig,
    model: Option<MLBasedIntentClassifier>,
}

impl Matcher {
    /// Train a matcher on every `(pattern, tag)` pair of `records`.
    ///
    /// Training problems are logged and leave the matcher untrained.
    pub fn train(records: &[IntentRecord], config: &ClassifierConfig) -> Self {
        let model = match Self::fit(records, config) {
            Ok(model) => model,
            Err(e) => {
                warn!("Intent model training failed: {e}");
                None
            }
        };

        Matcher {
            config: config.clone(),
            model,
        }
    }

    /// Retrain from scratch on the current catalog contents.
    pub fn retrain(&mut self, records: &[IntentRecord]) {
        *self = Self::train(records, &self.config);
    }

    fn fit(
        records: &[IntentRecord],
        config: &ClassifierConfig,
    ) -> Result<Option<MLBasedIntentClassifier>> {
        let examples = training_examples(records);
        if examples.is_empty() {
            warn!("No data to train the model.");
            return Ok(None);
        }

        let n_examples = examples.len();
        let analyzer = Arc::new(NgramAnalyzer::new(config.min_ngram, config.max_ngram)?);
        let model = MLBasedIntentClassifier::new(examples, analyzer, config)?;
        info!(
            "Model trained successfully ({}): {} patterns, {} tags, {} terms, {} iterations",
            model.name(),
            n_examples,
            model.tags().len(),
            model.vocabulary_size(),
            model.iterations()
        );

        Ok(Some(model))
    }

    /// Classify `text`.
    ///
    /// Returns the single highest-scoring tag as soon as the text shares at
    /// least one term with the training data; there is no other confidence
    /// threshold. Internal failures collapse to `Unmatched`.
    pub fn classify(&self, text: &str) -> MatchResult {
        let Some(model) = &self.model else {
            debug!("classify called without a trained model");
            return MatchResult::Unmatched;
        };

        match model.predict(text) {
            Ok(result) => result,
            Err(e) => {
                warn!("Error in intent classification: {e}");
                MatchResult::Unmatched
            }
        }
    }

    /// Per-tag probabilities for `text`; empty when untrained or unmatched.
    pub fn scores(&self, text: &str) -> Vec<(String, f64)> {
        self.model
            .as_ref()
            .and_then(|model| model.scores(text).ok())
            .unwrap_or_default()
    }

    /// Whether a model was trained.
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Tags known to the trained model.
    pub fn tags(&self) -> &[String] {
        self.model.as_ref().map(|m| m.tags()).unwrap_or(&[])
    }

    /// Name of the underlying classifier, if trained.
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_ref().map(|m| m.name())
    }

    /// Optimisation steps taken by the last training run.
    pub fn training_iterations(&self) -> usize {
        self.model.as_ref().map(|m| m.iterations()).unwrap_or(0)
    }

    /// Settings used for (re)training.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}
