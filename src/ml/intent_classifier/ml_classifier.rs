//! Machine learning-based intent classifier using TF-IDF and logistic regression.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::config::ClassifierConfig;
use crate::error::{IntentBotError, Result};
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::logistic::LogisticRegression;
use crate::ml::intent_classifier::tfidf::TfIdfVectorizer;
use crate::ml::intent_classifier::types::{MatchResult, TrainingExample};

/// Machine learning-based intent classifier.
#[derive(Debug)]
pub struct MLBasedIntentClassifier {
    /// TF-IDF vectorizer.
    vectorizer: TfIdfVectorizer,
    /// Multinomial model over tags.
    model: LogisticRegression,
}

impl MLBasedIntentClassifier {
    /// Create a new ML intent classifier and train it from examples with a specified analyzer.
    pub fn new(
        examples: Vec<TrainingExample>,
        analyzer: Arc<dyn Analyzer>,
        config: &ClassifierConfig,
    ) -> Result<Self> {
        if examples.is_empty() {
            return Err(IntentBotError::classification(
                "Training examples cannot be empty",
            ));
        }

        let (documents, labels): (Vec<String>, Vec<String>) = examples
            .into_iter()
            .map(|example| (example.text, example.tag))
            .unzip();

        let mut vectorizer = TfIdfVectorizer::new(analyzer);
        let features = vectorizer.fit_transform(&documents)?;

        let mut model = LogisticRegression::from_config(config);
        model.fit(&features, &labels, vectorizer.vocabulary_size())?;

        Ok(Self { vectorizer, model })
    }

    /// Probability of each tag for `text`, in sorted tag order.
    ///
    /// Empty when the text shares no term with the training data.
    pub fn scores(&self, text: &str) -> Result<Vec<(String, f64)>> {
        let features = self.vectorizer.transform(text)?;
        if features.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .model
            .classes()
            .iter()
            .cloned()
            .zip(self.model.probabilities(&features))
            .collect())
    }

    /// Tags the model can predict.
    pub fn tags(&self) -> &[String] {
        self.model.classes()
    }

    /// Size of the n-gram vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Optimisation steps the model took to converge.
    pub fn iterations(&self) -> usize {
        self.model.iterations()
    }
}

impl IntentClassifier for MLBasedIntentClassifier {
    fn predict(&self, text: &str) -> Result<MatchResult> {
        let features = self.vectorizer.transform(text)?;
        if features.is_empty() {
            return Ok(MatchResult::Unmatched);
        }

        let tag = self.model.predict(&features)?;
        Ok(MatchResult::Matched(tag.to_string()))
    }

    fn name(&self) -> &str {
        "ml_based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::NgramAnalyzer;

    fn examples() -> Vec<TrainingExample> {
        vec![
            // Greetings
            TrainingExample::new("hello", "greeting"),
            TrainingExample::new("hi there", "greeting"),
            TrainingExample::new("good morning", "greeting"),
            // Farewells
            TrainingExample::new("goodbye", "farewell"),
            TrainingExample::new("see you later", "farewell"),
            TrainingExample::new("bye for now", "farewell"),
            // Thanks
            TrainingExample::new("thank you", "thanks"),
            TrainingExample::new("thanks a lot", "thanks"),
        ]
    }

    fn classifier() -> MLBasedIntentClassifier {
        let analyzer = Arc::new(NgramAnalyzer::new(1, 4).unwrap());
        MLBasedIntentClassifier::new(examples(), analyzer, &ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_ml_intent_classifier() {
        let classifier = classifier();

        let matched = |text: &str| classifier.predict(text).unwrap();
        assert_eq!(matched("hello"), MatchResult::Matched("greeting".into()));
        assert_eq!(matched("see you later"), MatchResult::Matched("farewell".into()));
        assert_eq!(matched("thank you"), MatchResult::Matched("thanks".into()));
        assert_eq!(matched("well hello friend"), MatchResult::Matched("greeting".into()));
    }

    #[test]
    fn test_no_shared_terms_is_unmatched() {
        let classifier = classifier();
        assert_eq!(classifier.predict("xyz123").unwrap(), MatchResult::Unmatched);
        assert_eq!(classifier.predict("").unwrap(), MatchResult::Unmatched);
    }

    #[test]
    fn test_scores() {
        let classifier = classifier();
        let scores = classifier.scores("thanks").unwrap();

        assert_eq!(scores.len(), 3);
        let best = scores
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(tag, _)| tag.as_str());
        assert_eq!(best, Some("thanks"));
        assert!(classifier.scores("xyz123").unwrap().is_empty());
        assert_eq!(classifier.tags(), &["farewell", "greeting", "thanks"]);
    }

    #[test]
    fn test_classifier_metadata() {
        let classifier = classifier();
        assert_eq!(classifier.name(), "ml_based");
        assert!(classifier.vocabulary_size() > 0);
        assert!(classifier.iterations() > 0);
        assert!(classifier.iterations() < ClassifierConfig::default().max_iterations);
    }

    #[test]
    fn test_empty_examples() {
        let analyzer = Arc::new(NgramAnalyzer::new(1, 4).unwrap());
        assert!(MLBasedIntentClassifier::new(vec![], analyzer, &ClassifierConfig::default()).is_err());
    }
}
