//! Intent classification using TF-IDF word n-grams and logistic regression.
//!
//! # Architecture
//!
//! - `IntentClassifier` trait: Common interface for all classifiers
//! - `MLBasedIntentClassifier`: TF-IDF features + multinomial logistic regression
//! - `TfIdfVectorizer`: Feature extraction using TF-IDF
//! - `LogisticRegression`: The multinomial model
//! - `Matcher`: Catalog-facing wrapper that trains on intent records and
//!   turns every failure into `MatchResult::Unmatched`
//!
//! # Example
//!
//! ```rust
//! use intentbot::catalog::IntentRecord;
//! use intentbot::config::ClassifierConfig;
//! use intentbot::ml::intent_classifier::{MatchResult, Matcher};
//!
//! let records = vec![IntentRecord::new(
//!     "greeting",
//!     vec!["hi".to_string(), "hello".to_string()],
//!     vec!["Hey there!".to_string()],
//! )];
//!
//! let matcher = Matcher::train(&records, &ClassifierConfig::default());
//! assert_eq!(matcher.classify("hello"), MatchResult::Matched("greeting".to_string()));
//! assert_eq!(matcher.classify("xyz123"), MatchResult::Unmatched);
//! ```

mod classifier;
mod core;
mod logistic;
mod matcher;
mod ml_classifier;
mod tfidf;
mod types;

// Public exports
pub use classifier::IntentClassifier;
pub use self::core::training_examples;
pub use logistic::LogisticRegression;
pub use matcher::Matcher;
pub use ml_classifier::MLBasedIntentClassifier;
pub use tfidf::TfIdfVectorizer;
pub use types::{MatchResult, SparseVector, TrainingExample};
