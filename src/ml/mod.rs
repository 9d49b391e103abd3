//! Machine learning components.

pub mod intent_classifier;
