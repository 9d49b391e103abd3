//! Common types for intent classification.

use serde::{Deserialize, Serialize};

/// Training example for intent classification: one pattern and its tag.
///
/// Derived from the catalog at training time, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Example phrasing.
    pub text: String,
    /// Intent tag the phrasing belongs to.
    pub tag: String,
}

impl TrainingExample {
    /// Create a new training example.
    pub fn new<T: Into<String>, G: Into<String>>(text: T, tag: G) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

/// Outcome of classifying a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// The text was mapped to this intent tag.
    Matched(String),
    /// No intent applies: the text shares no feature with the training data,
    /// or no model is trained.
    Unmatched,
}

impl MatchResult {
    /// The matched tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            MatchResult::Matched(tag) => Some(tag),
            MatchResult::Unmatched => None,
        }
    }

    /// Whether a tag was matched.
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }
}

/// A sparse feature vector: `(feature index, value)` pairs sorted by index,
/// zero entries omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from pairs; zero values are dropped and entries sorted by index.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|(_, value)| *value != 0.0);
        entries.sort_by_key(|(index, _)| *index);
        Self { entries }
    }

    /// The non-zero entries.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// True when no entry is non-zero.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Dot product with a dense vector. Indices past its end count as zero.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(index, value)| dense.get(*index).map(|w| w * value))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_accessors() {
        let matched = MatchResult::Matched("greeting".to_string());
        assert_eq!(matched.tag(), Some("greeting"));
        assert!(matched.is_matched());

        assert_eq!(MatchResult::Unmatched.tag(), None);
        assert!(!MatchResult::Unmatched.is_matched());
    }

    #[test]
    fn test_sparse_vector() {
        let v = SparseVector::from_entries(vec![(3, 4.0), (0, 3.0), (1, 0.0)]);
        assert_eq!(v.entries(), &[(0, 3.0), (3, 4.0)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.dot(&[1.0, 1.0, 1.0, 2.0]), 11.0);
        assert_eq!(v.dot(&[1.0]), 3.0);
        assert!(SparseVector::default().is_empty());
    }
}
