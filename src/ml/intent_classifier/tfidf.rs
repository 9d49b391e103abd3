//! TF-IDF vectorizer for text feature extraction.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;
use crate::ml::intent_classifier::types::SparseVector;

/// TF-IDF vectorizer for text feature extraction.
///
/// Terms are whatever the analyzer emits (word n-grams for the matcher).
/// Each vector holds raw term counts scaled by the smoothed inverse document
/// frequency `ln((1 + n) / (1 + df)) + 1`, then L2-normalised. Terms outside
/// the fitted vocabulary are ignored.
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping. Indices follow sorted term order.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each term.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Fit the vectorizer on training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        self.n_documents = documents.len();
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique_terms: HashSet<String> = self.terms(doc)?.into_iter().collect();
            for term in unique_terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = self.n_documents as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (idx, (term, df)) in document_frequency.into_iter().enumerate() {
            // IDF = ln((N + 1) / (df + 1)) + 1
            idf.push(((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;

        Ok(())
    }

    /// Transform a document into a TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.terms(document)? {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let weighted: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        let norm = weighted.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Ok(SparseVector::default());
        }

        Ok(SparseVector::from_entries(
            weighted.into_iter().map(|(idx, v)| (idx, v / norm)).collect(),
        ))
    }

    /// Fit on `documents` and return their vectors.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Index of `term` in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::NgramAnalyzer;

    fn vectorizer(documents: &[&str]) -> TfIdfVectorizer {
        let analyzer = Arc::new(NgramAnalyzer::new(1, 4).unwrap());
        let mut vectorizer = TfIdfVectorizer::new(analyzer);
        let documents: Vec<String> = documents.iter().map(|d| d.to_string()).collect();
        vectorizer.fit(&documents).unwrap();
        vectorizer
    }

    #[test]
    fn test_tfidf_vectorizer() {
        let vectorizer = vectorizer(&["hello there", "good morning", "see you later"]);

        // 3 + 3 + 6 n-grams, all distinct
        assert_eq!(vectorizer.vocabulary_size(), 12);
        assert_eq!(vectorizer.n_documents(), 3);

        let features = vectorizer.transform("hello again").unwrap();
        assert_eq!(features.nnz(), 1);
        assert!((features.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = vectorizer(&["zebra", "apple"]);
        assert_eq!(vectorizer.term_index("apple"), Some(0));
        assert_eq!(vectorizer.term_index("zebra"), Some(1));
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let vectorizer = vectorizer(&["good morning", "good night", "good day"]);
        let features = vectorizer.transform("good morning").unwrap();

        let good = vectorizer.term_index("good").unwrap();
        let morning = vectorizer.term_index("morning").unwrap();
        let weight = |idx: usize| {
            features
                .entries()
                .iter()
                .find(|(i, _)| *i == idx)
                .map(|(_, v)| *v)
                .unwrap()
        };
        assert!(weight(morning) > weight(good));
    }

    #[test]
    fn test_unknown_text_is_empty() {
        let vectorizer = vectorizer(&["hello there"]);
        assert!(vectorizer.transform("xyz123").unwrap().is_empty());
        assert!(vectorizer.transform("").unwrap().is_empty());
    }
}
