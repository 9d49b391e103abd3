//! Word n-gram analyzer used for intent features.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{LowercaseFilter, ShingleFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::Result;

/// Analyzer producing lowercased word n-grams.
///
/// Text is split on the default word pattern, lowercased, and every run of
/// `min_n..=max_n` contiguous words becomes one term.
///
/// # Examples
///
/// ```
/// use intentbot::analysis::analyzer::{Analyzer, NgramAnalyzer};
///
/// let analyzer = NgramAnalyzer::new(1, 2).unwrap();
/// let terms: Vec<String> = analyzer.analyze("Good Morning").unwrap().map(|t| t.text).collect();
/// assert_eq!(terms, vec!["good", "good morning", "morning"]);
/// ```
#[derive(Clone, Debug)]
pub struct NgramAnalyzer {
    inner: PipelineAnalyzer,
    min_n: usize,
    max_n: usize,
}

impl NgramAnalyzer {
    /// Create an analyzer emitting `min_n..=max_n` word n-grams.
    pub fn new(min_n: usize, max_n: usize) -> Result<Self> {
        let inner = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(ShingleFilter::new(min_n, max_n)?));

        Ok(Self {
            inner,
            min_n,
            max_n,
        })
    }

    /// The n-gram range as `(min_n, max_n)`.
    pub fn ngram_range(&self) -> (usize, usize) {
        (self.min_n, self.max_n)
    }
}

impl Analyzer for NgramAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_terms() {
        let analyzer = NgramAnalyzer::new(1, 4).unwrap();
        let terms: Vec<String> = analyzer
            .analyze("What is your NAME?")
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert!(terms.contains(&"what".to_string()));
        assert!(terms.contains(&"your name".to_string()));
        assert!(terms.contains(&"what is your name".to_string()));
        assert_eq!(terms.len(), 10);
    }

    #[test]
    fn test_invalid_range() {
        assert!(NgramAnalyzer::new(0, 4).is_err());
        assert!(NgramAnalyzer::new(3, 1).is_err());
    }

    #[test]
    fn test_no_words() {
        let analyzer = NgramAnalyzer::new(1, 4).unwrap();
        assert_eq!(analyzer.analyze("?! .").unwrap().count(), 0);
    }
}
