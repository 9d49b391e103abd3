//! Shingle (word n-gram) filter implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{IntentBotError, Result};

/// Separator placed between the words of a shingle.
pub const SHINGLE_SEPARATOR: &str = " ";

/// A filter that emits every run of `min_size..=max_size` contiguous tokens
/// as a single token, words joined by a space.
///
/// With `min_size == 1` the original tokens are kept as unigrams.
///
/// # Examples
///
/// ```
/// use intentbot::analysis::token::Token;
/// use intentbot::analysis::token_filter::{Filter, ShingleFilter};
///
/// let filter = ShingleFilter::new(1, 2).unwrap();
/// let tokens = vec![Token::new("good", 0), Token::new("morning", 1)];
/// let texts: Vec<String> = filter
///     .filter(Box::new(tokens.into_iter()))
///     .unwrap()
///     .map(|t| t.text)
///     .collect();
///
/// assert_eq!(texts, vec!["good", "good morning", "morning"]);
/// ```
#[derive(Clone, Debug)]
pub struct ShingleFilter {
    /// Minimum shingle size in words
    min_size: usize,
    /// Maximum shingle size in words
    max_size: usize,
}

impl ShingleFilter {
    /// Create a new shingle filter.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_size` is 0 or `max_size` is less than
    /// `min_size`.
    pub fn new(min_size: usize, max_size: usize) -> Result<Self> {
        if min_size == 0 {
            return Err(IntentBotError::analysis("min_size must be at least 1"));
        }
        if max_size < min_size {
            return Err(IntentBotError::analysis(format!(
                "max_size ({max_size}) must be >= min_size ({min_size})"
            )));
        }
        Ok(Self { min_size, max_size })
    }

    /// Minimum shingle size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Maximum shingle size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let words: Vec<Token> = tokens.collect();
        let mut shingles = Vec::new();

        for start in 0..words.len() {
            for size in self.min_size..=self.max_size {
                let end = start + size;
                if end > words.len() {
                    break;
                }

                let window = &words[start..end];
                let text = window
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(SHINGLE_SEPARATOR);

                shingles.push(Token::new(text, window[0].position));
            }
        }

        Ok(Box::new(shingles.into_iter()))
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}
