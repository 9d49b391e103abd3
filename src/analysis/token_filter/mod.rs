//! Token filter implementations for token transformation.
//!
//! Filters receive a stream of tokens and produce a new stream:
//!
//! ```text
//! Tokenizer → Lowercase → Shingle → Vectorizer
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod lowercase;
pub mod shingle;

pub use lowercase::LowercaseFilter;
pub use shingle::ShingleFilter;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}
