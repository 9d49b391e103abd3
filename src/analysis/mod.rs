//! Text analysis module.
//!
//! Tokenization, token filters and the analyzers combining them. The
//! matcher's feature representation is built on top of [`NgramAnalyzer`].

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
