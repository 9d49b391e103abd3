//! # intentbot
//!
//! A small intent-matching chatbot.
//!
//! ## Features
//!
//! - JSON intent catalog with append-and-persist
//! - Word n-gram TF-IDF features and a multinomial logistic regression matcher
//! - Seedable random response selection with fallback phrases
//! - Lexicon sentiment scoring
//! - Append-only CSV conversation log with malformed-row tolerance

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod ml;
pub mod response;
pub mod sentiment;
pub mod session;

pub mod prelude {
    pub use crate::catalog::{IntentCatalog, IntentRecord};
    pub use crate::config::{BotConfig, ClassifierConfig};
    pub use crate::error::{IntentBotError, Result};
    pub use crate::history::{ConversationEntry, ConversationLog, HistoryRecord};
    pub use crate::ml::intent_classifier::{MatchResult, Matcher};
    pub use crate::response::ResponseSelector;
    pub use crate::sentiment::{LexiconSentimentAnalyzer, Sentiment, SentimentAnalyzer};
    pub use crate::session::{Chatbot, Session, Turn};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
