//! Sentiment signal attached to each logged turn.
//!
//! The chatbot treats sentiment as an opaque collaborator: anything that can
//! produce a polarity score in `-1.0..=1.0` implements [`SentimentAnalyzer`].
//! The bundled [`LexiconSentimentAnalyzer`] is a small word-list scorer.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::LowercaseFilter;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::{IntentBotError, Result};

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Collapse a polarity score: only strictly positive scores are positive.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    /// Lowercase label as written to the log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = IntentBotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            other => Err(IntentBotError::validation(format!(
                "unknown sentiment label '{other}'"
            ))),
        }
    }
}

/// Source of polarity scores.
pub trait SentimentAnalyzer: Send + Sync {
    /// Polarity of `text` in `-1.0..=1.0`.
    fn polarity(&self, text: &str) -> f64;

    /// Binary label for `text`.
    fn sentiment(&self, text: &str) -> Sentiment {
        Sentiment::from_polarity(self.polarity(text))
    }
}

lazy_static! {
    static ref LEXICON: HashMap<&'static str, f64> = {
        let mut m = HashMap::new();
        for word in [
            "good", "great", "excellent", "love", "amazing", "wonderful", "happy", "fantastic",
            "awesome", "best", "nice", "thanks", "thank", "glad", "cool", "fun", "perfect",
            "beautiful", "helpful", "like", "enjoy", "pleased", "brilliant", "kind",
        ] {
            m.insert(word, 1.0);
        }
        for word in [
            "bad", "terrible", "awful", "hate", "horrible", "worst", "sad", "angry",
            "disappointed", "poor", "wrong", "useless", "annoying", "stupid", "broken", "ugly",
            "boring", "upset", "problem", "sorry",
        ] {
            m.insert(word, -1.0);
        }
        m
    };
}

const NEGATIONS: [&str; 7] = ["not", "no", "never", "don't", "isn't", "wasn't", "can't"];

/// Word-list sentiment scorer.
///
/// Polarity is the mean valence of the sentiment words found; a negation
/// word directly before a sentiment word flips its valence. Text without
/// sentiment words scores `0.0`.
pub struct LexiconSentimentAnalyzer {
    analyzer: PipelineAnalyzer,
}

impl fmt::Debug for LexiconSentimentAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconSentimentAnalyzer")
            .field("lexicon_size", &LEXICON.len())
            .finish()
    }
}

impl LexiconSentimentAnalyzer {
    /// Create the scorer.
    pub fn new() -> Result<Self> {
        let tokenizer = RegexTokenizer::with_pattern(r"[\w']+")?;
        let analyzer =
            PipelineAnalyzer::new(Arc::new(tokenizer)).add_filter(Arc::new(LowercaseFilter::new()));
        Ok(Self { analyzer })
    }

    fn words(&self, text: &str) -> Vec<String> {
        self.analyzer
            .analyze(text)
            .map(|tokens| tokens.map(|t| t.text).collect())
            .unwrap_or_default()
    }
}

impl SentimentAnalyzer for LexiconSentimentAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        let words = self.words(text);
        let mut total = 0.0;
        let mut hits = 0usize;

        for (i, word) in words.iter().enumerate() {
            let Some(valence) = LEXICON.get(word.as_str()) else {
                continue;
            };
            let negated = i > 0 && NEGATIONS.contains(&words[i - 1].as_str());
            total += if negated { -valence } else { *valence };
            hits += 1;
        }

        if hits == 0 {
            0.0
        } else {
            (total / hits as f64).clamp(-1.0, 1.0)
        }
    }
}
