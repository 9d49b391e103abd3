//! Conversation orchestration.
//!
//! A [`Chatbot`] owns the catalog, the trained matcher, the response
//! selector, the sentiment scorer and the conversation log. Per-user state
//! lives in a [`Session`] passed into every turn, so nothing is process-wide.

use log::{debug, warn};
use uuid::Uuid;

use crate::catalog::{IntentCatalog, IntentRecord};
use crate::config::BotConfig;
use crate::error::{IntentBotError, Result};
use crate::history::{ConversationEntry, ConversationLog};
use crate::ml::intent_classifier::{MatchResult, Matcher};
use crate::response::ResponseSelector;
use crate::sentiment::{LexiconSentimentAnalyzer, SentimentAnalyzer};

/// Printed when a conversation ends on a farewell.
pub const FAREWELL_MESSAGE: &str = "Thank you for chatting with me. Have a great day!";

const FAREWELL_RESPONSES: [&str; 2] = ["goodbye", "bye"];

/// Per-conversation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Session identifier.
    pub id: Uuid,
    /// Number of turns taken so far.
    pub turn: u64,
    /// Name the user asked to be called by.
    pub display_name: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Session {
    /// Start a session. Blank names are treated as absent.
    pub fn new(display_name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            turn: 0,
            display_name: display_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        }
    }

    /// Greeting for the current point of the conversation.
    pub fn greeting(&self) -> String {
        let name = self.display_name.as_deref().unwrap_or("there");
        if self.turn == 0 {
            format!("Hello {name}! Welcome to the chatbot.")
        } else {
            format!("Welcome back, {name}! How can I assist you today?")
        }
    }
}

/// Outcome of one user turn.
#[derive(Debug)]
pub struct Turn {
    /// What was logged for this turn.
    pub entry: ConversationEntry,
    /// How the input was classified.
    pub matched: MatchResult,
    /// The reply ends the conversation.
    pub farewell: bool,
    /// Set when the turn could not be written to the log.
    pub log_error: Option<IntentBotError>,
}

impl Turn {
    /// The reply to show.
    pub fn response(&self) -> &str {
        &self.entry.response
    }
}

/// The chatbot core.
pub struct Chatbot {
    config: BotConfig,
    catalog: IntentCatalog,
    matcher: Matcher,
    selector: ResponseSelector,
    sentiment: Box<dyn SentimentAnalyzer>,
    log: ConversationLog,
}

impl std::fmt::Debug for Chatbot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatbot")
            .field("intents", &self.catalog.len())
            .field("trained", &self.matcher.is_trained())
            .field("log", &self.log.path())
            .finish()
    }
}

impl Chatbot {
    /// Load the catalog, train the matcher and prepare the log.
    ///
    /// A missing catalog or an unwritable log only degrade the bot; the
    /// error side covers invalid configuration.
    pub fn new(config: BotConfig) -> Result<Self> {
        let sentiment = Box::new(LexiconSentimentAnalyzer::new()?);
        Self::with_sentiment(config, sentiment)
    }

    /// Like [`new`](Self::new) with a custom sentiment scorer.
    pub fn with_sentiment(config: BotConfig, sentiment: Box<dyn SentimentAnalyzer>) -> Result<Self> {
        config.validate()?;

        let catalog = IntentCatalog::load(&config.intents_path);
        let matcher = Matcher::train(catalog.records(), &config.classifier);
        let selector = match config.seed {
            Some(seed) => ResponseSelector::seeded(seed),
            None => ResponseSelector::from_os_rng(),
        };

        let mut log = ConversationLog::new(&config.log_path);
        if let Err(e) = log.ensure_initialized() {
            warn!(
                "Could not initialize conversation log {}: {e}",
                config.log_path.display()
            );
        }

        Ok(Self {
            config,
            catalog,
            matcher,
            selector,
            sentiment,
            log,
        })
    }

    /// Answer one user utterance and log the turn.
    ///
    /// A log write failure is reported on the returned turn; the reply is
    /// still produced.
    pub fn respond(&mut self, session: &mut Session, input: &str) -> Turn {
        let sentiment = self.sentiment.sentiment(input);
        let matched = self.matcher.classify(input);
        let response =
            self.selector
                .select(&matched, self.catalog.records(), &self.config.fallback_responses);
        debug!("turn {} of session {}: {matched:?}", session.turn, session.id);

        let entry = ConversationEntry::now(input, response, sentiment);
        let log_error = self.log.append(&entry).err();
        if let Some(e) = &log_error {
            warn!("Failed to record conversation turn: {e}");
        }

        let farewell = FAREWELL_RESPONSES.contains(&entry.response.to_lowercase().as_str());
        session.turn += 1;

        Turn {
            entry,
            matched,
            farewell,
            log_error,
        }
    }

    /// Add an intent, persist the catalog and retrain.
    ///
    /// The matcher is retrained even when persisting fails, since the record
    /// is already part of the in-memory catalog.
    pub fn add_intent(&mut self, record: IntentRecord) -> Result<()> {
        let persisted = match self.catalog.append(record) {
            Err(e @ IntentBotError::Validation(_)) => return Err(e),
            other => other,
        };

        self.matcher.retrain(self.catalog.records());
        persisted
    }

    /// The intent catalog.
    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    /// The trained matcher.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// The conversation log.
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Active configuration.
    pub fn config(&self) -> &BotConfig {
        &self.config
    }
}
