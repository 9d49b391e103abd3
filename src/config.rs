//! Configuration for the chatbot.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IntentBotError, Result};

/// Default location of the intent catalog.
pub const DEFAULT_INTENTS_PATH: &str = "intents.json";

/// Default location of the conversation log.
pub const DEFAULT_LOG_PATH: &str = "chat_log.csv";

/// Replies used when no intent matches.
pub const DEFAULT_FALLBACK_RESPONSES: [&str; 2] = [
    "I'm sorry, I didn't understand that. Could you rephrase?",
    "I'm not sure how to respond. Could you clarify?",
];

/// Top-level chatbot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Path of the JSON intent catalog.
    pub intents_path: PathBuf,
    /// Path of the CSV conversation log.
    pub log_path: PathBuf,
    /// Replies used when no intent matches.
    pub fallback_responses: Vec<String>,
    /// Seed for response selection; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Matcher settings.
    pub classifier: ClassifierConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            intents_path: PathBuf::from(DEFAULT_INTENTS_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            fallback_responses: DEFAULT_FALLBACK_RESPONSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            seed: None,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl BotConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: BotConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()
    }
}

/// Settings for the feature representation and the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Smallest word n-gram used as a feature.
    pub min_ngram: usize,
    /// Largest word n-gram used as a feature.
    pub max_ngram: usize,
    /// Inverse L2 regularization strength (C).
    pub regularization: f64,
    /// Upper bound on gradient steps while fitting.
    pub max_iterations: usize,
    /// Fitting stops once every gradient component is below this.
    pub tolerance: f64,
    /// Gradient step size.
    pub learning_rate: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_ngram: 1,
            max_ngram: 4,
            regularization: 1.0,
            max_iterations: 10_000,
            tolerance: 1e-4,
            learning_rate: 0.5,
        }
    }
}

impl ClassifierConfig {
    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.min_ngram == 0 {
            return Err(IntentBotError::invalid_config("min_ngram must be at least 1"));
        }
        if self.max_ngram < self.min_ngram {
            return Err(IntentBotError::invalid_config(format!(
                "max_ngram ({}) must be >= min_ngram ({})",
                self.max_ngram, self.min_ngram
            )));
        }
        if !(self.regularization > 0.0) {
            return Err(IntentBotError::invalid_config("regularization must be positive"));
        }
        if !(self.learning_rate > 0.0) {
            return Err(IntentBotError::invalid_config("learning_rate must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_config_default() {
        let config = BotConfig::default();
        assert_eq!(config.intents_path, PathBuf::from("intents.json"));
        assert_eq!(config.log_path, PathBuf::from("chat_log.csv"));
        assert_eq!(config.fallback_responses.len(), 2);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_classifier_config_default() {
        let config = ClassifierConfig::default();
        assert_eq!(config.min_ngram, 1);
        assert_eq!(config.max_ngram, 4);
        assert_eq!(config.regularization, 1.0);
        assert_eq!(config.max_iterations, 10_000);
    }

    #[test]
    fn test_invalid_classifier_config() {
        let config = ClassifierConfig {
            min_ngram: 3,
            max_ngram: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClassifierConfig {
            regularization: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.json");
        std::fs::write(&path, r#"{"seed": 7, "classifier": {"max_ngram": 2}}"#).unwrap();

        let config = BotConfig::load(&path).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.classifier.max_ngram, 2);
        assert_eq!(config.classifier.min_ngram, 1);
        assert_eq!(config.log_path, PathBuf::from("chat_log.csv"));
    }
}
