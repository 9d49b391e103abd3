//! Error types for the intentbot library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`IntentBotError`] enum. Recoverable conditions (a missing catalog, a
//! malformed history row, a classification failure) are handled inside the
//! library and never surface here; what does surface are persistence and
//! validation failures that the caller has to decide about.
//!
//! # Examples
//!
//! ```
//! use intentbot::error::{IntentBotError, Result};
//!
//! fn check_tag(tag: &str) -> Result<()> {
//!     if tag.is_empty() {
//!         return Err(IntentBotError::validation("intent tag must not be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_tag("").is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for intentbot operations.
#[derive(Error, Debug)]
pub enum IntentBotError {
    /// I/O errors (file operations on the catalog or the log)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input rejected before any state was touched
    #[error("Validation error: {0}")]
    Validation(String),

    /// Store-related errors (missing or unusable files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Training or prediction errors
    #[error("Classification error: {0}")]
    Classification(String),

    /// Configuration errors
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with IntentBotError.
pub type Result<T> = std::result::Result<T, IntentBotError>;

impl IntentBotError {
    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        IntentBotError::Validation(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        IntentBotError::Storage(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        IntentBotError::Analysis(msg.into())
    }

    /// Create a new classification error.
    pub fn classification<S: Into<String>>(msg: S) -> Self {
        IntentBotError::Classification(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        IntentBotError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        IntentBotError::Storage(format!("Not found: {}", msg.into()))
    }
}
