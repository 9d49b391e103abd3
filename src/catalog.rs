//! Intent catalog backed by a JSON file.
//!
//! The store holds an array of `{tag, patterns, responses}` objects. It is
//! read once at startup and rewritten wholesale on every append. Concurrent
//! writers are not coordinated: the last full-file write wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{IntentBotError, Result};

/// A named intent with example phrasings and candidate replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// Intent name.
    pub tag: String,
    /// Example phrasings used for training.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Candidate replies; at least one is needed for the intent to answer.
    #[serde(default)]
    pub responses: Vec<String>,
}

impl IntentRecord {
    /// Create a new record.
    pub fn new<S: Into<String>>(tag: S, patterns: Vec<String>, responses: Vec<String>) -> Self {
        Self {
            tag: tag.into(),
            patterns,
            responses,
        }
    }

    /// Build a record from one-item-per-line text blocks.
    ///
    /// Lines are trimmed and blank lines dropped.
    pub fn from_lines(tag: &str, patterns: &str, responses: &str) -> Self {
        fn lines(text: &str) -> Vec<String> {
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        }

        Self::new(tag.trim(), lines(patterns), lines(responses))
    }

    /// Check the record can be added to a catalog.
    pub fn validate(&self) -> Result<()> {
        if self.tag.trim().is_empty() {
            return Err(IntentBotError::validation("intent tag must not be empty"));
        }
        Ok(())
    }

    /// Whether the record can answer: it has at least one response.
    pub fn is_usable(&self) -> bool {
        !self.responses.is_empty()
    }
}

/// In-memory intent catalog with its backing file.
#[derive(Debug, Clone)]
pub struct IntentCatalog {
    path: PathBuf,
    records: Vec<IntentRecord>,
}

impl IntentCatalog {
    /// Load the catalog stored at `path`.
    ///
    /// A missing or malformed store is not fatal: the problem is logged and
    /// the catalog starts empty.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let records = match Self::read(&path) {
            Ok(records) => {
                info!(
                    "Intents loaded successfully from {}: {} records",
                    path.display(),
                    records.len()
                );
                records
            }
            Err(e) => {
                warn!("Error loading intents file {}: {e}", path.display());
                Vec::new()
            }
        };

        Self { path, records }
    }

    /// Create a catalog from in-memory records, persisted to `path` on append.
    pub fn with_records<P: AsRef<Path>>(path: P, records: Vec<IntentRecord>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            records,
        }
    }

    fn read(path: &Path) -> Result<Vec<IntentRecord>> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => IntentBotError::not_found(path.display().to_string()),
            _ => IntentBotError::Io(e),
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Add `record` and rewrite the store.
    ///
    /// Validation happens before anything is touched, so a rejected record
    /// leaves both memory and disk unchanged. If the write fails the record
    /// stays in memory and the error is returned. Duplicate tags are
    /// accepted; the first record with a tag answers for it.
    pub fn append(&mut self, record: IntentRecord) -> Result<()> {
        record.validate()?;

        if self.records.iter().any(|r| r.tag == record.tag) {
            warn!(
                "Intent tag '{}' already exists; the earlier record answers first",
                record.tag
            );
        }

        self.records.push(record);
        self.persist()
    }

    /// Write the full catalog to its store with four-space indentation.
    pub fn persist(&self) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        self.records.serialize(&mut serializer)?;

        fs::write(&self.path, buf).map_err(|e| {
            IntentBotError::storage(format!(
                "Failed to write intents to {}: {e}",
                self.path.display()
            ))
        })
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[IntentRecord] {
        &self.records
    }

    /// First record carrying `tag`.
    pub fn find(&self, tag: &str) -> Option<&IntentRecord> {
        self.records.iter().find(|r| r.tag == tag)
    }

    /// Tags in insertion order (duplicates included).
    pub fn tags(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.tag.as_str()).collect()
    }

    /// Location of the backing store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
