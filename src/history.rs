//! Append-only conversation log stored as CSV.
//!
//! The file starts with a fixed header row followed by one row per turn:
//!
//! ```csv
//! User Input,Chatbot Response,Sentiment,Timestamp
//! hello,Hey there!,negative,2024-05-01 09:30:00
//! ```
//!
//! Fields are written with standard CSV quoting, so user input containing
//! commas, quotes or newlines reads back intact. Rows that do not have
//! exactly four fields are skipped on read and reported as
//! [`HistoryRecord::Malformed`].
//!
//! There is no locking: concurrent appenders may interleave rows, each row
//! being written with a single flush.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, WriterBuilder};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{IntentBotError, Result};
use crate::sentiment::Sentiment;

/// Header row of the log file.
pub const HEADER: [&str; 4] = ["User Input", "Chatbot Response", "Sentiment", "Timestamp"];

/// Format of the timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logged turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Raw user utterance.
    pub user_input: String,
    /// Reply shown to the user.
    pub response: String,
    /// Sentiment of the utterance.
    pub sentiment: Sentiment,
    /// Local time of the turn, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

impl ConversationEntry {
    /// Create an entry with an explicit timestamp string.
    pub fn new<I, R, T>(user_input: I, response: R, sentiment: Sentiment, timestamp: T) -> Self
    where
        I: Into<String>,
        R: Into<String>,
        T: Into<String>,
    {
        Self {
            user_input: user_input.into(),
            response: response.into(),
            sentiment,
            timestamp: timestamp.into(),
        }
    }

    /// Create an entry stamped with `at`.
    pub fn at<I: Into<String>, R: Into<String>>(
        user_input: I,
        response: R,
        sentiment: Sentiment,
        at: NaiveDateTime,
    ) -> Self {
        Self::new(
            user_input,
            response,
            sentiment,
            at.format(TIMESTAMP_FORMAT).to_string(),
        )
    }

    /// Create an entry stamped with the current local time.
    pub fn now<I: Into<String>, R: Into<String>>(
        user_input: I,
        response: R,
        sentiment: Sentiment,
    ) -> Self {
        Self::at(user_input, response, sentiment, Local::now().naive_local())
    }

    fn to_row(&self) -> [&str; 4] {
        [
            self.user_input.as_str(),
            self.response.as_str(),
            self.sentiment.as_str(),
            self.timestamp.as_str(),
        ]
    }

    fn from_row(row: &StringRecord) -> std::result::Result<Self, String> {
        if row.len() != HEADER.len() {
            return Err(format!(
                "expected {} fields, found {}",
                HEADER.len(),
                row.len()
            ));
        }

        let sentiment = row[2].parse::<Sentiment>().map_err(|e| e.to_string())?;
        Ok(Self::new(&row[0], &row[1], sentiment, &row[3]))
    }
}

/// An item produced while replaying the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryRecord {
    /// A well-formed row.
    Entry(ConversationEntry),
    /// A row that was skipped.
    Malformed {
        /// 1-based line number in the file.
        line: u64,
        /// Why the row was rejected.
        reason: String,
    },
}

/// The conversation log.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    path: PathBuf,
    initialized: bool,
}

impl ConversationLog {
    /// Handle to the log at `path`. Nothing is touched until
    /// [`ensure_initialized`](Self::ensure_initialized) or the first append.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            initialized: false,
        }
    }

    /// Handle to the log at `path`, with the header ensured.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut log = Self::new(path);
        log.ensure_initialized()?;
        Ok(log)
    }

    /// Create the file with its header row if it does not exist yet.
    ///
    /// Calling this again never adds a second header.
    pub fn ensure_initialized(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => {
                let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
                writer.write_record(HEADER)?;
                writer.flush()?;
                debug!("Created conversation log at {}", self.path.display());
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }

        self.initialized = true;
        Ok(())
    }

    /// Append one row.
    ///
    /// The file is opened for this row only and closed again on every path.
    /// A log removed since initialisation is recreated with its header.
    pub fn append(&mut self, entry: &ConversationEntry) -> Result<()> {
        self.ensure_initialized()?;

        let file = match OpenOptions::new().append(true).open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Conversation log {} disappeared; recreating it",
                    self.path.display()
                );
                self.initialized = false;
                self.ensure_initialized()?;
                OpenOptions::new().append(true).open(&self.path)?
            }
            Err(e) => return Err(e.into()),
        };
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(entry.to_row())?;
        writer.flush()?;

        Ok(())
    }

    /// Replay the log from the start.
    ///
    /// The returned reader is lazy and sees the file as of this call; call
    /// again to restart. A missing file replays as empty.
    pub fn read_all(&self) -> Result<HistoryReader> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No conversation history at {}", self.path.display());
                return Ok(HistoryReader { records: None });
            }
            Err(e) => return Err(e.into()),
        };

        let records = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file)
            .into_records();

        Ok(HistoryReader {
            records: Some(records),
        })
    }

    /// Copy the raw log file to `dest`, returning the number of bytes copied.
    pub fn export_to<P: AsRef<Path>>(&self, dest: P) -> Result<u64> {
        if !self.path.exists() {
            return Err(IntentBotError::not_found(format!(
                "conversation log {}",
                self.path.display()
            )));
        }
        Ok(fs::copy(&self.path, dest.as_ref())?)
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the header has been ensured by this handle.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

/// Lazy iterator over the rows of a conversation log.
pub struct HistoryReader {
    records: Option<StringRecordsIntoIter<File>>,
}

impl std::fmt::Debug for HistoryReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryReader")
            .field("open", &self.records.is_some())
            .finish()
    }
}

impl HistoryReader {
    /// Collect only the well-formed entries.
    pub fn entries(self) -> Result<Vec<ConversationEntry>> {
        let mut entries = Vec::new();
        for record in self {
            if let HistoryRecord::Entry(entry) = record? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}

impl Iterator for HistoryReader {
    type Item = Result<HistoryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.records.as_mut()?.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e.into())),
        };

        let line = row.position().map(|p| p.line()).unwrap_or(0);
        Some(Ok(match ConversationEntry::from_row(&row) {
            Ok(entry) => HistoryRecord::Entry(entry),
            Err(reason) => {
                debug!("Malformed chat log row at line {line}: {reason}");
                HistoryRecord::Malformed { line, reason }
            }
        }))
    }
}
