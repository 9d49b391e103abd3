//! Command line argument parsing for the intentbot CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// intentbot - A small intent-matching chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "intentbot")]
#[command(about = "A small intent-matching chatbot with a persistent conversation log")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct IntentBotArgs {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "INTENTBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Intent catalog file (overrides the configuration)
    #[arg(long, value_name = "INTENTS_FILE")]
    pub intents: Option<PathBuf>,

    /// Conversation log file (overrides the configuration)
    #[arg(long, value_name = "LOG_FILE")]
    pub log: Option<PathBuf>,

    /// Seed for response selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl IntentBotArgs {
    /// Get the effective verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug).
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1).min(3)
        }
    }

    /// Log level for the effective verbosity.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start an interactive conversation
    Chat(ChatArgs),

    /// Answer a single message
    Ask(AskArgs),

    /// Show the conversation history
    History(HistoryArgs),

    /// Add a new intent to the catalog
    #[command(name = "add-intent")]
    AddIntent(AddIntentArgs),

    /// List the intents in the catalog
    Intents,

    /// Describe the chatbot
    About,
}

/// Arguments for an interactive conversation
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Name to greet the user with
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for a single message
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// Message text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for showing history
#[derive(Parser, Debug, Clone)]
pub struct HistoryArgs {
    /// Copy the raw log file to this path instead of printing it
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

/// Arguments for adding an intent
#[derive(Parser, Debug, Clone)]
pub struct AddIntentArgs {
    /// Intent tag
    #[arg(short, long)]
    pub tag: String,

    /// Example phrasing (repeatable)
    #[arg(short, long = "pattern")]
    pub patterns: Vec<String>,

    /// Candidate reply (repeatable)
    #[arg(short, long = "response")]
    pub responses: Vec<String>,

    /// File with one pattern per line
    #[arg(long, value_name = "FILE")]
    pub patterns_file: Option<PathBuf>,

    /// File with one response per line
    #[arg(long, value_name = "FILE")]
    pub responses_file: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
