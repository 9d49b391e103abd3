//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{IntentBotArgs, OutputFormat};
use crate::error::Result;
use crate::history::ConversationEntry;

/// Rendering of a command result for people.
pub trait HumanOutput {
    /// Lines to print in human mode.
    fn to_human(&self) -> String;
}

/// Result structure for a single turn.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResult {
    pub response: String,
    pub tag: Option<String>,
    pub sentiment: String,
    pub timestamp: String,
}

impl HumanOutput for AskResult {
    fn to_human(&self) -> String {
        self.response.clone()
    }
}

/// Result structure for history replay.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub entries: Vec<ConversationEntry>,
    pub skipped_rows: usize,
}

impl HumanOutput for HistoryResult {
    fn to_human(&self) -> String {
        if self.entries.is_empty() {
            return "No conversation history yet.".to_string();
        }

        let mut out = String::from("Conversation History:\n═════════════════════\n");
        for entry in &self.entries {
            out.push_str(&format!("You: {}\n", entry.user_input));
            out.push_str(&format!("Chatbot: {}\n", entry.response));
            out.push_str(&format!(
                "Sentiment: {} | {}\n",
                entry.sentiment, entry.timestamp
            ));
            out.push_str("─────────────\n");
        }
        if self.skipped_rows > 0 {
            out.push_str(&format!("Skipped rows: {}\n", self.skipped_rows));
        }
        out.trim_end().to_string()
    }
}

/// Result structure for history export.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResult {
    pub destination: String,
    pub bytes: u64,
}

impl HumanOutput for ExportResult {
    fn to_human(&self) -> String {
        format!(
            "Chat history exported to {} ({})",
            self.destination,
            format_bytes(self.bytes)
        )
    }
}

/// Summary of one catalog record.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntentSummary {
    pub tag: String,
    pub patterns: usize,
    pub responses: usize,
}

/// Result structure for listing intents.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntentListResult {
    pub path: String,
    pub intents: Vec<IntentSummary>,
}

impl HumanOutput for IntentListResult {
    fn to_human(&self) -> String {
        if self.intents.is_empty() {
            return format!("No intents in {}", self.path);
        }

        let width = self.intents.iter().map(|i| i.tag.len()).max().unwrap_or(0);
        let mut out = format!("Intents ({}):\n", self.path);
        for intent in &self.intents {
            out.push_str(&format!(
                "  {:<width$}  {} patterns, {} responses\n",
                intent.tag, intent.patterns, intent.responses
            ));
        }
        out.trim_end().to_string()
    }
}

/// Result structure for adding an intent.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntentAddedResult {
    pub tag: String,
    pub patterns: usize,
    pub responses: usize,
    pub total_intents: usize,
}

impl HumanOutput for IntentAddedResult {
    fn to_human(&self) -> String {
        format!(
            "New intent added successfully: {} ({} patterns, {} responses)",
            self.tag, self.patterns, self.responses
        )
    }
}

/// Result structure for the about page.
#[derive(Debug, Serialize, Deserialize)]
pub struct AboutInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl HumanOutput for AboutInfo {
    fn to_human(&self) -> String {
        format!("{} {}\n\n{}", self.name, self.version, self.description)
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &IntentBotArgs) -> Result<()> {
    println!("{}", render(result, args.output_format)?);
    Ok(())
}

/// Render a result in `format`.
pub fn render<T: Serialize + HumanOutput>(result: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(result.to_human()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

/// Format bytes into human-readable format.
fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        let unit = UNITS[unit_index];
        format!("{bytes} {unit}")
    } else {
        let unit = UNITS[unit_index];
        format!("{size:.1} {unit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }

    #[test]
    fn test_render_ask() {
        let result = AskResult {
            response: "Hey there!".to_string(),
            tag: Some("greeting".to_string()),
            sentiment: "positive".to_string(),
            timestamp: "2024-05-01 09:30:00".to_string(),
        };

        assert_eq!(render(&result, OutputFormat::Human).unwrap(), "Hey there!");

        let json: serde_json::Value =
            serde_json::from_str(&render(&result, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["tag"], "greeting");
        assert_eq!(json["sentiment"], "positive");
    }

    #[test]
    fn test_render_history() {
        let empty = HistoryResult {
            entries: vec![],
            skipped_rows: 0,
        };
        assert_eq!(empty.to_human(), "No conversation history yet.");

        let history = HistoryResult {
            entries: vec![ConversationEntry::new(
                "hello",
                "Hey there!",
                Sentiment::Negative,
                "2024-05-01 09:30:00",
            )],
            skipped_rows: 1,
        };
        let text = history.to_human();
        assert!(text.contains("You: hello"));
        assert!(text.contains("Chatbot: Hey there!"));
        assert!(text.contains("Sentiment: negative | 2024-05-01 09:30:00"));
        assert!(text.ends_with("Skipped rows: 1"));
    }

    #[test]
    fn test_render_intents() {
        let list = IntentListResult {
            path: "intents.json".to_string(),
            intents: vec![
                IntentSummary {
                    tag: "greeting".to_string(),
                    patterns: 2,
                    responses: 1,
                },
                IntentSummary {
                    tag: "bye".to_string(),
                    patterns: 1,
                    responses: 3,
                },
            ],
        };

        let text = list.to_human();
        assert!(text.contains("  greeting  2 patterns, 1 responses"));
        assert!(text.contains("  bye       1 patterns, 3 responses"));
    }
}
