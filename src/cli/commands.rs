//! Command implementations for the intentbot CLI.

use std::fs;
use std::io::{self, BufRead, Write};

use log::warn;

use crate::catalog::{IntentCatalog, IntentRecord};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::BotConfig;
use crate::error::Result;
use crate::history::{ConversationLog, HistoryRecord};
use crate::session::{Chatbot, FAREWELL_MESSAGE, Session};

/// Execute a CLI command.
pub fn execute_command(args: IntentBotArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    match &args.command {
        Command::Chat(chat_args) => chat(chat_args.clone(), config),
        Command::Ask(ask_args) => ask(ask_args.clone(), config, &args),
        Command::History(history_args) => show_history(history_args.clone(), config, &args),
        Command::AddIntent(add_args) => add_intent(add_args.clone(), config, &args),
        Command::Intents => list_intents(config, &args),
        Command::About => about(&args),
    }
}

/// Build the effective configuration: file values, then command line overrides.
pub fn resolve_config(args: &IntentBotArgs) -> Result<BotConfig> {
    let mut config = match &args.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };

    if let Some(intents) = &args.intents {
        config.intents_path = intents.clone();
    }
    if let Some(log) = &args.log {
        config.log_path = log.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}

/// Interactive conversation on stdin/stdout.
fn chat(args: ChatArgs, config: BotConfig) -> Result<()> {
    let mut bot = Chatbot::new(config)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let name = match args.name {
        Some(name) => Some(name),
        None => {
            write!(output, "Please enter your name: ")?;
            output.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            Some(line)
        }
    };

    let mut session = Session::new(name);
    run_chat(&mut bot, &mut session, input, output)?;
    Ok(())
}

/// Drive a conversation until a farewell or end of input.
///
/// Blank lines are ignored. Returns the number of turns taken.
pub fn run_chat<R: BufRead, W: Write>(
    bot: &mut Chatbot,
    session: &mut Session,
    input: R,
    mut output: W,
) -> Result<u64> {
    writeln!(output, "{}", session.greeting())?;
    let started = session.turn;

    let mut lines = input.lines();
    loop {
        write!(output, "You: ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let turn = bot.respond(session, text);
        writeln!(output, "Chatbot: {}", turn.response())?;
        if let Some(e) = &turn.log_error {
            writeln!(output, "(This turn was not saved: {e})")?;
        }

        if turn.farewell {
            writeln!(output, "{FAREWELL_MESSAGE}")?;
            break;
        }
    }

    Ok(session.turn - started)
}

/// Answer a single message.
fn ask(args: AskArgs, config: BotConfig, cli_args: &IntentBotArgs) -> Result<()> {
    let mut bot = Chatbot::new(config)?;
    let turn = bot.respond(&mut Session::default(), &args.text);

    output_result(
        &AskResult {
            response: turn.entry.response.clone(),
            tag: turn.matched.tag().map(str::to_string),
            sentiment: turn.entry.sentiment.to_string(),
            timestamp: turn.entry.timestamp.clone(),
        },
        cli_args,
    )?;

    if turn.farewell && cli_args.verbosity() > 0 && cli_args.output_format == OutputFormat::Human
    {
        println!("{FAREWELL_MESSAGE}");
    }

    Ok(())
}

/// Replay or export the conversation log.
fn show_history(args: HistoryArgs, config: BotConfig, cli_args: &IntentBotArgs) -> Result<()> {
    let log = ConversationLog::new(&config.log_path);

    if let Some(dest) = args.export {
        let bytes = log.export_to(&dest)?;
        return output_result(
            &ExportResult {
                destination: dest.display().to_string(),
                bytes,
            },
            cli_args,
        );
    }

    let mut entries = Vec::new();
    let mut skipped_rows = 0;
    for record in log.read_all()? {
        match record? {
            HistoryRecord::Entry(entry) => entries.push(entry),
            HistoryRecord::Malformed { .. } => {
                warn!("Malformed row detected in chat log. Skipping.");
                skipped_rows += 1;
            }
        }
    }

    output_result(
        &HistoryResult {
            entries,
            skipped_rows,
        },
        cli_args,
    )
}

/// Add an intent to the catalog.
fn add_intent(args: AddIntentArgs, config: BotConfig, cli_args: &IntentBotArgs) -> Result<()> {
    let patterns = collect_lines(&args.patterns, args.patterns_file.as_deref())?;
    let responses = collect_lines(&args.responses, args.responses_file.as_deref())?;
    let record = IntentRecord::from_lines(&args.tag, &patterns, &responses);

    if record.responses.is_empty() {
        warn!(
            "Intent '{}' has no responses and will fall back when matched",
            record.tag
        );
    }

    let result = IntentAddedResult {
        tag: record.tag.clone(),
        patterns: record.patterns.len(),
        responses: record.responses.len(),
        total_intents: 0,
    };

    let mut catalog = IntentCatalog::load(&config.intents_path);
    catalog.append(record)?;

    output_result(
        &IntentAddedResult {
            total_intents: catalog.len(),
            ..result
        },
        cli_args,
    )
}

fn collect_lines(items: &[String], file: Option<&std::path::Path>) -> Result<String> {
    let mut text = items.join("\n");
    if let Some(path) = file {
        text.push('\n');
        text.push_str(&fs::read_to_string(path)?);
    }
    Ok(text)
}

/// List the intents in the catalog.
fn list_intents(config: BotConfig, cli_args: &IntentBotArgs) -> Result<()> {
    let catalog = IntentCatalog::load(&config.intents_path);

    output_result(
        &IntentListResult {
            path: catalog.path().display().to_string(),
            intents: catalog
                .records()
                .iter()
                .map(|r| IntentSummary {
                    tag: r.tag.clone(),
                    patterns: r.patterns.len(),
                    responses: r.responses.len(),
                })
                .collect(),
        },
        cli_args,
    )
}

/// Describe the chatbot.
fn about(cli_args: &IntentBotArgs) -> Result<()> {
    output_result(
        &AboutInfo {
            name: "intentbot".to_string(),
            version: crate::VERSION.to_string(),
            description: "A chatbot that matches what you type against a catalog of intents \
                          using word n-gram features and a logistic regression model, answers \
                          with one of the intent's responses, and keeps a CSV log of every \
                          turn together with its sentiment."
                .to_string(),
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Cursor;

    fn bot_with_farewell(dir: &std::path::Path) -> Chatbot {
        let config = BotConfig {
            intents_path: dir.join("intents.json"),
            log_path: dir.join("chat_log.csv"),
            seed: Some(1),
            ..Default::default()
        };
        let mut bot = Chatbot::new(config).unwrap();
        bot.add_intent(IntentRecord::new(
            "farewell",
            vec!["goodbye".to_string(), "see you".to_string()],
            vec!["Bye".to_string()],
        ))
        .unwrap();
        bot
    }

    #[test]
    fn test_run_chat_until_farewell() {
        let dir = tempfile::tempdir().unwrap();
        let mut bot = bot_with_farewell(dir.path());
        let mut session = Session::new(Some("Ada".to_string()));
        let mut out = Vec::new();

        let turns = run_chat(
            &mut bot,
            &mut session,
            Cursor::new("\n   \ngoodbye\nnever read\n"),
            &mut out,
        )
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(turns, 1);
        assert!(out.starts_with("Hello Ada! Welcome to the chatbot.\n"));
        assert!(out.contains("Chatbot: Bye\n"));
        assert!(out.contains(FAREWELL_MESSAGE));
        assert_eq!(bot.log().read_all().unwrap().count(), 1);
    }

    #[test]
    fn test_run_chat_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut bot = bot_with_farewell(dir.path());
        let mut session = Session::default();
        session.turn = 2;

        let mut out = Vec::new();
        let turns = run_chat(&mut bot, &mut session, Cursor::new("what\n"), &mut out).unwrap();

        assert_eq!(turns, 1);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Welcome back, there!"));
        assert!(!out.contains(FAREWELL_MESSAGE));
    }

    #[test]
    fn test_resolve_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("bot.json");
        fs::write(&config_path, r#"{"log_path": "from_file.csv", "seed": 1}"#).unwrap();

        let args = IntentBotArgs::try_parse_from([
            "intentbot",
            "--config",
            config_path.to_str().unwrap(),
            "--seed",
            "9",
            "--intents",
            "mine.json",
            "intents",
        ])
        .unwrap();

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.intents_path, std::path::PathBuf::from("mine.json"));
        assert_eq!(config.log_path, std::path::PathBuf::from("from_file.csv"));
    }

    #[test]
    fn test_collect_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("patterns.txt");
        fs::write(&file, "from file\n\nsecond\n").unwrap();

        let text = collect_lines(&["inline".to_string()], Some(&file)).unwrap();
        let record = IntentRecord::from_lines("t", &text, "");
        assert_eq!(record.patterns, vec!["inline", "from file", "second"]);
    }
}
