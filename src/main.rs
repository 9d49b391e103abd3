//! intentbot CLI binary.
//!
//! Log output goes to stderr as `[LEVEL] message`. The level follows the
//! flags: warnings by default, `-v` adds info, `-vv` adds debug and `-q`
//! keeps errors only. `INTENTBOT_LOG` takes env_logger filter directives
//! (e.g. `INTENTBOT_LOG=intentbot::history=debug`) and overrides the flags
//! for the modules it names.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;

use intentbot::cli::args::IntentBotArgs;
use intentbot::cli::commands::execute_command;

const LOG_ENV: &str = "INTENTBOT_LOG";

fn init_logging(args: &IntentBotArgs) {
    Builder::new()
        .filter_level(args.log_level())
        .parse_env(LOG_ENV)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() {
    let args = IntentBotArgs::parse();
    init_logging(&args);

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
