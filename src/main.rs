//! Promptweave: structured prompt template editor.
//!
//! This is the main entry point for the `promptweave` CLI. It parses
//! arguments, loads configuration, dispatches to the appropriate command
//! handler, and maps errors to exit codes.

use promptweave::cli::Cli;
use promptweave::config::Config;
use promptweave::{commands, exit_codes};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_args();

    let result =
        Config::resolve(cli.config.as_deref()).and_then(|config| commands::dispatch(cli.command, &config));

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
