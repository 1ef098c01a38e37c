//! Command implementations for promptweave.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the helpers they share: platform resolution,
//! output emission, and history logging.

mod builtin;
mod compile;
mod emit;
mod set;
mod show;


use crate::cli::Command;
use crate::config::Config;
use crate::error::Result;
use crate::events::{Event, append_event};
use crate::template::Template;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Compile(args) => compile::cmd_compile(args, config),
        Command::Show(args) => show::cmd_show(args, config),
        Command::Set(args) => set::cmd_set(args, config),
        Command::Normalize(args) => emit::cmd_normalize(args, config),
        Command::Export(args) => emit::cmd_export(args, config),
        Command::Sample => builtin::cmd_sample(config),
        Command::New => builtin::cmd_new(config),
    }
}

/// Pick the platform handed to the compiler.
///
/// Order: explicit flag, the template's `default_platform`, the config.
pub(crate) fn resolve_platform(flag: Option<&str>, template: &Template, config: &Config) -> String {
    flag.filter(|p| !p.is_empty())
        .map(str::to_string)
        .or_else(|| {
            template
                .global_settings
                .as_ref()
                .and_then(|s| s.default_platform())
                .map(str::to_string)
        })
        .unwrap_or_else(|| config.default_platform.clone())
}

/// Write `content` to `output` atomically, or print it to stdout.
pub(crate) fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut content = content.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            crate::fs::atomic_write_file(path, &content)?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

/// Append an event to the configured history file.
///
/// History is best-effort: a failed append is reported but does not fail
/// the command that already wrote its output.
pub(crate) fn record(config: &Config, event: Event) {
    let Some(history_file) = &config.history_file else {
        return;
    };

    if let Err(e) = append_event(history_file, &event) {
        eprintln!("Warning: failed to log {} event: {}", event.action, e);
    }
}
