//! Implementation of the `promptweave normalize` and `promptweave export`
//! commands.

use super::{emit, record};
use crate::cli::OutputArgs;
use crate::config::Config;
use crate::error::{PromptError, Result};
use crate::events::{Event, EventAction};
use crate::template::{export_clean, read_template};
use serde_json::json;

/// Execute the `promptweave normalize` command.
pub fn cmd_normalize(args: OutputArgs, config: &Config) -> Result<()> {
    let template = read_template(&args.file)?;

    let Some(output) = &args.output else {
        println!("{}", template.to_json_string(config.pretty_json)?);
        return Ok(());
    };

    template.save(output, config.pretty_json)?;
    eprintln!("Wrote {}", output.display());

    record(
        config,
        Event::new(EventAction::Normalize)
            .with_template(&template.meta_data.template_id)
            .with_details(json!({ "output": output.display().to_string() })),
    );
    Ok(())
}

/// Execute the `promptweave export` command.
pub fn cmd_export(args: OutputArgs, config: &Config) -> Result<()> {
    let template = read_template(&args.file)?;
    let clean = export_clean(&template)?;

    let content = if config.pretty_json {
        serde_json::to_string_pretty(&clean)
    } else {
        serde_json::to_string(&clean)
    }
    .map_err(|e| PromptError::UserError(format!("failed to serialize export: {}", e)))?;

    emit(&content, args.output.as_deref())?;

    if let Some(output) = &args.output {
        record(
            config,
            Event::new(EventAction::Export)
                .with_template(&template.meta_data.template_id)
                .with_details(json!({ "output": output.display().to_string() })),
        );
    }
    Ok(())
}
