//! Implementation of the `promptweave set` command.
//!
//! Replaces one attribute's value through the copy-on-write edit and emits
//! the new template. The loaded template is never modified in place.

use super::{emit, record, resolve_platform};
use crate::cli::SetArgs;
use crate::config::Config;
use crate::error::{PromptError, Result};
use crate::events::{Event, EventAction};
use crate::template::{AttrValue, STDIN_PATH, read_template, set_attribute_value};
use serde_json::{Value, json};
use std::path::Path;

/// Execute the `promptweave set` command.
pub fn cmd_set(args: SetArgs, config: &Config) -> Result<()> {
    if args.in_place && args.file == Path::new(STDIN_PATH) {
        return Err(PromptError::UserError(
            "--in-place cannot be used when reading from stdin; use --output instead".to_string(),
        ));
    }

    let new_value = parse_value(&args.value, args.json)?;
    let template = read_template(&args.file)?;

    let resolved = template
        .find_attribute(&args.section, &args.component, &args.attr)
        .is_some();
    if !resolved {
        eprintln!(
            "Warning: attribute '{}/{}/{}' not found; template left unchanged",
            args.section, args.component, args.attr
        );
    }

    let updated = set_attribute_value(
        &template,
        &args.section,
        &args.component,
        &args.attr,
        new_value.clone(),
    );

    let destination = if args.in_place {
        Some(args.file.as_path())
    } else {
        args.output.as_deref()
    };

    let content = updated.to_json_string(config.pretty_json)?;
    emit(&content, destination)?;

    if let Some(path) = destination {
        let platform = resolve_platform(args.platform.as_deref(), &updated, config);
        println!("{}", updated.compile(&platform));

        if resolved {
            record(
                config,
                Event::new(EventAction::SetValue)
                    .with_template(&updated.meta_data.template_id)
                    .with_details(json!({
                        "section": args.section,
                        "component": args.component,
                        "attr": args.attr,
                        "value": new_value,
                        "output": path.display().to_string(),
                    })),
            );
        }
    }

    Ok(())
}

/// Turn the raw CLI argument into an attribute value.
///
/// Without `--json` the argument is taken as text verbatim.
pub(crate) fn parse_value(raw: &str, as_json: bool) -> Result<AttrValue> {
    if !as_json {
        return Ok(AttrValue::Text(raw.to_string()));
    }

    let parsed: Value = serde_json::from_str(raw)
        .map_err(|e| PromptError::UserError(format!("invalid JSON value '{}': {}", raw, e)))?;

    AttrValue::from_json(&parsed).ok_or_else(|| {
        PromptError::UserError(format!(
            "value must be a string, number, or list (got '{}')",
            raw
        ))
    })
}
