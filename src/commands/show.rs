//! Implementation of the `promptweave show` command.
//!
//! Renders the template tree with display values (the same strings a
//! preview panel shows) and the compiled prompt.

use super::resolve_platform;
use crate::cli::ShowArgs;
use crate::config::{Config, Locale};
use crate::error::{PromptError, Result};
use crate::template::{Template, read_template};
use std::fmt::Write;

const RULE: &str =
    "================================================================================";

/// Execute the `promptweave show` command.
pub fn cmd_show(args: ShowArgs, config: &Config) -> Result<()> {
    let locale = match args.locale.as_deref() {
        Some(raw) => Locale::from_str(raw).ok_or_else(|| {
            PromptError::UserError(format!("unknown locale '{}' (expected ko or en)", raw))
        })?,
        None => config.locale,
    };

    let template = read_template(&args.file)?;
    let platform = resolve_platform(args.platform.as_deref(), &template, config);

    print!("{}", render_show(&template, locale, &platform));
    Ok(())
}

/// Render the full `show` output.
pub(crate) fn render_show(template: &Template, locale: Locale, platform: &str) -> String {
    let korean = locale.is_korean();
    let meta = &template.meta_data;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "{} [{}] v{}",
        meta.template_name, meta.template_id, meta.version
    );
    let _ = writeln!(out, "{}", RULE);

    if let Some(description) = &meta.description {
        let _ = writeln!(out, "{}", description);
    }

    for section in &template.prompt_sections {
        let _ = writeln!(out);
        let mut tags = Vec::new();
        if let Some(order) = &section.order {
            tags.push(format!("order {}", order));
        }
        if section.is_midjourney_params {
            tags.push("params".to_string());
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" <{}>", tags.join(", "))
        };

        let _ = writeln!(
            out,
            "{} {} ({}){}",
            checkbox(section.is_active),
            section.label_for(korean),
            section.section_id,
            tags
        );

        for component in &section.components {
            let _ = writeln!(
                out,
                "    {} {} ({})",
                checkbox(component.is_active),
                component.label_for(korean),
                component.component_id
            );

            for attr in &component.attributes {
                let value = if korean {
                    attr.display_value()
                } else {
                    attr.value.as_ref().map(|v| v.render()).unwrap_or_default()
                };
                let _ = writeln!(
                    out,
                    "        {} {} ({}): {}",
                    checkbox(attr.is_active),
                    attr.label_for(korean),
                    attr.attr_id,
                    value
                );
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Prompt ({}):", platform);
    let _ = writeln!(out, "  {}", template.compile(platform));
    out
}

fn checkbox(active: bool) -> &'static str {
    if active { "[x]" } else { "[ ]" }
}
