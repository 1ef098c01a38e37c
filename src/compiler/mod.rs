//! Prompt compiler.
//!
//! Flattens a template into the single delimited string that is handed to an
//! image/video generation tool. Compilation is a pure function of the
//! template: the same document always yields the same prompt.
//!
//! # Output shape
//!
//! ```text
//! <section 1 tokens>, <section 2 tokens>, ... --param1 --param2
//! ^ body (prompt/section separators)          ^ parameter sections, space-joined
//! ```
//!
//! # Ordering
//!
//! Active sections are stably sorted by `order` (missing = 0), so sections
//! sharing an order keep their source order. Components and attributes are
//! visited in source order.

use crate::template::{Attribute, Section, Template};
use std::collections::HashSet;

#[cfg(test)]
mod tests;

/// Compile a template into its prompt string.
///
/// `None` compiles to the empty string. `platform` is accepted for
/// platform-specific output but does not currently change the result.
///
/// # Examples
///
/// ```
/// use promptweave::compiler::compile;
/// use promptweave::template::load;
///
/// let template = load(r#"{"prompt_sections":[
///   {"section_id":"body","components":[{"component_id":"c","attributes":[
///     {"attr_id":"sky","value":"blue sky"},{"attr_id":"grass","value":"green grass"}]}]},
///   {"section_id":"params","is_midjourney_params":true,"components":[{"component_id":"p","attributes":[
///     {"attr_id":"ar","value":"16:9","prefix":"--ar "}]}]}
/// ]}"#).unwrap();
///
/// assert_eq!(compile(Some(&template), "midjourney"), "blue sky, green grass --ar 16:9");
/// assert_eq!(compile(None, "midjourney"), "");
/// ```
pub fn compile(template: Option<&Template>, platform: &str) -> String {
    let Some(template) = template else {
        return String::new();
    };
    log::trace!(
        "compiling '{}' for platform '{}'",
        template.meta_data.template_id,
        platform
    );

    let settings = template.settings();

    let mut sections: Vec<&Section> = template
        .prompt_sections
        .iter()
        .filter(|s| s.is_active)
        .collect();
    // sort_by is stable: equal orders keep source order
    sections.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));

    let mut body_parts: Vec<String> = Vec::new();
    let mut param_tokens: Vec<String> = Vec::new();

    for section in sections {
        if section.is_midjourney_params {
            param_tokens.extend(active_attributes(section).filter_map(param_token));
            continue;
        }

        let tokens: Vec<String> = active_attributes(section).filter_map(body_token).collect();
        if !tokens.is_empty() {
            body_parts.push(tokens.join(settings.prompt_separator()));
        }
    }

    let mut prompt = body_parts.join(settings.section_separator());

    if settings.removes_duplicates() {
        prompt = dedupe_comma_tokens(&prompt);
    }

    if !param_tokens.is_empty() {
        prompt.push(' ');
        prompt.push_str(&param_tokens.join(" "));
    }

    prompt
}

/// Active attributes of active components, in source order.
fn active_attributes(section: &Section) -> impl Iterator<Item = &Attribute> {
    section
        .components
        .iter()
        .filter(|c| c.is_active)
        .flat_map(|c| c.attributes.iter())
        .filter(|a| a.is_active)
}

/// Body token: truthy values and numeric zero, with optional weight suffix.
fn body_token(attr: &Attribute) -> Option<String> {
    let value = attr.value.as_ref()?;
    if !value.is_truthy() && !value.is_zero() {
        return None;
    }

    let mut rendered = value.render();
    if let Some(suffix) = attr.weight.as_ref().and_then(|w| w.suffix()) {
        rendered.push_str(&suffix);
    }
    Some(rendered)
}

/// Parameter token: truthy values only (zero is dropped here), prefixed.
fn param_token(attr: &Attribute) -> Option<String> {
    let value = attr.value.as_ref().filter(|v| v.is_truthy())?;
    Some(format!("{}{}", attr.prefix, value.to_plain_string()))
}

/// Split on commas, trim, drop empties, keep first occurrences, rejoin.
///
/// This works on the joined prompt, so a single attribute whose own value
/// contains commas is split and deduplicated too.
pub fn dedupe_comma_tokens(prompt: &str) -> String {
    let mut seen = HashSet::new();
    prompt
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .filter(|piece| seen.insert(*piece))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Template {
    /// Compile this template. See [`compile`].
    pub fn compile(&self, platform: &str) -> String {
        compile(Some(self), platform)
    }
}
