//! Built-in templates compiled into the binary.

use super::Template;
use super::io::load;
use crate::error::Result;

/// A complete example template (a character prompt in four sections).
pub const SAMPLE_TEMPLATE_JSON: &str = include_str!("../../templates/sample.json");

/// Starting point for a new template: no sections, dedupe enabled.
pub const EMPTY_TEMPLATE_JSON: &str = include_str!("../../templates/empty.json");

/// Load the sample template.
pub fn sample() -> Result<Template> {
    load(SAMPLE_TEMPLATE_JSON)
}

/// Load the empty starter template.
pub fn empty() -> Result<Template> {
    load(EMPTY_TEMPLATE_JSON)
}
