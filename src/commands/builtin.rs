//! Implementation of the `promptweave sample` and `promptweave new` commands.

use super::emit;
use crate::config::Config;
use crate::error::Result;
use crate::template::builtin;

/// Print the built-in sample template.
pub fn cmd_sample(config: &Config) -> Result<()> {
    let template = builtin::sample()?;
    emit(&template.to_json_string(config.pretty_json)?, None)
}

/// Print an empty starter template.
pub fn cmd_new(config: &Config) -> Result<()> {
    let template = builtin::empty()?;
    emit(&template.to_json_string(config.pretty_json)?, None)
}
