//! Implementation of the `promptweave compile` command.

use super::resolve_platform;
use crate::cli::CompileArgs;
use crate::config::Config;
use crate::error::Result;
use crate::template::read_template;

/// Execute the `promptweave compile` command.
///
/// Prints only the prompt so the output can be piped straight into a
/// clipboard tool.
pub fn cmd_compile(args: CompileArgs, config: &Config) -> Result<()> {
    let template = read_template(&args.file)?;
    let platform = resolve_platform(args.platform.as_deref(), &template, config);

    println!("{}", template.compile(&platform));
    Ok(())
}
