//! CLI argument parsing for promptweave.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Promptweave: load, edit, and compile structured prompt templates.
///
/// Templates are JSON documents of sections, components, and attributes.
/// Compiling flattens them into a single prompt string for an image or
/// video generation tool. FILE may be `-` to read a pasted template from
/// standard input (markdown code fences are stripped).
#[derive(Parser, Debug)]
#[command(name = "promptweave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to $PROMPTWEAVE_CONFIG, then ./.promptweave.yaml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for promptweave.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a template into its prompt string.
    Compile(CompileArgs),

    /// Show a template's structure with display values.
    ///
    /// Lists sections, components, and attributes in source order with
    /// their active state, followed by the compiled prompt.
    Show(ShowArgs),

    /// Replace one attribute's value.
    ///
    /// Prints (or writes) the updated template and its compiled prompt.
    /// Unknown ids leave the template unchanged.
    Set(SetArgs),

    /// Print a template with every default filled in.
    Normalize(OutputArgs),

    /// Print a template without display-only fields (`*_ko`, `options`).
    Export(OutputArgs),

    /// Print the built-in sample template.
    Sample,

    /// Print an empty starter template.
    New,
}

/// Arguments for the `compile` command.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Template file, or `-` for stdin.
    pub file: PathBuf,

    /// Target platform (defaults to the template's, then the config's).
    #[arg(short, long)]
    pub platform: Option<String>,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Template file, or `-` for stdin.
    pub file: PathBuf,

    /// Label language (ko, en). Overrides the config.
    #[arg(long)]
    pub locale: Option<String>,

    /// Target platform for the compiled prompt.
    #[arg(short, long)]
    pub platform: Option<String>,
}

/// Arguments for the `set` command.
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Template file, or `-` for stdin.
    pub file: PathBuf,

    /// Section id containing the attribute.
    #[arg(long)]
    pub section: String,

    /// Component id containing the attribute.
    #[arg(long)]
    pub component: String,

    /// Attribute id to change.
    #[arg(long)]
    pub attr: String,

    /// New value. Taken as text unless `--json` is given.
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Parse VALUE as JSON (a string, number, or list of strings).
    #[arg(long)]
    pub json: bool,

    /// Write the updated template to this path.
    #[arg(short, long, conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Overwrite FILE with the updated template.
    #[arg(long)]
    pub in_place: bool,

    /// Target platform for the compiled prompt.
    #[arg(short, long)]
    pub platform: Option<String>,
}

/// Arguments for commands that emit a template (`normalize`, `export`).
#[derive(Parser, Debug)]
pub struct OutputArgs {
    /// Template file, or `-` for stdin.
    pub file: PathBuf,

    /// Write to this path instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
