//! Error types for promptweave.
//!
//! Uses thiserror for derive macros. Loading is the only fallible step of the
//! core; compiling, normalizing, and display resolution never fail.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for promptweave operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// Template text could not be turned into a template.
    ///
    /// The message carries the raw underlying parser text (or a fixed
    /// description of the shape violation) so the caller can surface it.
    #[error("failed to parse template: {0}")]
    Parse(String),

    /// User provided invalid arguments, or a file/config could not be used.
    #[error("{0}")]
    UserError(String),
}

impl PromptError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PromptError::Parse(_) => exit_codes::PARSE_FAILURE,
            PromptError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for promptweave operations.
pub type Result<T> = std::result::Result<T, PromptError>;
