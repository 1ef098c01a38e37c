//! Exit code constants for the promptweave CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, I/O, configuration)
//! - 2: Template parse failure (malformed JSON or wrong document shape)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable files, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Parse failure: the template text could not be loaded.
pub const PARSE_FAILURE: i32 = 2;
