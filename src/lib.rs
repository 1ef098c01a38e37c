//! Promptweave: structured prompt templates compiled into generation prompts.
//!
//! A template is a hierarchy of sections, components, and attributes. The
//! [`template`] module loads and normalizes raw JSON into that hierarchy,
//! and [`compiler::compile`] flattens it into a single delimited prompt.
//!
//! ```
//! use promptweave::compiler::compile;
//! use promptweave::template::load;
//!
//! let template = load(r#"{"prompt_sections": [{"components": [{"attributes": [
//!     {"attr_id": "subject", "value": "a lighthouse"},
//!     {"attr_id": "light", "value": "golden hour", "weight": {"enabled": true, "value": 1.5}}
//! ]}]}]}"#).unwrap();
//!
//! assert_eq!(compile(Some(&template), "midjourney"), "a lighthouse, golden hour::1.5");
//! ```

pub mod cli;
pub mod commands;
pub mod compiler;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod template;
