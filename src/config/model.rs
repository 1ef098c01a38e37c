//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for the promptweave CLI.
///
/// This struct represents the contents of `.promptweave.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform passed to the compiler when neither `--platform` nor the
    /// template's `global_settings.default_platform` names one.
    #[serde(default = "default_platform")]
    pub default_platform: String,

    /// Label language for `show`.
    #[serde(default)]
    pub locale: Locale,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// NDJSON file that receives one event per template write (disabled
    /// when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_platform: default_platform(),
            locale: Locale::default(),
            pretty_json: default_true(),
            history_file: None,
        }
    }
}
