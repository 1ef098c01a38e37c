//! Configuration types and defaults for promptweave.

use serde::{Deserialize, Serialize};

/// Language used for labels and display values in `show` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// Korean labels (`*_ko` fields) when present (default).
    #[default]
    Ko,
    /// Primary (English) labels.
    En,
}

impl Locale {
    /// Parse a locale from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ko" => Some(Self::Ko),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn is_korean(self) -> bool {
        self == Self::Ko
    }
}

// Default value functions for serde
pub(super) fn default_platform() -> String {
    "midjourney".to_string()
}
pub(super) fn default_true() -> bool {
    true
}
