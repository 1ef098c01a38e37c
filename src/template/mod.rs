//! Template model for promptweave.
//!
//! A template is a hierarchical document (sections → components → attributes)
//! that the compiler flattens into a single prompt string. This module holds
//! the typed, normalized form of that document:
//!
//! - Loose JSON conventions (`is_active` missing means active, `value` may be
//!   text, a number, or a list) are resolved once, at normalization time
//! - Unknown fields at every level are preserved in `extra` maps so a
//!   load → serialize round trip does not drop richer schema versions
//! - Templates are never mutated in place; edits produce a new `Template`
//!
//! # Template Format
//!
//! ```text
//! {
//!   "meta_data": { "template_name": "Hiker", "template_id": "tpl_hiker", "version": "1.0.0" },
//!   "global_settings": { "prompt_separator": ", ", "remove_duplicates": true },
//!   "prompt_sections": [
//!     { "section_id": "sec_subject", "components": [
//!       { "component_id": "comp_character", "attributes": [
//!         { "attr_id": "char_desc", "value": "cute skeleton" }
//!       ] }
//!     ] }
//!   ]
//! }
//! ```

use serde::Serialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

pub mod builtin;
mod display;
pub mod export;
mod io;
mod mutations;
mod normalize;
mod value;

pub use display::display_value;
pub use export::export_clean;
pub use io::{STDIN_PATH, load, read_template, strip_code_fences};
pub use mutations::set_attribute_value;
pub use normalize::{component_labels, derive_template_id, normalize};
pub use value::{AttrValue, OptionEntry, Weight, js_number};

/// Separator used when `global_settings` does not provide one.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// The root template document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    /// Identity and version information. No effect on compilation.
    pub meta_data: MetaData,

    /// Formatting rules for the compiler.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_settings: Option<GlobalSettings>,

    /// Ordered sections (source order; `order` is the sort key).
    pub prompt_sections: Vec<Section>,

    /// Inert top-level fields (`variables`, `presets`, `platform_configs`,
    /// `color_palette`, and anything unknown).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Template identity block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaData {
    pub template_name: String,
    pub template_id: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Global formatting rules.
///
/// Fields stay optional so that an uploaded template serializes back without
/// gaining keys it never had; use the accessor methods to read effective
/// values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_platform: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_separator: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_separator: Option<String>,

    /// Reserved; the compiler does not read it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_capitalize: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_duplicates: Option<bool>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GlobalSettings {
    /// Separator between tokens of one section. Empty falls back to `", "`.
    pub fn prompt_separator(&self) -> &str {
        non_empty_or_default(self.prompt_separator.as_deref())
    }

    /// Separator between sections. Empty falls back to `", "`.
    pub fn section_separator(&self) -> &str {
        non_empty_or_default(self.section_separator.as_deref())
    }

    /// Whether the comma-token dedupe pass runs. Omitted means no.
    pub fn removes_duplicates(&self) -> bool {
        self.remove_duplicates.unwrap_or(false)
    }

    /// The template's preferred platform, if it names one.
    pub fn default_platform(&self) -> Option<&str> {
        self.default_platform.as_deref().filter(|p| !p.is_empty())
    }
}

fn non_empty_or_default(sep: Option<&str>) -> &str {
    match sep {
        Some(s) if !s.is_empty() => s,
        _ => DEFAULT_SEPARATOR,
    }
}

/// Top-level grouping; either body content or trailing parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub section_id: String,
    pub section_label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_label_ko: Option<String>,

    /// Sort key. Kept as the raw JSON number so integers serialize unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Number>,

    pub is_active: bool,

    /// Routes this section's tokens to the trailing parameter region.
    #[serde(skip_serializing_if = "is_false")]
    pub is_midjourney_params: bool,

    pub components: Vec<Component>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Section {
    /// Effective sort key; missing order sorts as 0.
    ///
    /// `-0` is folded into `0` so the two compare equal.
    pub fn sort_key(&self) -> f64 {
        self.order.as_ref().and_then(Number::as_f64).unwrap_or(0.0) + 0.0
    }

    /// Display label for the given locale, falling back to the primary label.
    pub fn label_for(&self, korean: bool) -> &str {
        match &self.section_label_ko {
            Some(ko) if korean && !ko.is_empty() => ko,
            _ => &self.section_label,
        }
    }
}

/// Mid-level grouping of related attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub component_id: String,
    pub component_label: String,
    pub component_label_ko: String,
    pub is_active: bool,
    pub attributes: Vec<Attribute>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Component {
    pub fn label_for(&self, korean: bool) -> &str {
        if korean && !self.component_label_ko.is_empty() {
            &self.component_label_ko
        } else {
            &self.component_label
        }
    }
}

/// Leaf value contributing text, a number, or a list to the prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub attr_id: String,
    pub label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ko: Option<String>,

    /// Free-form input hint (`textarea`, `text`, `select`, ...).
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AttrValue>,

    /// Display-only override of `value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_ko: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionEntry>>,

    pub is_active: bool,

    /// Prepended only inside parameter sections.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Attribute {
    /// Create an active attribute with the given id and value and all other
    /// fields at their normalized defaults.
    pub fn new(attr_id: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        let attr_id = attr_id.into();
        Self {
            label: attr_id.clone(),
            attr_id,
            label_ko: None,
            kind: "textarea".to_string(),
            value: Some(value.into()),
            value_ko: None,
            options: None,
            is_active: true,
            prefix: String::new(),
            weight: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn label_for(&self, korean: bool) -> &str {
        match &self.label_ko {
            Some(ko) if korean && !ko.is_empty() => ko,
            _ => &self.label,
        }
    }
}

impl Template {
    /// Effective global settings (defaults when the block is absent).
    pub fn settings(&self) -> GlobalSettings {
        self.global_settings.clone().unwrap_or_default()
    }

    /// Look up an attribute by its containment path (first match per level).
    pub fn find_attribute(
        &self,
        section_id: &str,
        component_id: &str,
        attr_id: &str,
    ) -> Option<&Attribute> {
        self.prompt_sections
            .iter()
            .find(|s| s.section_id == section_id)?
            .components
            .iter()
            .find(|c| c.component_id == component_id)?
            .attributes
            .iter()
            .find(|a| a.attr_id == attr_id)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}
