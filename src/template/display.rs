//! Human-facing rendering of attribute values.
//!
//! Display values feed previews and copy buttons only; they never change the
//! compiled prompt.

use super::Attribute;

/// Resolve the display string for an attribute.
///
/// A non-empty `value_ko` wins outright. Otherwise the value's string form
/// (lists joined with `", "`) is looked up in `options`; a match yields the
/// option's label, anything else yields the string form unchanged.
///
/// # Examples
///
/// ```
/// use promptweave::template::{Attribute, OptionEntry, display_value};
///
/// let mut attr = Attribute::new("aspect", "16:9");
/// attr.options = Some(vec![OptionEntry::Labeled {
///     value: "16:9".to_string(),
///     label: Some("Widescreen".to_string()),
///     label_ko: None,
/// }]);
/// assert_eq!(display_value(&attr), "Widescreen");
/// ```
pub fn display_value(attr: &Attribute) -> String {
    if let Some(value_ko) = attr.value_ko.as_deref().filter(|v| !v.is_empty()) {
        return value_ko.to_string();
    }

    let rendered = attr.value.as_ref().map(|v| v.render()).unwrap_or_default();

    let Some(options) = &attr.options else {
        return rendered;
    };

    options
        .iter()
        .find(|option| option.comparison_value() == rendered)
        .map(|option| option.display_label().to_string())
        .unwrap_or(rendered)
}

impl Attribute {
    /// See [`display_value`].
    pub fn display_value(&self) -> String {
        display_value(self)
    }
}
