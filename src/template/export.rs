//! Clean JSON export.
//!
//! The clean form drops localized display keys (`*_ko`) and `options`
//! lists, leaving only what a generation tool or another editor needs.

use super::Template;
use crate::error::Result;
use serde_json::{Map, Value};

/// Serialize `template` and strip display-only keys at every depth.
pub fn export_clean(template: &Template) -> Result<Value> {
    Ok(strip_display_keys(template.to_json_value()?))
}

/// Recursively drop object keys ending in `_ko` and keys named `options`.
pub fn strip_display_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(strip_display_keys).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !key.ends_with("_ko") && key != "options")
                .map(|(key, value)| (key, strip_display_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}
