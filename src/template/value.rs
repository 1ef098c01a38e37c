//! Attribute payload types and their string renderings.
//!
//! Template JSON is loosely typed: an attribute `value` may be text, a number,
//! or a list of strings, and `options` entries may be bare strings or label
//! objects. These are modelled as tagged variants so that every rendering
//! rule is a single `match`.
//!
//! Numbers render the way a JavaScript host would print them (`2`, not
//! `2.0`), because compiled prompts are compared byte-for-byte against
//! prompts produced by existing tooling.

use serde::Serialize;
use serde_json::{Number, Value};

/// The payload of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Number(Number),
    List(Vec<String>),
}

impl AttrValue {
    /// Build a value from loosely-typed JSON.
    ///
    /// `null`, `false` and objects yield `None`. `true` becomes the text
    /// `"true"` and list elements are stringified individually.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) | Value::Object(_) => None,
            Value::String(s) => Some(AttrValue::Text(s.clone())),
            Value::Number(n) => Some(AttrValue::Number(n.clone())),
            Value::Bool(true) => Some(AttrValue::Text("true".to_string())),
            Value::Array(items) => Some(AttrValue::List(items.iter().map(js_string).collect())),
        }
    }

    /// Truthiness as the template format defines it: empty text and `0` are
    /// falsy, lists are always truthy (even when empty).
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Text(s) => !s.is_empty(),
            AttrValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            AttrValue::List(_) => true,
        }
    }

    /// True only for the numeric value zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, AttrValue::Number(n) if n.as_f64() == Some(0.0))
    }

    /// Body-section rendering: lists are joined with `", "`.
    pub fn render(&self) -> String {
        match self {
            AttrValue::Text(s) => s.clone(),
            AttrValue::Number(n) => js_number(n),
            AttrValue::List(items) => items.join(", "),
        }
    }

    /// Plain string conversion: lists are joined with a bare `","`.
    ///
    /// Parameter tokens use this form (`--stylize a,b`), body tokens use
    /// [`AttrValue::render`].
    pub fn to_plain_string(&self) -> String {
        match self {
            AttrValue::List(items) => items.join(","),
            other => other.render(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Number(Number::from(n))
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(items: Vec<String>) -> Self {
        AttrValue::List(items)
    }
}

/// Optional weighting suffix (`token::1.5`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weight {
    pub enabled: bool,

    /// Usually a number; other JSON is kept and stringified as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Weight {
    /// The `::<weight>` suffix, present only when enabled and not the
    /// number 1.
    ///
    /// A missing weight value counts as 1. The string `"1"` is not the
    /// number 1 and still produces a suffix.
    pub fn suffix(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let value = self.value.as_ref()?;
        if let Value::Number(n) = value
            && n.as_f64() == Some(1.0)
        {
            return None;
        }
        Some(format!("::{}", js_string(value)))
    }
}

/// One enumerated choice for an attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionEntry {
    Plain(String),
    Labeled {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        label_ko: Option<String>,
    },
}

impl OptionEntry {
    /// Parse a single options entry; anything but a string or object is dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(OptionEntry::Plain(s.clone())),
            Value::Object(map) => {
                let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
                Some(OptionEntry::Labeled {
                    value: map.get("value").map(js_string).unwrap_or_default(),
                    label: text("label"),
                    label_ko: text("label_ko"),
                })
            }
            _ => None,
        }
    }

    /// The string an attribute value is compared against.
    pub fn comparison_value(&self) -> &str {
        match self {
            OptionEntry::Plain(s) => s,
            OptionEntry::Labeled { value, .. } => value,
        }
    }

    /// Human-facing label: `label_ko`, else `label`, else the value itself.
    pub fn display_label(&self) -> &str {
        match self {
            OptionEntry::Plain(s) => s,
            OptionEntry::Labeled {
                value,
                label,
                label_ko,
            } => [label_ko, label]
                .into_iter()
                .flatten()
                .find(|l| !l.is_empty())
                .map(String::as_str)
                .unwrap_or(value),
        }
    }
}

/// Format a JSON number the way JavaScript's `String(n)` does.
///
/// Integers print as-is. Floats use the shortest round-trip digits, laid out
/// in plain decimal for exponents in `[-7, 21)` and in `1.5e-7` / `1e+21`
/// exponent form outside that range.
pub fn js_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => js_float(f),
        None => n.to_string(),
    }
}

fn js_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.25e-7"
    let scientific = format!("{:e}", f.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.to_string();
    };

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Decimal point position relative to the first digit
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let (lead, rest) = digits.split_at(1);
        let sign = if n - 1 < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}e{}{}", lead, sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", lead, rest, sign, (n - 1).abs())
        }
    };

    if f < 0.0 { format!("-{}", body) } else { body }
}

/// Stringify a JSON value the way JavaScript's `String(v)` does inside
/// `Array.prototype.join`.
pub(crate) fn js_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => js_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(js_string).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_variants() {
        assert_eq!(
            AttrValue::from_json(&json!("cat")),
            Some(AttrValue::Text("cat".to_string()))
        );
        assert_eq!(AttrValue::from_json(&json!(3)), Some(AttrValue::from(3)));
        assert_eq!(
            AttrValue::from_json(&json!(["a", 1, null])),
            Some(AttrValue::List(vec![
                "a".to_string(),
                "1".to_string(),
                String::new()
            ]))
        );
        assert_eq!(
            AttrValue::from_json(&json!(true)),
            Some(AttrValue::Text("true".to_string()))
        );
        assert_eq!(AttrValue::from_json(&json!(false)), None);
        assert_eq!(AttrValue::from_json(&json!(null)), None);
        assert_eq!(AttrValue::from_json(&json!({"k": "v"})), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(AttrValue::from("x").is_truthy());
        assert!(!AttrValue::from("").is_truthy());
        assert!(!AttrValue::from(0).is_truthy());
        assert!(AttrValue::from(0).is_zero());
        assert!(AttrValue::from(7).is_truthy());
        assert!(AttrValue::List(vec![]).is_truthy());
    }

    #[test]
    fn test_render_forms() {
        let list = AttrValue::List(vec!["red".to_string(), "blue".to_string()]);
        assert_eq!(list.render(), "red, blue");
        assert_eq!(list.to_plain_string(), "red,blue");
        assert_eq!(AttrValue::from(250).render(), "250");
    }

    #[test]
    fn test_js_number_formatting() {
        let parse = |s: &str| serde_json::from_str::<Number>(s).unwrap();
        assert_eq!(js_number(&parse("2")), "2");
        assert_eq!(js_number(&parse("2.0")), "2");
        assert_eq!(js_number(&parse("1.5")), "1.5");
        assert_eq!(js_number(&parse("-0.25")), "-0.25");
        assert_eq!(js_number(&parse("0.1")), "0.1");
        assert_eq!(js_number(&parse("250.5")), "250.5");
        assert_eq!(js_number(&parse("-0.0")), "0");
    }

    #[test]
    fn test_js_number_exponent_ranges() {
        let parse = |s: &str| serde_json::from_str::<Number>(s).unwrap();
        assert_eq!(js_number(&parse("0.000001")), "0.000001");
        assert_eq!(js_number(&parse("1e-7")), "1e-7");
        assert_eq!(js_number(&parse("1.5e-7")), "1.5e-7");
        assert_eq!(js_number(&parse("-2.5e-9")), "-2.5e-9");
        assert_eq!(js_number(&parse("1.5e20")), "150000000000000000000");
        assert_eq!(js_number(&parse("1e21")), "1e+21");
        assert_eq!(js_number(&parse("1.25e30")), "1.25e+30");
    }

    #[test]
    fn test_weight_suffix() {
        let weight = |enabled: bool, value: Option<f64>| Weight {
            enabled,
            value: value.and_then(Number::from_f64).map(Value::Number),
        };
        assert_eq!(weight(true, Some(1.5)).suffix().as_deref(), Some("::1.5"));
        assert_eq!(weight(true, Some(1.0)).suffix(), None);
        assert_eq!(weight(false, Some(2.0)).suffix(), None);
        assert_eq!(weight(true, Some(2.0)).suffix().as_deref(), Some("::2"));
        assert_eq!(weight(true, None).suffix(), None);

        let text_weight = |value: Value| Weight {
            enabled: true,
            value: Some(value),
        };
        assert_eq!(text_weight(json!("1.5")).suffix().as_deref(), Some("::1.5"));
        assert_eq!(text_weight(json!("1")).suffix().as_deref(), Some("::1"));
        assert_eq!(text_weight(json!(1)).suffix(), None);
    }

    #[test]
    fn test_option_entry_labels() {
        let plain = OptionEntry::from_json(&json!("wide")).unwrap();
        assert_eq!(plain.comparison_value(), "wide");
        assert_eq!(plain.display_label(), "wide");

        let labeled =
            OptionEntry::from_json(&json!({"value": "16:9", "label": "Wide", "label_ko": "와이드"}))
                .unwrap();
        assert_eq!(labeled.comparison_value(), "16:9");
        assert_eq!(labeled.display_label(), "와이드");

        let unlabeled = OptionEntry::from_json(&json!({"value": "1:1", "label_ko": ""})).unwrap();
        assert_eq!(unlabeled.display_label(), "1:1");

        assert!(OptionEntry::from_json(&json!(5)).is_none());
    }
}
