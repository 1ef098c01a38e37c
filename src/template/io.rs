//! Loading templates from text and files, and serializing them back.

use super::Template;
use super::normalize::normalize;
use crate::error::{PromptError, Result};
use regex::Regex;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

/// Opening fence line, with an optional `json` language tag.
static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```(?:json|JSON)?\s*\n?").expect("Invalid fence regex"));

/// Closing fence line.
static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)\n?```\s*$").expect("Invalid fence regex"));

/// Path argument meaning "read from standard input".
pub const STDIN_PATH: &str = "-";

/// Remove markdown code-fence lines around a pasted payload.
///
/// ```
/// use promptweave::template::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
/// assert_eq!(strip_code_fences("  {}  "), "{}");
/// ```
pub fn strip_code_fences(text: &str) -> String {
    let without_open = FENCE_OPEN.replace_all(text.trim(), "");
    FENCE_CLOSE
        .replace_all(&without_open, "")
        .trim()
        .to_string()
}

/// Parse template text into a normalized `Template`.
///
/// Fails with [`PromptError::Parse`] when the text is empty, is not valid
/// JSON, is not a JSON object, or carries a `prompt_sections` field that is
/// not an array. A missing (or `null`) `prompt_sections` loads as empty.
///
/// # Examples
///
/// ```
/// use promptweave::template::load;
///
/// let template = load("```json\n{\"prompt_sections\":[]}\n```").unwrap();
/// assert!(template.prompt_sections.is_empty());
///
/// assert!(load("not json").is_err());
/// ```
pub fn load(text: &str) -> Result<Template> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(PromptError::Parse("input is empty".to_string()));
    }

    let parsed: Value =
        serde_json::from_str(&cleaned).map_err(|e| PromptError::Parse(e.to_string()))?;

    let Some(obj) = parsed.as_object() else {
        return Err(PromptError::Parse(
            "template must be a JSON object".to_string(),
        ));
    };

    match obj.get("prompt_sections") {
        None | Some(Value::Null) | Some(Value::Array(_)) => {}
        Some(_) => {
            return Err(PromptError::Parse(
                "'prompt_sections' must be an array".to_string(),
            ));
        }
    }

    log::debug!("parsed template JSON ({} bytes)", cleaned.len());
    Ok(normalize(&parsed))
}

/// Read and load a template from a file, or from stdin when `path` is `-`.
pub fn read_template<P: AsRef<Path>>(path: P) -> Result<Template> {
    let path = path.as_ref();

    let content = if path == Path::new(STDIN_PATH) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| PromptError::UserError(format!("failed to read stdin: {}", e)))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| {
            PromptError::UserError(format!(
                "failed to read template file '{}': {}",
                path.display(),
                e
            ))
        })?
    };

    load(&content)
}

impl Template {
    /// Serialize to a JSON value.
    pub fn to_json_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| PromptError::UserError(format!("failed to serialize template: {}", e)))
    }

    /// Serialize to JSON text, pretty-printed or compact.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.map_err(|e| PromptError::UserError(format!("failed to serialize template: {}", e)))
    }

    /// Atomically write the template as JSON to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P, pretty: bool) -> Result<()> {
        let mut content = self.to_json_string(pretty)?;
        content.push('\n');
        crate::fs::atomic_write_file(path, &content)
    }
}
