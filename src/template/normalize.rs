//! Defaulting pass that turns loosely-shaped JSON into a full `Template`.
//!
//! Normalization never fails. Missing display fields are derived from ids,
//! flags default to active unless explicitly `false`, and non-sequence
//! `components`/`attributes` become empty sequences.

use super::value::{AttrValue, OptionEntry, Weight, js_number};
use super::{Attribute, Component, GlobalSettings, MetaData, Section, Template};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Name used when an uploaded template carries no identity block.
pub const UPLOADED_TEMPLATE_NAME: &str = "Uploaded Template";
/// Id used when no id can be derived.
pub const UPLOADED_TEMPLATE_ID: &str = "tpl_uploaded";
/// Version used when none is given.
pub const DEFAULT_VERSION: &str = "1.0.0";

const TEMPLATE_ID_MAX_CHARS: usize = 30;

/// Display labels for well-known component ids: (id prefix, label, label_ko).
const KNOWN_COMPONENTS: &[(&str, &str, &str)] = &[
    ("comp_character", "Character", "캐릭터"),
    ("comp_subject", "Subject", "피사체"),
    ("comp_outfit", "Outfit", "복장"),
    ("comp_props", "Props", "소품"),
    ("comp_pose", "Pose", "포즈"),
    ("comp_expression", "Expression", "표정"),
    ("comp_background", "Background", "배경"),
    ("comp_environment", "Environment", "환경"),
    ("comp_lighting", "Lighting", "조명"),
    ("comp_camera", "Camera Settings", "카메라 설정"),
    ("comp_composition", "Composition", "구도"),
    ("comp_color", "Color", "색상"),
    ("comp_mood", "Mood", "분위기"),
    ("comp_render", "Render Style", "렌더링 스타일"),
    ("comp_style", "Style", "스타일"),
    ("comp_quality", "Quality", "품질"),
    ("comp_params", "Parameters", "파라미터"),
];

const TEMPLATE_KEYS: &[&str] = &["meta_data", "global_settings", "prompt_sections"];
const META_KEYS: &[&str] = &[
    "template_name",
    "template_id",
    "version",
    "author",
    "description",
    "category",
    "tags",
];
const SETTINGS_KEYS: &[&str] = &[
    "default_platform",
    "prompt_separator",
    "section_separator",
    "auto_capitalize",
    "remove_duplicates",
];
const SECTION_KEYS: &[&str] = &[
    "section_id",
    "section_label",
    "section_label_ko",
    "order",
    "is_active",
    "is_midjourney_params",
    "components",
];
const COMPONENT_KEYS: &[&str] = &[
    "component_id",
    "component_label",
    "component_label_ko",
    "is_active",
    "attributes",
];
const ATTRIBUTE_KEYS: &[&str] = &[
    "attr_id",
    "label",
    "label_ko",
    "type",
    "value",
    "value_ko",
    "options",
    "is_active",
    "prefix",
    "weight",
];

/// Build a complete `Template` from parsed JSON, filling every default.
///
/// A non-object input is treated as `{}`.
///
/// # Examples
///
/// ```
/// use promptweave::template::normalize;
/// use serde_json::json;
///
/// let template = normalize(&json!({}));
/// assert_eq!(template.meta_data.template_id, "tpl_uploaded");
/// assert!(template.prompt_sections.is_empty());
/// ```
pub fn normalize(raw: &Value) -> Template {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let prompt_sections = obj
        .get("prompt_sections")
        .and_then(Value::as_array)
        .map(|sections| {
            sections
                .iter()
                .filter_map(Value::as_object)
                .enumerate()
                .map(|(index, section)| normalize_section(section, index))
                .collect()
        })
        .unwrap_or_default();

    let template = Template {
        meta_data: normalize_meta(obj.get("meta_data").and_then(Value::as_object)),
        global_settings: obj
            .get("global_settings")
            .and_then(Value::as_object)
            .map(normalize_settings),
        prompt_sections,
        extra: extras(obj, TEMPLATE_KEYS),
    };

    log::debug!(
        "normalized template '{}' with {} section(s)",
        template.meta_data.template_id,
        template.prompt_sections.len()
    );

    template
}

fn normalize_meta(meta: Option<&Map<String, Value>>) -> MetaData {
    let Some(meta) = meta else {
        return MetaData {
            template_name: UPLOADED_TEMPLATE_NAME.to_string(),
            template_id: UPLOADED_TEMPLATE_ID.to_string(),
            version: DEFAULT_VERSION.to_string(),
            author: None,
            description: None,
            category: None,
            tags: None,
            extra: BTreeMap::new(),
        };
    };

    let name = text(meta, "template_name");
    let template_id = text(meta, "template_id").unwrap_or_else(|| match &name {
        Some(name) => derive_template_id(name),
        None => UPLOADED_TEMPLATE_ID.to_string(),
    });

    MetaData {
        template_name: name.unwrap_or_else(|| UPLOADED_TEMPLATE_NAME.to_string()),
        template_id,
        version: text(meta, "version").unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        author: text(meta, "author"),
        description: text(meta, "description"),
        category: text(meta, "category"),
        tags: meta
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).map(str::to_string).collect()),
        extra: extras(meta, META_KEYS),
    }
}

/// Derive a template id from its display name.
///
/// Lower-cases the name, collapses whitespace runs to `_`, keeps the first
/// 30 characters, and prefixes `tpl_`.
pub fn derive_template_id(name: &str) -> String {
    let lowered = name.to_lowercase();
    let underscored = WHITESPACE_RUN.replace_all(&lowered, "_");
    let truncated: String = underscored.chars().take(TEMPLATE_ID_MAX_CHARS).collect();
    format!("tpl_{}", truncated)
}

fn normalize_settings(settings: &Map<String, Value>) -> GlobalSettings {
    GlobalSettings {
        default_platform: raw_string(settings, "default_platform"),
        prompt_separator: raw_string(settings, "prompt_separator"),
        section_separator: raw_string(settings, "section_separator"),
        auto_capitalize: settings.get("auto_capitalize").map(is_truthy),
        remove_duplicates: settings.get("remove_duplicates").map(is_truthy),
        extra: extras(settings, SETTINGS_KEYS),
    }
}

fn normalize_section(section: &Map<String, Value>, index: usize) -> Section {
    let section_id = text(section, "section_id").unwrap_or_default();
    let section_label_ko = text(section, "section_label_ko");

    let section_label = text(section, "section_label")
        .or_else(|| section_label_ko.clone())
        .or_else(|| (!section_id.is_empty()).then(|| section_id.clone()))
        .unwrap_or_else(|| format!("Section {}", index + 1));

    let components = section
        .get("components")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(normalize_component)
                .collect()
        })
        .unwrap_or_default();

    Section {
        section_id,
        section_label,
        section_label_ko,
        order: section.get("order").and_then(Value::as_number).cloned(),
        is_active: active_flag(section),
        is_midjourney_params: section.get("is_midjourney_params").is_some_and(is_truthy),
        components,
        extra: extras(section, SECTION_KEYS),
    }
}

/// Resolve display labels for a component id.
///
/// Known id prefixes map to fixed labels; anything else strips a leading
/// `comp_` and turns underscores into spaces (used for both languages).
///
/// ```
/// use promptweave::template::component_labels;
///
/// assert_eq!(component_labels("comp_character"), ("Character".to_string(), "캐릭터".to_string()));
/// assert_eq!(component_labels("comp_hair_color").0, "hair color");
/// ```
pub fn component_labels(component_id: &str) -> (String, String) {
    if let Some((label, label_ko)) = known_component(component_id) {
        return (label.to_string(), label_ko.to_string());
    }

    let fallback = component_id
        .strip_prefix("comp_")
        .unwrap_or(component_id)
        .replace('_', " ");
    (fallback.clone(), fallback)
}

fn known_component(component_id: &str) -> Option<(&'static str, &'static str)> {
    KNOWN_COMPONENTS
        .iter()
        .find(|(prefix, _, _)| component_id.starts_with(prefix))
        .map(|(_, label, label_ko)| (*label, *label_ko))
}

fn normalize_component(component: &Map<String, Value>) -> Component {
    let component_id = text(component, "component_id").unwrap_or_default();
    let given_label = text(component, "component_label");
    let given_label_ko = text(component, "component_label_ko");
    let (derived_label, _) = component_labels(&component_id);

    let component_label = given_label
        .or_else(|| given_label_ko.clone())
        .unwrap_or(derived_label);
    let component_label_ko = given_label_ko
        .or_else(|| known_component(&component_id).map(|(_, ko)| ko.to_string()))
        .unwrap_or_else(|| component_label.clone());

    let attributes = component
        .get("attributes")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(normalize_attribute)
                .collect()
        })
        .unwrap_or_default();

    Component {
        component_id,
        component_label,
        component_label_ko,
        is_active: active_flag(component),
        attributes,
        extra: extras(component, COMPONENT_KEYS),
    }
}

fn normalize_attribute(attr: &Map<String, Value>) -> Attribute {
    let attr_id = text(attr, "attr_id").unwrap_or_default();
    let label_ko = text(attr, "label_ko");
    let label = text(attr, "label")
        .or_else(|| label_ko.clone())
        .or_else(|| (!attr_id.is_empty()).then(|| attr_id.clone()))
        .unwrap_or_else(|| "Unknown".to_string());

    let options = attr
        .get("options")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(OptionEntry::from_json).collect());

    let weight = attr.get("weight").and_then(Value::as_object).map(|w| Weight {
        enabled: w.get("enabled").is_some_and(is_truthy),
        value: w.get("value").filter(|v| !v.is_null()).cloned(),
    });

    Attribute {
        attr_id,
        label,
        label_ko,
        kind: text(attr, "type").unwrap_or_else(|| "textarea".to_string()),
        value: attr.get("value").and_then(AttrValue::from_json),
        value_ko: text(attr, "value_ko"),
        options,
        is_active: active_flag(attr),
        prefix: raw_string(attr, "prefix").unwrap_or_default(),
        weight,
        extra: extras(attr, ATTRIBUTE_KEYS),
    }
}

/// Non-empty text field. Numbers are accepted and stringified, so numeric
/// ids still resolve.
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(js_number(n)),
        _ => None,
    }
}

/// String field taken verbatim, including the empty string.
fn raw_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Only an explicit `false` deactivates.
fn active_flag(obj: &Map<String, Value>) -> bool {
    !matches!(obj.get("is_active"), Some(Value::Bool(false)))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn extras(obj: &Map<String, Value>, known: &[&str]) -> BTreeMap<String, Value> {
    obj.iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
