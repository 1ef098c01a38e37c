//! Copy-on-write edits.
//!
//! Readers always see a fully-formed template: an edit clones the document,
//! changes the clone, and hands it back for the caller to swap in.

use super::{AttrValue, Template};

/// Return a copy of `template` with one attribute's value replaced.
///
/// Ids resolve to the first match at each level. If any id fails to resolve
/// the returned template equals the input.
///
/// # Examples
///
/// ```
/// use promptweave::template::{AttrValue, load, set_attribute_value};
///
/// let template = load(r#"{"prompt_sections":[{"section_id":"s","components":[
///     {"component_id":"c","attributes":[{"attr_id":"a","value":"old"}]}]}]}"#).unwrap();
///
/// let edited = set_attribute_value(&template, "s", "c", "a", AttrValue::from("new"));
/// assert_eq!(edited.find_attribute("s", "c", "a").unwrap().value, Some(AttrValue::from("new")));
///
/// let unchanged = set_attribute_value(&template, "s", "c", "missing", AttrValue::from("x"));
/// assert_eq!(unchanged, template);
/// ```
pub fn set_attribute_value(
    template: &Template,
    section_id: &str,
    component_id: &str,
    attr_id: &str,
    new_value: AttrValue,
) -> Template {
    let mut updated = template.clone();

    let target = updated
        .prompt_sections
        .iter_mut()
        .find(|s| s.section_id == section_id)
        .and_then(|s| {
            s.components
                .iter_mut()
                .find(|c| c.component_id == component_id)
        })
        .and_then(|c| c.attributes.iter_mut().find(|a| a.attr_id == attr_id));

    match target {
        Some(attr) => {
            log::debug!(
                "set value of {}/{}/{}",
                section_id,
                component_id,
                attr_id
            );
            attr.value = Some(new_value);
        }
        None => {
            log::warn!(
                "attribute {}/{}/{} not found; template left unchanged",
                section_id,
                component_id,
                attr_id
            );
        }
    }

    updated
}

impl Template {
    /// See [`set_attribute_value`].
    pub fn with_attribute_value(
        &self,
        section_id: &str,
        component_id: &str,
        attr_id: &str,
        new_value: AttrValue,
    ) -> Template {
        set_attribute_value(self, section_id, component_id, attr_id, new_value)
    }
}
