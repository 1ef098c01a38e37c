//! Tests for the prompt compiler.

use super::*;
use crate::template::{load, normalize};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Build a template from a list of sections given as JSON.
fn template_with(settings: Value, sections: Value) -> Template {
    normalize(&json!({
        "global_settings": settings,
        "prompt_sections": sections,
    }))
}

fn body_section(id: &str, attributes: Value) -> Value {
    json!({
        "section_id": id,
        "components": [{ "component_id": format!("comp_{}", id), "attributes": attributes }]
    })
}

fn params_section(id: &str, attributes: Value) -> Value {
    json!({
        "section_id": id,
        "is_midjourney_params": true,
        "components": [{ "component_id": "comp_params", "attributes": attributes }]
    })
}

fn sky_and_grass() -> Value {
    body_section(
        "scene",
        json!([
            { "attr_id": "sky", "value": "blue sky" },
            { "attr_id": "grass", "value": "green grass" }
        ]),
    )
}

#[test]
fn test_absent_template_compiles_to_empty() {
    assert_eq!(compile(None, "midjourney"), "");
}

#[test]
fn test_missing_sections_compile_to_empty() {
    let template = normalize(&json!({}));
    assert_eq!(compile(Some(&template), "midjourney"), "");

    let template = normalize(&json!({"prompt_sections": "oops"}));
    assert_eq!(compile(Some(&template), "midjourney"), "");
}

#[test]
fn test_basic_body_compilation() {
    let template = template_with(json!(null), json!([sky_and_grass()]));
    assert_eq!(template.compile("midjourney"), "blue sky, green grass");
}

#[test]
fn test_params_section_appended_after_space() {
    let template = template_with(
        json!(null),
        json!([
            sky_and_grass(),
            params_section("params", json!([{ "attr_id": "ar", "value": "16:9", "prefix": "--ar " }]))
        ]),
    );
    assert_eq!(template.compile("midjourney"), "blue sky, green grass --ar 16:9");
}

#[test]
fn test_params_section_first_in_order_still_trails() {
    let mut params = params_section(
        "params",
        json!([
            { "attr_id": "ar", "value": "16:9", "prefix": "--ar " },
            { "attr_id": "raw", "value": "--style raw" }
        ]),
    );
    params["order"] = json!(-5);
    let template = template_with(json!(null), json!([params, sky_and_grass()]));
    assert_eq!(
        template.compile("midjourney"),
        "blue sky, green grass --ar 16:9 --style raw"
    );
}

#[test]
fn test_params_only_template_has_leading_space() {
    let template = template_with(
        json!(null),
        json!([params_section("params", json!([{ "attr_id": "v", "value": "6", "prefix": "--v " }]))]),
    );
    assert_eq!(template.compile("midjourney"), " --v 6");
}

#[test]
fn test_inactive_section_contributes_nothing() {
    let mut params = params_section("params", json!([{ "attr_id": "ar", "value": "1:1", "prefix": "--ar " }]));
    params["is_active"] = json!(false);
    let mut hidden = body_section("hidden", json!([{ "attr_id": "x", "value": "secret" }]));
    hidden["is_active"] = json!(false);

    let template = template_with(json!(null), json!([sky_and_grass(), hidden, params]));
    assert_eq!(template.compile("midjourney"), "blue sky, green grass");
}

#[test]
fn test_only_explicit_false_deactivates() {
    let section = json!({
        "section_id": "s",
        "is_active": 0,
        "components": [{
            "component_id": "c",
            "is_active": null,
            "attributes": [
                { "attr_id": "a", "value": "kept", "is_active": "no" },
                { "attr_id": "b", "value": "dropped", "is_active": false }
            ]
        }]
    });
    let template = template_with(json!(null), json!([section]));
    assert_eq!(template.compile("midjourney"), "kept");
}

#[test]
fn test_inactive_component_is_skipped() {
    let section = json!({
        "section_id": "s",
        "components": [
            { "component_id": "off", "is_active": false, "attributes": [{ "attr_id": "a", "value": "hidden" }] },
            { "component_id": "on", "attributes": [{ "attr_id": "b", "value": "shown" }] }
        ]
    });
    let template = template_with(json!(null), json!([section]));
    assert_eq!(template.compile("midjourney"), "shown");
}

#[test]
fn test_body_value_filtering() {
    let template = template_with(
        json!(null),
        json!([body_section(
            "s",
            json!([
                { "attr_id": "zero", "value": 0 },
                { "attr_id": "empty", "value": "" },
                { "attr_id": "null", "value": null },
                { "attr_id": "missing" },
                { "attr_id": "off", "value": "off", "is_active": false },
                { "attr_id": "text", "value": "cat" }
            ])
        )]),
    );
    assert_eq!(template.compile("midjourney"), "0, cat");
}

#[test]
fn test_params_drop_zero_values() {
    let template = template_with(
        json!(null),
        json!([params_section(
            "p",
            json!([
                { "attr_id": "chaos", "value": 0, "prefix": "--chaos " },
                { "attr_id": "stylize", "value": 250, "prefix": "--stylize " }
            ])
        )]),
    );
    assert_eq!(template.compile("midjourney"), " --stylize 250");
}

#[test]
fn test_params_ignore_weight_and_join_lists_bare() {
    let template = template_with(
        json!(null),
        json!([params_section(
            "p",
            json!([{
                "attr_id": "no",
                "value": ["text", "watermark"],
                "prefix": "--no ",
                "weight": { "enabled": true, "value": 2 }
            }])
        )]),
    );
    assert_eq!(template.compile("midjourney"), " --no text,watermark");
}

#[test]
fn test_prefix_ignored_in_body_sections() {
    let template = template_with(
        json!(null),
        json!([body_section("s", json!([{ "attr_id": "a", "value": "cat", "prefix": "--x " }]))]),
    );
    assert_eq!(template.compile("midjourney"), "cat");
}

#[test]
fn test_weight_suffix() {
    let template = template_with(
        json!(null),
        json!([body_section(
            "s",
            json!([
                { "attr_id": "a", "value": "cat", "weight": { "enabled": true, "value": 1.5 } },
                { "attr_id": "b", "value": "dog", "weight": { "enabled": true, "value": 1 } },
                { "attr_id": "c", "value": "owl", "weight": { "enabled": false, "value": 3 } },
                { "attr_id": "d", "value": "fox", "weight": { "enabled": true, "value": 2.0 } }
            ])
        )]),
    );
    assert_eq!(template.compile("midjourney"), "cat::1.5, dog, owl, fox::2");
}

#[test]
fn test_list_values_join_with_comma_space() {
    let template = template_with(
        json!(null),
        json!([body_section("s", json!([{ "attr_id": "a", "value": ["red", "blue"] }]))]),
    );
    assert_eq!(template.compile("midjourney"), "red, blue");
}

#[test]
fn test_custom_separators() {
    let template = template_with(
        json!({ "prompt_separator": " | ", "section_separator": " // " }),
        json!([
            sky_and_grass(),
            body_section("style", json!([{ "attr_id": "s", "value": "watercolor" }]))
        ]),
    );
    assert_eq!(
        template.compile("midjourney"),
        "blue sky | green grass // watercolor"
    );
}

#[test]
fn test_empty_separators_fall_back_to_default() {
    let template = template_with(
        json!({ "prompt_separator": "", "section_separator": "" }),
        json!([sky_and_grass()]),
    );
    assert_eq!(template.compile("midjourney"), "blue sky, green grass");
}

#[test]
fn test_empty_section_adds_no_placeholder() {
    let template = template_with(
        json!({ "section_separator": " / " }),
        json!([
            body_section("a", json!([{ "attr_id": "x", "value": "one" }])),
            body_section("empty", json!([{ "attr_id": "y", "value": "" }])),
            body_section("b", json!([{ "attr_id": "z", "value": "two" }]))
        ]),
    );
    assert_eq!(template.compile("midjourney"), "one / two");
}

#[test]
fn test_sections_sorted_by_order_stably() {
    let mut late = body_section("late", json!([{ "attr_id": "a", "value": "late" }]));
    late["order"] = json!(2);
    let mut first = body_section("first", json!([{ "attr_id": "b", "value": "first" }]));
    first["order"] = json!(1);
    let tie_a = body_section("tie_a", json!([{ "attr_id": "c", "value": "tie a" }]));
    let mut tie_b = body_section("tie_b", json!([{ "attr_id": "d", "value": "tie b" }]));
    tie_b["order"] = json!("not a number");

    let template = template_with(json!(null), json!([late, tie_a, first, tie_b]));
    assert_eq!(
        template.compile("midjourney"),
        "tie a, tie b, first, late"
    );
}

#[test]
fn test_negative_zero_order_ties_with_zero() {
    let mut first = body_section("first", json!([{ "attr_id": "a", "value": "first" }]));
    first["order"] = json!(0);
    let mut second = body_section("second", json!([{ "attr_id": "b", "value": "second" }]));
    second["order"] = json!(-0.0);

    let template = template_with(json!(null), json!([first, second]));
    assert_eq!(template.compile("midjourney"), "first, second");
}

#[test]
fn test_false_values_skipped_in_body_and_params() {
    let template = template_with(
        json!(null),
        json!([
            body_section(
                "body",
                json!([
                    { "attr_id": "a", "value": "cat" },
                    { "attr_id": "b", "value": false }
                ])
            ),
            {
                "section_id": "params",
                "is_midjourney_params": true,
                "components": [{
                    "component_id": "comp_params",
                    "attributes": [{ "attr_id": "tile", "value": false, "prefix": "--tile " }]
                }]
            }
        ]),
    );
    assert_eq!(template.compile("midjourney"), "cat");
}

#[test]
fn test_string_weight_value_adds_suffix() {
    let template = template_with(
        json!(null),
        json!([body_section(
            "body",
            json!([
                { "attr_id": "a", "value": "cat", "weight": { "enabled": true, "value": "1.5" } },
                { "attr_id": "b", "value": "dog", "weight": { "enabled": true, "value": 1 } }
            ])
        )]),
    );
    assert_eq!(template.compile("midjourney"), "cat::1.5, dog");
}

#[test]
fn test_remove_duplicates_dedupes_rendered_values() {
    let template = template_with(
        json!({ "remove_duplicates": true }),
        json!([
            body_section("a", json!([{ "attr_id": "x", "value": "red apple" }])),
            body_section("b", json!([{ "attr_id": "y", "value": "red apple" }]))
        ]),
    );
    assert_eq!(template.compile("midjourney"), "red apple");
}

#[test]
fn test_remove_duplicates_splits_inside_values() {
    let template = template_with(
        json!({ "remove_duplicates": true, "prompt_separator": " " }),
        json!([body_section(
            "a",
            json!([
                { "attr_id": "x", "value": "cat,  soft light" },
                { "attr_id": "y", "value": "soft light,cat" }
            ])
        )]),
    );
    // "cat,  soft light soft light,cat" splits into three comma pieces
    assert_eq!(template.compile("midjourney"), "cat, soft light soft light");
}

#[test]
fn test_duplicates_kept_without_flag() {
    let template = template_with(
        json!(null),
        json!([
            body_section("a", json!([{ "attr_id": "x", "value": "red apple" }])),
            body_section("b", json!([{ "attr_id": "y", "value": "red apple" }]))
        ]),
    );
    assert_eq!(template.compile("midjourney"), "red apple, red apple");
}

#[test]
fn test_dedupe_does_not_touch_params() {
    let template = template_with(
        json!({ "remove_duplicates": true }),
        json!([
            body_section("a", json!([{ "attr_id": "x", "value": "moody, moody" }])),
            params_section(
                "p",
                json!([
                    { "attr_id": "q", "value": "2", "prefix": "--q " },
                    { "attr_id": "r", "value": "2", "prefix": "--q " }
                ])
            )
        ]),
    );
    assert_eq!(template.compile("midjourney"), "moody --q 2 --q 2");
}

#[test]
fn test_platform_does_not_change_output() {
    let template = template_with(json!(null), json!([sky_and_grass()]));
    assert_eq!(template.compile("midjourney"), template.compile("dalle"));
    assert_eq!(template.compile(""), "blue sky, green grass");
}

#[test]
fn test_empty_list_value_renders_empty_token() {
    let template = template_with(
        json!(null),
        json!([body_section(
            "s",
            json!([{ "attr_id": "a", "value": [] }, { "attr_id": "b", "value": "cat" }])
        )]),
    );
    assert_eq!(template.compile("midjourney"), ", cat");
}

#[test]
fn test_sample_template_compiles() {
    let template = crate::template::builtin::sample().unwrap();
    let prompt = template.compile("midjourney");
    assert!(prompt.starts_with("cute anthropomorphic skeleton character"));
    assert!(prompt.contains("wooden walking stick, sunny mountain trail"));
    assert!(prompt.ends_with("cute aesthetic"));
}

#[test]
fn test_dedupe_comma_tokens() {
    assert_eq!(dedupe_comma_tokens("a, b,a ,, c"), "a, b, c");
    assert_eq!(dedupe_comma_tokens(""), "");
    assert_eq!(dedupe_comma_tokens(" , "), "");
}

#[test]
fn test_compile_after_load_round_trip() {
    let template = template_with(
        json!({ "remove_duplicates": true }),
        json!([sky_and_grass()]),
    );
    let text = template.to_json_string(true).unwrap();
    let reloaded = load(&text).unwrap();
    assert_eq!(reloaded.compile("midjourney"), template.compile("midjourney"));
}

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["red", "blue", "cat", "soft light", "", "red, cat", "0"])
        .prop_map(str::to_string)
}

fn arbitrary_template() -> impl Strategy<Value = Template> {
    (
        prop::collection::vec((prop::collection::vec(word(), 0..4), -2i64..3, any::<bool>()), 0..5),
        any::<bool>(),
    )
        .prop_map(|(sections, dedupe)| {
            let sections: Vec<Value> = sections
                .into_iter()
                .enumerate()
                .map(|(i, (values, order, params))| {
                    let attributes: Vec<Value> = values
                        .into_iter()
                        .enumerate()
                        .map(|(j, v)| json!({ "attr_id": format!("a{}", j), "value": v, "prefix": "--" }))
                        .collect();
                    json!({
                        "section_id": format!("s{}", i),
                        "order": order,
                        "is_midjourney_params": params,
                        "components": [{ "component_id": "c", "attributes": attributes }]
                    })
                })
                .collect();
            normalize(&json!({
                "global_settings": { "remove_duplicates": dedupe },
                "prompt_sections": sections
            }))
        })
}

proptest! {
    #[test]
    fn prop_compile_is_deterministic(template in arbitrary_template()) {
        let first = compile(Some(&template), "midjourney");
        let second = compile(Some(&template.clone()), "midjourney");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_dedupe_leaves_no_repeated_pieces(template in arbitrary_template()) {
        let mut template = template;
        if let Some(settings) = template.global_settings.as_mut() {
            settings.remove_duplicates = Some(true);
        }
        for section in template.prompt_sections.iter_mut() {
            section.is_midjourney_params = false;
        }
        let prompt = template.compile("midjourney");
        let pieces: Vec<&str> = prompt.split(", ").filter(|p| !p.is_empty()).collect();
        let unique: HashSet<&str> = pieces.iter().copied().collect();
        prop_assert_eq!(pieces.len(), unique.len());
    }

    #[test]
    fn prop_inactive_sections_never_appear(template in arbitrary_template()) {
        let mut template = template;
        for section in template.prompt_sections.iter_mut() {
            section.is_active = false;
        }
        prop_assert_eq!(template.compile("midjourney"), "");
    }
}
