/// Flattening to dotted-path maps and rebuilding trees from them.
use arbor_core::{ArborError, Document};
use serde_json::{json, Map, Value};

fn flat_string(input: &str, include_empty: bool) -> String {
    let doc = Document::parse_str(input).unwrap();
    Value::Object(doc.flatten(include_empty).unwrap()).to_string()
}

// ============================================================================
// 1. Flatten
// ============================================================================

#[test]
fn flatten_table() {
    let cases = [
        (r#"{"foo":{"bar":"baz"}}"#, r#"{"foo.bar":"baz"}"#),
        (r#"{"foo":[{"bar":"1"},{"bar":"2"}]}"#, r#"{"foo.0.bar":"1","foo.1.bar":"2"}"#),
        (r#"[{"bar":"1"},{"bar":"2"}]"#, r#"{"0.bar":"1","1.bar":"2"}"#),
        (r#"[["1"],["2","3"]]"#, r#"{"0.0":"1","1.0":"2","1.1":"3"}"#),
        (r#"{"foo":{"bar":null}}"#, r#"{"foo.bar":null}"#),
        (r#"{"foo":{"bar":{}}}"#, "{}"),
        (r#"{"foo":{"bar":[]}}"#, "{}"),
    ];
    for (input, expected) in cases {
        assert_eq!(flat_string(input, false), expected, "input {input}");
    }
}

#[test]
fn flatten_include_empty_table() {
    let cases = [
        (r#"{"foo":{"bar":"baz"}}"#, r#"{"foo.bar":"baz"}"#),
        (r#"[["1"],["2","3"]]"#, r#"{"0.0":"1","1.0":"2","1.1":"3"}"#),
        (r#"{"foo":{"bar":null}}"#, r#"{"foo.bar":null}"#),
        (r#"{"foo":{"bar":{}}}"#, r#"{"foo.bar":{}}"#),
        (r#"{"foo":{"bar":[]}}"#, r#"{"foo.bar":[]}"#),
        (r#"{"a":[[],{}],"b":1}"#, r#"{"a.0":[],"a.1":{},"b":1}"#),
    ];
    for (input, expected) in cases {
        assert_eq!(flat_string(input, true), expected, "input {input}");
    }
}

#[test]
fn flatten_empty_root_is_empty_map() {
    assert_eq!(flat_string("{}", false), "{}");
    assert_eq!(flat_string("[]", true), "{}");
}

#[test]
fn flatten_scalar_root_fails() {
    for input in ["1", "\"s\"", "null", "true"] {
        let doc = Document::parse_str(input).unwrap();
        assert!(
            matches!(doc.flatten(false), Err(ArborError::NotAContainer { .. })),
            "input {input}"
        );
    }
    assert!(Document::uninitialized().flatten(false).is_err());
}

#[test]
fn flatten_joins_dotted_keys_raw() {
    let flat = arbor_core::flatten(&json!({"a.b": {"c": 1}, "a": {"b.c": 2}}), false).unwrap();
    assert_eq!(flat.len(), 1, "colliding keys collapse into one entry");
    assert_eq!(flat.get("a.b.c"), Some(&json!(2)));
}

#[test]
fn flatten_preserves_document_order() {
    let flat = arbor_core::flatten(&json!({"z": 1, "a": {"y": 2, "b": 3}}), false).unwrap();
    let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a.y", "a.b"]);
}

// ============================================================================
// 2. Unflatten
// ============================================================================

#[test]
fn unflatten_rebuilds_objects() {
    let flat = arbor_core::flatten(&json!({"a": {"b": 1, "c": {"d": "x"}}, "e": null}), false).unwrap();
    assert_eq!(
        arbor_core::unflatten(&flat).unwrap(),
        json!({"a": {"b": 1, "c": {"d": "x"}}, "e": null})
    );
}

#[test]
fn unflatten_turns_indices_into_keys() {
    let flat = arbor_core::flatten(&json!({"list": ["x", "y"]}), false).unwrap();
    assert_eq!(
        arbor_core::unflatten(&flat).unwrap(),
        json!({"list": {"0": "x", "1": "y"}})
    );
}

#[test]
fn unflatten_conflicting_keys_fail() {
    let mut flat = Map::new();
    flat.insert("a".to_string(), json!(1));
    flat.insert("a.b".to_string(), json!(2));
    assert!(matches!(
        arbor_core::unflatten(&flat),
        Err(ArborError::PathCollision { position: 1, .. })
    ));
}
