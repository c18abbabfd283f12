/// Decoding input and encoding output with indentation and HTML escaping.
use arbor_core::{ArborError, Document, EncodeOptions};
use serde_json::json;

const SAMPLE: &str = "{
\t\"test\": {
\t\t\"innerTest\": {
\t\t\t\"value\": 10,
\t\t\t\"value2\": \"<title>Title</title>\",
\t\t\t\"value3\": {
\t\t\t\t\"moreValue\": 45
\t\t\t}
\t\t}
\t},
\t\"test2\": 20
}";

const SAMPLE_ESCAPED: &str = "{
\t\"test\": {
\t\t\"innerTest\": {
\t\t\t\"value\": 10,
\t\t\t\"value2\": \"\\u003ctitle\\u003eTitle\\u003c/title\\u003e\",
\t\t\t\"value3\": {
\t\t\t\t\"moreValue\": 45
\t\t\t}
\t\t}
\t},
\t\"test2\": 20
}";

// ============================================================================
// 1. Decode
// ============================================================================

#[test]
fn decode_rejects_malformed_input() {
    for input in ["{dfads\"", "", "{}\n{}", "[1,", "{\"a\":}"] {
        let err = Document::parse_str(input).unwrap_err();
        assert!(matches!(err, ArborError::Decode(_)), "input {input:?}");
        assert!(err.to_string().starts_with("JSON decode error"));
    }
}

#[test]
fn decode_accepts_surrounding_whitespace() {
    let doc = Document::parse(b"  {\"a\": 1}\n").unwrap();
    assert_eq!(doc.get(&["a"]), Some(&json!(1)));
}

#[test]
fn decode_from_reader() {
    let doc = Document::from_reader(&b"[1, 2, 3]"[..]).unwrap();
    assert_eq!(doc.children().unwrap().len(), 3);
}

#[test]
fn decode_preserves_key_order() {
    let doc = Document::parse_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
    assert_eq!(doc.to_string(), r#"{"z":1,"a":2,"m":3}"#);
}

#[test]
fn decode_keeps_large_integers_exact() {
    let doc = Document::parse_str(r#"{"big":9007199254740993}"#).unwrap();
    assert_eq!(doc.get(&["big"]).and_then(|v| v.as_u64()), Some(9007199254740993));
    assert_eq!(doc.to_string(), r#"{"big":9007199254740993}"#);
}

// ============================================================================
// 2. Encode
// ============================================================================

#[test]
fn encode_default_is_compact() {
    let doc = Document::parse_str(SAMPLE).unwrap();
    let out = String::from_utf8(doc.encode(&EncodeOptions::new()).unwrap()).unwrap();
    assert_eq!(
        out,
        r#"{"test":{"innerTest":{"value":10,"value2":"<title>Title</title>","value3":{"moreValue":45}}},"test2":20}"#
    );
}

#[test]
fn encode_tab_indent_round_trips_sample() {
    let doc = Document::parse_str(SAMPLE).unwrap();
    let out = doc.encode(&EncodeOptions::new().indent("", "\t")).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), SAMPLE);
}

#[test]
fn encode_html_escape_with_indent() {
    let doc = Document::parse_str(SAMPLE).unwrap();
    let opts = EncodeOptions::new().html_escape(true).indent("", "\t");
    let out = doc.encode(&opts).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), SAMPLE_ESCAPED);
}

#[test]
fn html_escape_covers_ampersand_and_line_separators() {
    let value = json!({"s": "a&b\u{2028}c\u{2029}"});
    let out = arbor_core::encode_string(&value, &EncodeOptions::new().html_escape(true)).unwrap();
    assert_eq!(out, r#"{"s":"a\u0026b\u2028c\u2029"}"#);
}

#[test]
fn html_escape_leaves_indent_strings_alone() {
    let value = json!({"<k>": "a&b"});
    let opts = EncodeOptions::new().indent("<!-- ", "&").html_escape(true);
    let out = arbor_core::encode_string(&value, &opts).unwrap();
    assert_eq!(out, "{\n<!-- &\"\\u003ck\\u003e\": \"a\\u0026b\"\n<!-- }");
}

#[test]
fn indent_prefix_starts_every_following_line() {
    let mut doc = Document::new();
    doc.array(&["array"]).unwrap();
    for n in [10, 20, 30] {
        doc.array_append(&["array"], n).unwrap();
    }
    let expected = "{
      \"array\": [
        10,
        20,
        30
      ]
    }";
    assert_eq!(doc.to_string_indent("    ", "  ").unwrap(), expected);
}

#[test]
fn indent_leaves_empty_containers_on_one_line() {
    let value = json!({"a": {}, "b": []});
    let out = arbor_core::encode_string(&value, &EncodeOptions::new().indent("", "  ")).unwrap();
    assert_eq!(out, "{\n  \"a\": {},\n  \"b\": []\n}");
}

#[test]
fn uninitialized_encodes_as_null() {
    let doc = Document::uninitialized();
    assert_eq!(doc.to_string(), "null");
    assert_eq!(doc.encode(&EncodeOptions::new()).unwrap(), b"null");
    assert_eq!(doc.to_string_indent("", "  ").unwrap(), "null");
}

#[test]
fn document_serializes_as_its_root() {
    let doc = Document::parse_str(r#"{"a":[1,true,null]}"#).unwrap();
    assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"a":[1,true,null]}"#);
    assert_eq!(serde_json::to_value(&doc).unwrap(), json!({"a": [1, true, null]}));
    assert_eq!(serde_json::to_string(&Document::uninitialized()).unwrap(), "null");
}

#[test]
fn string_escapes_survive_encoding() {
    let value = json!({"quote": "say \"hi\"\n", "slash": "a/b"});
    let out = arbor_core::encode_string(&value, &EncodeOptions::new()).unwrap();
    assert_eq!(arbor_core::decode_str(&out).unwrap(), value);
}
