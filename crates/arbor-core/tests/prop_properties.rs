/// Property-based tests over randomly generated trees.
///
/// Strategies generate nested objects and arrays whose keys are short
/// lowercase words, so no key contains a separator and flattened paths never
/// collide. Properties checked:
/// - every leaf found by walking the tree resolves through both path syntaxes
/// - set followed by get yields the written value
/// - deleting an array element shifts the rest down by one
/// - the default merge never loses a scalar leaf
/// - flatten emits exactly one entry per scalar leaf
/// - segment escaping reverses cleanly for any string
use arbor_core::path::{
    escape_dot_segment, escape_pointer_segment, unescape_dot_segment, unescape_pointer_segment,
};
use arbor_core::Path;
use proptest::prelude::*;
use serde_json::{Map, Number, Value};

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| Value::Number(Number::from(n))),
        "[a-zA-Z0-9 ./~]{0,12}".prop_map(Value::String),
    ]
}

fn arb_tree_inner(depth: u32) -> BoxedStrategy<Value> {
    if depth == 0 {
        return arb_scalar().boxed();
    }
    prop_oneof![
        3 => arb_scalar(),
        2 => prop::collection::vec((arb_key(), arb_tree_inner(depth - 1)), 0..5).prop_map(|pairs| {
            let mut map = Map::new();
            for (k, v) in pairs {
                map.insert(k, v);
            }
            Value::Object(map)
        }),
        2 => prop::collection::vec(arb_tree_inner(depth - 1), 0..5).prop_map(Value::Array),
    ]
    .boxed()
}

/// A tree rooted at an object, up to four levels deep.
fn arb_tree() -> impl Strategy<Value = Value> {
    prop::collection::vec((arb_key(), arb_tree_inner(3)), 0..6).prop_map(|pairs| {
        let mut map = Map::new();
        for (k, v) in pairs {
            map.insert(k, v);
        }
        Value::Object(map)
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Paths to every scalar leaf, in document order.
fn leaf_paths(node: &Value, prefix: &Path, out: &mut Vec<Path>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                leaf_paths(child, &prefix.clone().key(key.as_str()), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                leaf_paths(child, &prefix.clone().index(index), out);
            }
        }
        _ => out.push(prefix.clone()),
    }
}

fn count_leaves(node: &Value) -> usize {
    match node {
        Value::Object(map) => map.values().map(count_leaves).sum(),
        Value::Array(items) => items.iter().map(count_leaves).sum(),
        _ => 1,
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Every leaf resolves identically through dot-notation and JSON Pointer.
    #[test]
    fn leaves_resolve_through_both_syntaxes(tree in arb_tree()) {
        let mut paths = Vec::new();
        leaf_paths(&tree, &Path::root(), &mut paths);
        for path in paths {
            let direct = arbor_core::get(&tree, path.segments());
            prop_assert!(direct.is_some());
            let via_pointer = arbor_core::pointer(&tree, &path.to_pointer()).ok();
            prop_assert_eq!(direct, via_pointer);
            let via_dot = arbor_core::search_dot(&tree, &path.to_dot());
            prop_assert_eq!(direct, via_dot.as_deref());
        }
    }

    /// A successful set is immediately observable at the same path.
    #[test]
    fn set_then_get(
        mut tree in arb_tree(),
        path in prop::collection::vec(arb_key(), 1..5),
        value in arb_scalar(),
    ) {
        if arbor_core::set(&mut tree, &path, value.clone()).is_ok() {
            prop_assert_eq!(arbor_core::get(&tree, &path), Some(&value));
        }
    }

    /// Set on an empty object never fails for key-only paths.
    #[test]
    fn set_on_empty_object_always_succeeds(
        path in prop::collection::vec(arb_key(), 1..6),
        value in arb_scalar(),
    ) {
        let mut tree = Value::Object(Map::new());
        prop_assert!(arbor_core::set(&mut tree, &path, value).is_ok());
    }

    /// Deleting element i of an array removes exactly that element.
    #[test]
    fn delete_shifts_array(items in prop::collection::vec(arb_scalar(), 1..10), pick in any::<prop::sample::Index>()) {
        let index = pick.index(items.len());
        let mut tree = serde_json::json!({ "list": items.clone() });
        let removed = arbor_core::delete(&mut tree, &["list".to_string(), index.to_string()]).unwrap();
        prop_assert_eq!(&removed, &items[index]);

        let mut expected = items.clone();
        expected.remove(index);
        prop_assert_eq!(tree["list"].as_array(), Some(&expected));
    }

    /// The default policy keeps every scalar leaf from both sides.
    #[test]
    fn merge_keeps_every_leaf(dst in arb_tree(), src in arb_tree()) {
        let expected = count_leaves(&dst) + count_leaves(&src);
        let mut merged = dst;
        arbor_core::merge(&mut merged, src);
        prop_assert_eq!(count_leaves(&merged), expected);
    }

    /// Without empty containers, flatten has one entry per scalar leaf and
    /// every entry matches the leaf at that path.
    #[test]
    fn flatten_one_entry_per_leaf(tree in arb_tree()) {
        let flat = arbor_core::flatten(&tree, false).unwrap();
        prop_assert_eq!(flat.len(), count_leaves(&tree));
        for (key, value) in &flat {
            let segments: Vec<&str> = key.split('.').collect();
            prop_assert_eq!(arbor_core::get(&tree, &segments), Some(value));
        }
    }

    /// Escaping then unescaping returns the original segment.
    #[test]
    fn escape_round_trip(segment in "[a-z./~01]{0,16}") {
        let escaped = escape_pointer_segment(&segment);
        prop_assert_eq!(unescape_pointer_segment(&escaped), segment.as_str());
        let escaped = escape_dot_segment(&segment);
        prop_assert_eq!(unescape_dot_segment(&escaped), segment.as_str());

        let path = Path::root().key(segment.clone()).key("tail");
        prop_assert_eq!(Path::parse_pointer(&path.to_pointer()).unwrap(), path.clone());
        prop_assert_eq!(Path::parse_dot(&path.to_dot()), path);
    }
}
