//! Flattening a nested tree into a single-level map keyed by dotted paths.
//!
//! Keys are joined raw with `.`: a key that itself contains a dot is not
//! escaped, and array indices are written in decimal. Both mean distinct
//! source paths can flatten to the same key; the later one wins.

use crate::error::{kind_of, ArborError, Result};
use crate::mutate::set;
use serde_json::{Map, Value};

/// Flatten `root` into a map from dotted paths to leaf values.
///
/// Scalars and `null` are leaves. Empty objects and arrays are dropped unless
/// `include_empty` is set, in which case they are kept as `{}` / `[]` leaves.
/// The root must be an object or an array.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let doc = json!({"foo": [{"bar": "1"}, {"bar": "2"}], "empty": {}});
/// let flat = arbor_core::flatten(&doc, false).unwrap();
/// assert_eq!(serde_json::Value::Object(flat), json!({"foo.0.bar": "1", "foo.1.bar": "2"}));
///
/// let flat = arbor_core::flatten(&doc, true).unwrap();
/// assert_eq!(flat.get("empty"), Some(&json!({})));
/// ```
pub fn flatten(root: &Value, include_empty: bool) -> Result<Map<String, Value>> {
    if !(root.is_object() || root.is_array()) {
        return Err(ArborError::NotAContainer {
            found: kind_of(root),
        });
    }
    let mut out = Map::new();
    flatten_into(root, None, include_empty, &mut out);
    Ok(out)
}

fn flatten_into(node: &Value, prefix: Option<&str>, include_empty: bool, out: &mut Map<String, Value>) {
    let join = |key: &str| match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key.to_string(),
    };
    match node {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(child, Some(&join(key)), include_empty, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, Some(&join(&index.to_string())), include_empty, out);
            }
        }
        Value::Object(_) | Value::Array(_) => {
            if let (true, Some(prefix)) = (include_empty, prefix) {
                out.insert(prefix.to_string(), node.clone());
            }
        }
        leaf => {
            if let Some(prefix) = prefix {
                out.insert(prefix.to_string(), leaf.clone());
            }
        }
    }
}

/// Rebuild a tree from a flattened map by setting each dotted key.
///
/// Intermediate levels are always created as objects, so array indices come
/// back as object keys (`"0"`, `"1"`, ...). Fails with
/// [`ArborError::PathCollision`] if one key is a leaf and another key
/// continues past it.
pub fn unflatten(flat: &Map<String, Value>) -> Result<Value> {
    let mut root = Value::Object(Map::new());
    for (key, value) in flat {
        let segments: Vec<&str> = key.split('.').collect();
        set(&mut root, &segments, value.clone())?;
    }
    Ok(root)
}
