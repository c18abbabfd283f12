//! Read-side path resolution.
//!
//! Two families of lookups:
//!
//! - [`get`] / [`lookup`] / [`get_mut`] walk a plain path and hand back a
//!   borrow of the node inside the tree.
//! - [`search`] / [`search_strict`] additionally expand the [`WILDCARD`]
//!   segment over arrays. A fan-out builds a new array, so the result is a
//!   `Cow`: borrowed when no wildcard was involved, owned otherwise.
//!
//! The `Option` forms are the "absence sentinel": a missing key and a
//! present `null` are told apart by `None` versus `Some(&Value::Null)`.

use crate::error::{kind_of, ArborError, Result};
use crate::path::{parse_index, Path, WILDCARD};
use serde_json::Value;
use std::borrow::Cow;

/// Resolve `path` and return a borrow of the node, or `None`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": [10, 20]}, "n": null});
/// assert_eq!(arbor_core::get(&doc, &["a", "b", "1"]), Some(&json!(20)));
/// assert_eq!(arbor_core::get(&doc, &["n"]), Some(&json!(null)));
/// assert_eq!(arbor_core::get(&doc, &["missing"]), None);
/// ```
pub fn get<'a, S: AsRef<str>>(root: &'a Value, path: &[S]) -> Option<&'a Value> {
    lookup(root, path).ok()
}

/// Like [`get`], but reports which segment failed and why.
pub fn lookup<'a, S: AsRef<str>>(root: &'a Value, path: &[S]) -> Result<&'a Value> {
    path.iter()
        .enumerate()
        .try_fold(root, |node, (position, seg)| step(node, seg.as_ref(), position))
}

/// Resolve `path` to an exclusive borrow of the node.
///
/// The returned reference aliases the tree: writing through it writes the
/// parent document.
pub fn get_mut<'a, S: AsRef<str>>(root: &'a mut Value, path: &[S]) -> Option<&'a mut Value> {
    lookup_mut(root, path).ok()
}

/// Like [`get_mut`], but reports which segment failed and why.
pub fn lookup_mut<'a, S: AsRef<str>>(root: &'a mut Value, path: &[S]) -> Result<&'a mut Value> {
    let mut node = root;
    for (position, seg) in path.iter().enumerate() {
        node = step_mut(node, seg.as_ref(), position)?;
    }
    Ok(node)
}

/// Resolve `path`, expanding `*` segments over arrays.
///
/// A wildcard resolves the rest of the path against every element and
/// collects the results in order. If any element fails to resolve, the whole
/// search fails. A wildcard against an empty array, an object or a scalar
/// finds nothing; use [`get`] to reach a literal `"*"` key.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let doc = json!({"a": [{"v": 1}, {"v": 2}]});
/// let found = arbor_core::search(&doc, &["a", "*", "v"]).unwrap();
/// assert_eq!(found.into_owned(), json!([1, 2]));
/// assert!(arbor_core::search(&doc, &["a", "*", "w"]).is_none());
/// assert!(arbor_core::search(&json!({"a": []}), &["a", "*"]).is_none());
/// ```
pub fn search<'a, S: AsRef<str>>(root: &'a Value, path: &[S]) -> Option<Cow<'a, Value>> {
    search_strict(root, path).ok()
}

/// Like [`search`], but reports which segment failed and why.
pub fn search_strict<'a, S: AsRef<str>>(root: &'a Value, path: &[S]) -> Result<Cow<'a, Value>> {
    search_from(root, path, 0)
}

fn search_from<'a, S: AsRef<str>>(
    root: &'a Value,
    path: &[S],
    offset: usize,
) -> Result<Cow<'a, Value>> {
    let mut node = root;
    for (i, seg) in path.iter().enumerate() {
        let seg = seg.as_ref();
        let position = offset + i;
        if seg == WILDCARD {
            let items = match node {
                Value::Array(items) if !items.is_empty() => items,
                Value::Object(_) => {
                    return Err(ArborError::KeyNotFound {
                        position,
                        key: seg.to_string(),
                    })
                }
                _ => {
                    return Err(ArborError::FieldNotFound {
                        position,
                        segment: seg.to_string(),
                    })
                }
            };
            let rest = &path[i + 1..];
            if rest.is_empty() {
                return Ok(Cow::Owned(node.clone()));
            }
            let collected = items
                .iter()
                .map(|item| search_from(item, rest, position + 1).map(Cow::into_owned))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Cow::Owned(Value::Array(collected)));
        }
        node = step(node, seg, position)?;
    }
    Ok(Cow::Borrowed(node))
}

/// Resolve a dot-notation path with wildcard expansion.
pub fn search_dot<'a>(root: &'a Value, path: &str) -> Option<Cow<'a, Value>> {
    search(root, Path::parse_dot(path).segments())
}

/// Resolve an RFC 6901 JSON Pointer. Wildcards are not expanded.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let doc = json!({"a/b": {"c~d": 1}});
/// assert_eq!(arbor_core::pointer(&doc, "/a~1b/c~0d").unwrap(), &json!(1));
/// assert!(arbor_core::pointer(&doc, "a").is_err());
/// ```
pub fn pointer<'a>(root: &'a Value, pointer: &str) -> Result<&'a Value> {
    let path = Path::parse_pointer(pointer)?;
    lookup(root, path.segments())
}

/// True if `path` resolves. A `null` leaf exists.
pub fn exists<S: AsRef<str>>(root: &Value, path: &[S]) -> bool {
    search(root, path).is_some()
}

fn step<'a>(node: &'a Value, seg: &str, position: usize) -> Result<&'a Value> {
    match node {
        Value::Object(map) => map.get(seg).ok_or_else(|| ArborError::KeyNotFound {
            position,
            key: seg.to_string(),
        }),
        Value::Array(items) => {
            let index = array_index(seg, position)?;
            let len = items.len();
            items.get(index).ok_or(ArborError::IndexOutOfBounds {
                position,
                index,
                len,
            })
        }
        _ => Err(ArborError::FieldNotFound {
            position,
            segment: seg.to_string(),
        }),
    }
}

fn step_mut<'a>(node: &'a mut Value, seg: &str, position: usize) -> Result<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(seg).ok_or_else(|| ArborError::KeyNotFound {
            position,
            key: seg.to_string(),
        }),
        Value::Array(items) => {
            let index = array_index(seg, position)?;
            let len = items.len();
            items.get_mut(index).ok_or(ArborError::IndexOutOfBounds {
                position,
                index,
                len,
            })
        }
        _ => Err(ArborError::FieldNotFound {
            position,
            segment: seg.to_string(),
        }),
    }
}

/// Parse `seg` as an index into an array found at `position`.
pub(crate) fn array_index(seg: &str, position: usize) -> Result<usize> {
    parse_index(seg).ok_or_else(|| ArborError::InvalidIndex {
        position,
        segment: seg.to_string(),
    })
}

/// Require `node` to be an array, for operations that only make sense on one.
pub(crate) fn expect_array(node: &Value) -> Result<&Vec<Value>> {
    match node {
        Value::Array(items) => Ok(items),
        other => Err(ArborError::NotAnArray {
            found: kind_of(other),
        }),
    }
}
