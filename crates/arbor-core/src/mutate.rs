//! Write-side path operations: set with auto-vivification, delete, and the
//! array helpers built on top of them.
//!
//! # Auto-vivification
//!
//! [`set`] creates every missing intermediate object along the path. An
//! intermediate `null` counts as missing and is replaced by an empty object.
//! A `null` root is treated as an uninitialized tree and becomes an object.
//!
//! Nothing is rolled back when a step fails. Every step below a created
//! container lands in a fresh object and cannot fail, so in practice a failed
//! `set` leaves the tree as it found it.

use crate::error::{kind_of, ArborError, Result};
use crate::path::{Path, APPEND};
use crate::resolve::{array_index, expect_array, get_mut, lookup, lookup_mut};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Write `value` at `path` and return a borrow of the written slot.
///
/// - Object parent: the key is inserted or overwritten.
/// - Array parent: a numeric segment overwrites that index (it must be in
///   bounds); the segment `-` appends. A `-` in the middle of the path
///   appends an empty object and continues into it.
/// - Stepping into a scalar fails with [`ArborError::PathCollision`].
/// - An empty path replaces the whole tree.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let mut doc = json!({"arr": [1, 2]});
/// arbor_core::set(&mut doc, &["arr", "-"], json!(3)).unwrap();
/// arbor_core::set(&mut doc, &["a", "b", "c"], json!(true)).unwrap();
/// assert_eq!(doc, json!({"arr": [1, 2, 3], "a": {"b": {"c": true}}}));
/// ```
pub fn set<'a, S: AsRef<str>>(
    root: &'a mut Value,
    path: &[S],
    value: Value,
) -> Result<&'a mut Value> {
    set_inner(root, path, value).inspect_err(|err| {
        debug!(target: "arbor::mutate", path = %to_path(path), error = %err, "set failed");
    })
}

fn set_inner<'a, S: AsRef<str>>(
    root: &'a mut Value,
    path: &[S],
    value: Value,
) -> Result<&'a mut Value> {
    let Some((last, parents)) = path.split_last() else {
        *root = value;
        return Ok(root);
    };
    if root.is_null() {
        *root = Value::Object(Map::new());
    }
    let mut node = root;
    for (position, seg) in parents.iter().enumerate() {
        node = descend_or_create(node, seg.as_ref(), position)?;
    }
    write_slot(node, last.as_ref(), parents.len(), value)
}

/// Set through a dot-notation path.
pub fn set_dot<'a>(root: &'a mut Value, path: &str, value: Value) -> Result<&'a mut Value> {
    set(root, Path::parse_dot(path).segments(), value)
}

/// Set through an RFC 6901 JSON Pointer.
pub fn set_pointer<'a>(root: &'a mut Value, pointer: &str, value: Value) -> Result<&'a mut Value> {
    set(root, Path::parse_pointer(pointer)?.segments(), value)
}

fn descend_or_create<'a>(node: &'a mut Value, seg: &str, position: usize) -> Result<&'a mut Value> {
    let child = slot(node, seg, position)?;
    if child.is_null() {
        trace!(target: "arbor::mutate", position, segment = seg, "creating intermediate object");
        *child = Value::Object(Map::new());
    }
    Ok(child)
}

fn write_slot<'a>(
    node: &'a mut Value,
    seg: &str,
    position: usize,
    value: Value,
) -> Result<&'a mut Value> {
    let slot = slot(node, seg, position)?;
    *slot = value;
    Ok(slot)
}

/// The child of `node` addressed by `seg`, inserting `null` for a missing
/// object key or an appended array element.
fn slot<'a>(node: &'a mut Value, seg: &str, position: usize) -> Result<&'a mut Value> {
    match node {
        Value::Object(map) => Ok(map.entry(seg).or_insert(Value::Null)),
        Value::Array(items) => {
            if seg == APPEND {
                items.push(Value::Null);
                let at = items.len() - 1;
                return Ok(&mut items[at]);
            }
            let index = array_index(seg, position)?;
            let len = items.len();
            items.get_mut(index).ok_or(ArborError::IndexOutOfBounds {
                position,
                index,
                len,
            })
        }
        _ => Err(collision(position, seg)),
    }
}

fn collision(position: usize, seg: &str) -> ArborError {
    ArborError::PathCollision {
        position,
        segment: seg.to_string(),
    }
}

/// Remove the node at `path` and return it.
///
/// The parent must be an object holding the key ([`ArborError::KeyNotFound`]
/// otherwise) or an array with the index in bounds. Removing from an array
/// shifts later elements down; removing from an object keeps the order of
/// the remaining keys.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let mut doc = json!({"a": {"x": 1, "y": 2}});
/// assert_eq!(arbor_core::delete(&mut doc, &["a", "x"]).unwrap(), json!(1));
/// assert_eq!(doc, json!({"a": {"y": 2}}));
/// assert!(arbor_core::delete(&mut doc, &["a", "x"]).is_err());
/// ```
pub fn delete<S: AsRef<str>>(root: &mut Value, path: &[S]) -> Result<Value> {
    delete_inner(root, path).inspect_err(|err| {
        debug!(target: "arbor::mutate", path = %to_path(path), error = %err, "delete failed");
    })
}

fn delete_inner<S: AsRef<str>>(root: &mut Value, path: &[S]) -> Result<Value> {
    let Some((last, parents)) = path.split_last() else {
        return Err(ArborError::InvalidQuery("cannot delete the root"));
    };
    let last = last.as_ref();
    let position = parents.len();
    let parent = lookup_mut(root, parents).map_err(|err| match err {
        ArborError::FieldNotFound { position, segment } => {
            ArborError::PathCollision { position, segment }
        }
        other => other,
    })?;
    match parent {
        Value::Object(map) => map
            .shift_remove(last)
            .ok_or_else(|| ArborError::KeyNotFound {
                position,
                key: last.to_string(),
            }),
        Value::Array(items) => {
            let index = array_index(last, position)?;
            remove_index(items, index, position)
        }
        _ => Err(collision(position, last)),
    }
}

/// Delete through a dot-notation path.
pub fn delete_dot(root: &mut Value, path: &str) -> Result<Value> {
    delete(root, Path::parse_dot(path).segments())
}

/// Delete through an RFC 6901 JSON Pointer.
pub fn delete_pointer(root: &mut Value, pointer: &str) -> Result<Value> {
    delete(root, Path::parse_pointer(pointer)?.segments())
}

fn remove_index(items: &mut Vec<Value>, index: usize, position: usize) -> Result<Value> {
    if index >= items.len() {
        return Err(ArborError::IndexOutOfBounds {
            position,
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

/// Push `value` onto the array at `path`.
///
/// A missing (or `null`) target becomes `[value]`. A target holding any
/// other non-array value is converted into `[existing, value]`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let mut doc = json!({"first": 1});
/// arbor_core::array_append(&mut doc, &["first"], json!(2)).unwrap();
/// arbor_core::array_append(&mut doc, &["second"], json!(3)).unwrap();
/// assert_eq!(doc, json!({"first": [1, 2], "second": [3]}));
/// ```
pub fn array_append<S: AsRef<str>>(root: &mut Value, path: &[S], value: Value) -> Result<()> {
    push_values(root, path, vec![value])
}

/// Like [`array_append`], but an array `value` is concatenated element by
/// element instead of being pushed as one nested element.
pub fn array_concat<S: AsRef<str>>(root: &mut Value, path: &[S], value: Value) -> Result<()> {
    let values = match value {
        Value::Array(items) => items,
        other => vec![other],
    };
    push_values(root, path, values)
}

fn push_values<S: AsRef<str>>(root: &mut Value, path: &[S], values: Vec<Value>) -> Result<()> {
    match get_mut(root, path) {
        Some(Value::Array(items)) => items.extend(values),
        Some(existing) if existing.is_null() => *existing = Value::Array(values),
        Some(existing) => {
            let mut items = Vec::with_capacity(values.len() + 1);
            items.push(existing.take());
            items.extend(values);
            *existing = Value::Array(items);
        }
        None => {
            set(root, path, Value::Array(values))?;
        }
    }
    Ok(())
}

/// Remove element `index` from the array at `path` and return it.
pub fn array_remove<S: AsRef<str>>(root: &mut Value, path: &[S], index: usize) -> Result<Value> {
    match lookup_mut(root, path)? {
        Value::Array(items) => remove_index(items, index, path.len()),
        other => Err(ArborError::NotAnArray {
            found: kind_of(other),
        }),
    }
}

/// Borrow element `index` of the array at `path`.
pub fn array_element<'a, S: AsRef<str>>(
    root: &'a Value,
    path: &[S],
    index: usize,
) -> Result<&'a Value> {
    let items = expect_array(lookup(root, path)?)?;
    items.get(index).ok_or(ArborError::IndexOutOfBounds {
        position: path.len(),
        index,
        len: items.len(),
    })
}

/// Number of elements in the array at `path`.
pub fn array_count<S: AsRef<str>>(root: &Value, path: &[S]) -> Result<usize> {
    Ok(expect_array(lookup(root, path)?)?.len())
}

/// Put a fresh empty object at `path` and return it.
pub fn object<'a, S: AsRef<str>>(root: &'a mut Value, path: &[S]) -> Result<&'a mut Value> {
    set(root, path, Value::Object(Map::new()))
}

/// Put a fresh empty array at `path` and return it.
pub fn array<'a, S: AsRef<str>>(root: &'a mut Value, path: &[S]) -> Result<&'a mut Value> {
    set(root, path, Value::Array(Vec::new()))
}

/// Put an array of `size` nulls at `path` and return it, ready to be filled
/// with [`set_index`].
pub fn array_of_size<'a, S: AsRef<str>>(
    root: &'a mut Value,
    path: &[S],
    size: usize,
) -> Result<&'a mut Value> {
    set(root, path, Value::Array(vec![Value::Null; size]))
}

/// Overwrite element `index` of the array `target`. Never appends.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use arbor_core::ArborError;
///
/// let mut doc = json!({});
/// let arr = arbor_core::array_of_size(&mut doc, &["slots"], 2).unwrap();
/// arbor_core::set_index(arr, 1, json!("b")).unwrap();
/// assert!(matches!(
///     arbor_core::set_index(arr, 2, json!("c")),
///     Err(ArborError::IndexOutOfBounds { index: 2, len: 2, .. })
/// ));
/// assert_eq!(doc, json!({"slots": [null, "b"]}));
/// ```
pub fn set_index(target: &mut Value, index: usize, value: Value) -> Result<&mut Value> {
    let items = match target {
        Value::Array(items) => items,
        other => {
            return Err(ArborError::NotAnArray {
                found: kind_of(other),
            })
        }
    };
    let len = items.len();
    let slot = items.get_mut(index).ok_or(ArborError::IndexOutOfBounds {
        position: 0,
        index,
        len,
    })?;
    *slot = value;
    Ok(slot)
}

/// Put a fresh empty object at element `index` of the array `target`.
pub fn object_at(target: &mut Value, index: usize) -> Result<&mut Value> {
    set_index(target, index, Value::Object(Map::new()))
}

/// Put a fresh empty array at element `index` of the array `target`.
pub fn array_at(target: &mut Value, index: usize) -> Result<&mut Value> {
    set_index(target, index, Value::Array(Vec::new()))
}

/// Put an array of `size` nulls at element `index` of the array `target`.
pub fn array_of_size_at(target: &mut Value, size: usize, index: usize) -> Result<&mut Value> {
    set_index(target, index, Value::Array(vec![Value::Null; size]))
}

fn to_path<S: AsRef<str>>(path: &[S]) -> Path {
    path.iter().map(|seg| seg.as_ref()).collect()
}
