//! Deterministic in-place merge of one tree into another.
//!
//! Objects merge key by key; keys present on both sides recurse. Every other
//! pairing is a collision, resolved by a policy function. The default policy,
//! [`concat_collision`], never discards a value:
//!
//! | dst       | src       | result                       |
//! |-----------|-----------|------------------------------|
//! | object    | object    | recurse per key              |
//! | array     | array     | `[...dst, ...src]`           |
//! | array     | non-array | `[...dst, src]`              |
//! | non-array | array     | `[dst, ...src]`              |
//! | object    | scalar    | `[dst, src]`                 |
//! | scalar    | object    | `[dst, src]`                 |
//! | scalar    | scalar    | `[dst, src]`                 |

use crate::error::kind_of;
use serde_json::Value;
use tracing::trace;

/// Merge `src` into `dst` with the default [`concat_collision`] policy.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let mut dst = json!({"k": "x", "list": ["a"], "only_dst": 1});
/// arbor_core::merge(&mut dst, json!({"k": "y", "list": ["b"], "only_src": 2}));
/// assert_eq!(
///     dst,
///     json!({"k": ["x", "y"], "list": ["a", "b"], "only_dst": 1, "only_src": 2})
/// );
/// ```
pub fn merge(dst: &mut Value, src: Value) {
    merge_with(dst, src, concat_collision);
}

/// Merge `src` into `dst`, resolving collisions with `on_collision`.
///
/// `on_collision` receives the existing value and the incoming value (in
/// that order) for every location where the two sides are not both objects,
/// and returns the value to keep there.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// // Last write wins.
/// let mut dst = json!({"a": {"b": 1, "c": 2}});
/// arbor_core::merge_with(&mut dst, json!({"a": {"b": 10}}), |_, src| src);
/// assert_eq!(dst, json!({"a": {"b": 10, "c": 2}}));
/// ```
pub fn merge_with<F>(dst: &mut Value, src: Value, mut on_collision: F)
where
    F: FnMut(Value, Value) -> Value,
{
    merge_into(dst, src, &mut on_collision);
}

fn merge_into<F>(dst: &mut Value, src: Value, on_collision: &mut F)
where
    F: FnMut(Value, Value) -> Value,
{
    match (dst, src) {
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (key, src_value) in src_map {
                match dst_map.get_mut(&key) {
                    Some(dst_value) => merge_into(dst_value, src_value, on_collision),
                    None => {
                        dst_map.insert(key, src_value);
                    }
                }
            }
        }
        (dst, src) => {
            let existing = dst.take();
            trace!(
                target: "arbor::merge",
                dst = kind_of(&existing),
                src = kind_of(&src),
                "resolving collision"
            );
            *dst = on_collision(existing, src);
        }
    }
}

/// The default collision policy: concatenate arrays, otherwise wrap both
/// values into an array, `dst` first.
pub fn concat_collision(dst: Value, src: Value) -> Value {
    match (dst, src) {
        (Value::Array(mut items), Value::Array(more)) => {
            items.extend(more);
            Value::Array(items)
        }
        (Value::Array(mut items), src) => {
            items.push(src);
            Value::Array(items)
        }
        (dst, Value::Array(more)) => {
            let mut items = Vec::with_capacity(more.len() + 1);
            items.push(dst);
            items.extend(more);
            Value::Array(items)
        }
        (dst, src) => Value::Array(vec![dst, src]),
    }
}
