//! An owning handle over a tree, with the engine exposed as methods.
//!
//! A [`Document`] may be *uninitialized* (no root at all), which is distinct
//! from a root that is JSON `null`. Every read on an uninitialized document
//! finds nothing, every write initializes it, and it encodes as `null`.

use crate::codec::{self, EncodeOptions};
use crate::error::{kind_of, ArborError, Result};
use crate::flatten;
use crate::merge;
use crate::mutate;
use crate::path::Path;
use crate::resolve;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::io::Read;

/// A JSON tree addressed by path.
///
/// # Examples
///
/// ```
/// use arbor_core::Document;
/// use serde_json::json;
///
/// let mut doc = Document::new();
/// doc.set(&["outer", "inner", "value"], json!(10)).unwrap();
/// doc.set_path("outer.inner.value2", json!(20)).unwrap();
/// doc.array_append(&["outer", "list"], json!("x")).unwrap();
///
/// assert_eq!(
///     doc.to_string(),
///     r#"{"outer":{"inner":{"value":10,"value2":20},"list":["x"]}}"#
/// );
/// assert_eq!(doc.path("outer.inner.value").as_deref(), Some(&json!(10)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Option<Value>,
}

impl Document {
    /// A document whose root is an empty object.
    pub fn new() -> Self {
        Self::wrap(Value::Object(Map::new()))
    }

    /// A document without a root.
    pub fn uninitialized() -> Self {
        Self { root: None }
    }

    /// Take ownership of an already decoded value.
    pub fn wrap(value: Value) -> Self {
        Self { root: Some(value) }
    }

    /// Decode a complete JSON document from bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes).map(Self::wrap)
    }

    /// Decode a complete JSON document from a string.
    pub fn parse_str(json: &str) -> Result<Self> {
        codec::decode_str(json).map(Self::wrap)
    }

    /// Decode a complete JSON document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        codec::decode_reader(reader).map(Self::wrap)
    }

    pub fn is_initialized(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut Value> {
        self.root.as_mut()
    }

    pub fn into_inner(self) -> Option<Value> {
        self.root
    }

    fn init_root(&mut self) -> &mut Value {
        self.root.get_or_insert(Value::Null)
    }

    fn require_root(&self) -> Result<&Value> {
        self.root.as_ref().ok_or(ArborError::NotAContainer {
            found: "an uninitialized document",
        })
    }

    fn require_root_mut(&mut self) -> Result<&mut Value> {
        self.root.as_mut().ok_or(ArborError::NotAContainer {
            found: "an uninitialized document",
        })
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    /// Resolve a segment path, expanding `*` over arrays.
    pub fn search<S: AsRef<str>>(&self, path: &[S]) -> Option<Cow<'_, Value>> {
        resolve::search(self.root.as_ref()?, path)
    }

    /// Resolve a dot-notation path, expanding `*` over arrays.
    pub fn path(&self, path: &str) -> Option<Cow<'_, Value>> {
        resolve::search_dot(self.root.as_ref()?, path)
    }

    /// Resolve a JSON Pointer. Errors name the failing segment.
    pub fn pointer(&self, pointer: &str) -> Result<&Value> {
        let path = Path::parse_pointer(pointer)?;
        let Some(root) = self.root.as_ref() else {
            return Err(ArborError::FieldNotFound {
                position: 0,
                segment: path.segments().first().cloned().unwrap_or_default(),
            });
        };
        resolve::lookup(root, path.segments())
    }

    /// Borrow the node at a segment path (no wildcard expansion).
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        resolve::get(self.root.as_ref()?, path)
    }

    /// Exclusively borrow the node at a segment path. Writes through the
    /// returned reference modify this document.
    pub fn get_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Option<&mut Value> {
        resolve::get_mut(self.root.as_mut()?, path)
    }

    pub fn exists<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.search(path).is_some()
    }

    pub fn exists_path(&self, path: &str) -> bool {
        self.path(path).is_some()
    }

    /// Children of the root, in order. Object children come in key order,
    /// without their keys.
    pub fn children(&self) -> Result<Vec<&Value>> {
        match self.require_root()? {
            Value::Array(items) => Ok(items.iter().collect()),
            Value::Object(map) => Ok(map.values().collect()),
            other => Err(ArborError::NotAContainer {
                found: kind_of(other),
            }),
        }
    }

    /// Key → child view of an object root.
    pub fn children_map(&self) -> Result<&Map<String, Value>> {
        match self.require_root()? {
            Value::Object(map) => Ok(map),
            other => Err(ArborError::NotAnObject {
                found: kind_of(other),
            }),
        }
    }

    // ── Writes ──────────────────────────────────────────────────────────────

    /// Write `value` at a segment path, creating intermediate objects. See
    /// [`mutate::set`].
    pub fn set<S: AsRef<str>>(&mut self, path: &[S], value: impl Into<Value>) -> Result<&mut Value> {
        mutate::set(self.init_root(), path, value.into())
    }

    /// Write `value` at a dot-notation path.
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) -> Result<&mut Value> {
        self.set(Path::parse_dot(path).segments(), value)
    }

    /// Write `value` at a JSON Pointer.
    pub fn set_pointer(&mut self, pointer: &str, value: impl Into<Value>) -> Result<&mut Value> {
        let path = Path::parse_pointer(pointer)?;
        self.set(path.segments(), value)
    }

    /// Remove and return the node at a segment path.
    pub fn delete<S: AsRef<str>>(&mut self, path: &[S]) -> Result<Value> {
        mutate::delete(self.require_root_mut()?, path)
    }

    /// Remove and return the node at a dot-notation path.
    pub fn delete_path(&mut self, path: &str) -> Result<Value> {
        self.delete(Path::parse_dot(path).segments())
    }

    /// Remove and return the node at a JSON Pointer.
    pub fn delete_pointer(&mut self, pointer: &str) -> Result<Value> {
        let path = Path::parse_pointer(pointer)?;
        self.delete(path.segments())
    }

    pub fn array_append<S: AsRef<str>>(&mut self, path: &[S], value: impl Into<Value>) -> Result<()> {
        mutate::array_append(self.init_root(), path, value.into())
    }

    pub fn array_concat<S: AsRef<str>>(&mut self, path: &[S], value: impl Into<Value>) -> Result<()> {
        mutate::array_concat(self.init_root(), path, value.into())
    }

    pub fn array_remove<S: AsRef<str>>(&mut self, path: &[S], index: usize) -> Result<Value> {
        mutate::array_remove(self.require_root_mut()?, path, index)
    }

    pub fn array_element<S: AsRef<str>>(&self, path: &[S], index: usize) -> Result<&Value> {
        mutate::array_element(self.require_root()?, path, index)
    }

    pub fn array_count<S: AsRef<str>>(&self, path: &[S]) -> Result<usize> {
        mutate::array_count(self.require_root()?, path)
    }

    /// Put a fresh empty object at a segment path and return it.
    pub fn object<S: AsRef<str>>(&mut self, path: &[S]) -> Result<&mut Value> {
        mutate::object(self.init_root(), path)
    }

    /// Put a fresh empty array at a segment path and return it.
    pub fn array<S: AsRef<str>>(&mut self, path: &[S]) -> Result<&mut Value> {
        mutate::array(self.init_root(), path)
    }

    /// Put an array of `size` nulls at a segment path and return it.
    pub fn array_of_size<S: AsRef<str>>(&mut self, path: &[S], size: usize) -> Result<&mut Value> {
        mutate::array_of_size(self.init_root(), path, size)
    }

    /// Overwrite element `index` of an array root.
    pub fn set_index(&mut self, index: usize, value: impl Into<Value>) -> Result<&mut Value> {
        match self.root.as_mut() {
            Some(root) => mutate::set_index(root, index, value.into()),
            None => Err(ArborError::NotAnArray {
                found: "an uninitialized document",
            }),
        }
    }

    /// Merge `other` into this document with the default collision policy.
    /// An uninitialized document adopts `other`'s root.
    pub fn merge(&mut self, other: Document) {
        self.merge_with(other, merge::concat_collision);
    }

    /// Merge `other` into this document with a custom collision policy.
    pub fn merge_with<F>(&mut self, other: Document, on_collision: F)
    where
        F: FnMut(Value, Value) -> Value,
    {
        let Some(src) = other.root else {
            return;
        };
        match self.root.as_mut() {
            Some(dst) => merge::merge_with(dst, src, on_collision),
            None => self.root = Some(src),
        }
    }

    /// Flatten the root into a dotted-path map. See [`flatten::flatten`].
    pub fn flatten(&self, include_empty: bool) -> Result<Map<String, Value>> {
        flatten::flatten(self.require_root()?, include_empty)
    }

    // ── Output ──────────────────────────────────────────────────────────────

    /// Serialize with `options`. An uninitialized document encodes as `null`.
    pub fn encode(&self, options: &EncodeOptions) -> Result<Vec<u8>> {
        codec::encode(self.root.as_ref().unwrap_or(&Value::Null), options)
    }

    /// Pretty-printed output; see [`EncodeOptions::indent`].
    pub fn to_string_indent(&self, prefix: &str, unit: &str) -> Result<String> {
        codec::encode_string(
            self.root.as_ref().unwrap_or(&Value::Null),
            &EncodeOptions::new().indent(prefix, unit),
        )
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::wrap(value)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => f.write_str("null"),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.root {
            Some(root) => root.serialize(serializer),
            None => serializer.serialize_unit(),
        }
    }
}
