//! # arbor-core
//!
//! Path-addressed navigation, mutation, merge and flattening for JSON trees
//! whose shape is not known at compile time.
//!
//! The tree type is [`serde_json::Value`]. Paths are sequences of string
//! segments, written either in dot-notation (`a.b.0`) or as RFC 6901 JSON
//! Pointers (`/a/b/0`). A numeric segment indexes into an array, `*` fans a
//! read out across an array, and `-` appends when writing.
//!
//! ## Quick start
//!
//! ```rust
//! use arbor_core::Document;
//! use serde_json::json;
//!
//! let mut doc = Document::parse_str(r#"{"a":[{"v":1},{"v":2}]}"#).unwrap();
//!
//! assert_eq!(doc.path("a.*.v").unwrap().into_owned(), json!([1, 2]));
//!
//! doc.set(&["a", "-"], json!({"v": 3})).unwrap();
//! doc.set_pointer("/b/c", json!(true)).unwrap();
//! doc.delete_path("a.0").unwrap();
//!
//! assert_eq!(doc.to_string(), r#"{"a":[{"v":2},{"v":3}],"b":{"c":true}}"#);
//! ```
//!
//! ## Modules
//!
//! - [`path`]: segment parsing, formatting and escaping
//! - [`resolve`]: reads: lookup, wildcard search, JSON Pointer, existence
//! - [`mutate`]: writes: set with auto-vivification, delete, array helpers
//! - [`merge`]: deterministic merge with pluggable collision policy
//! - [`flatten`]: dotted-path flattening and its inverse
//! - [`codec`]: decoding input and encoding output with options
//! - [`document`]: `Document`, an owning handle over all of the above
//! - [`error`]: error types

pub mod codec;
pub mod document;
pub mod error;
pub mod flatten;
pub mod merge;
pub mod mutate;
pub mod path;
pub mod resolve;

pub use codec::{decode, decode_reader, decode_str, encode, encode_string, EncodeOptions};
pub use document::Document;
pub use error::{ArborError, Result};
pub use flatten::{flatten, unflatten};
pub use merge::{concat_collision, merge, merge_with};
pub use mutate::{
    array, array_append, array_at, array_concat, array_count, array_element, array_of_size,
    array_of_size_at, array_remove, delete, delete_dot, delete_pointer, object, object_at, set,
    set_dot, set_index, set_pointer,
};
pub use path::Path;
pub use resolve::{exists, get, get_mut, lookup, lookup_mut, pointer, search, search_dot, search_strict};
