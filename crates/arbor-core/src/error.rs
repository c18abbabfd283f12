//! Error types for path resolution, mutation and decoding.

use thiserror::Error;

/// Errors that can occur while resolving, mutating or decoding a tree.
///
/// Variants that carry a `position` refer to the zero-based index of the
/// path segment at which the walk failed.
#[derive(Error, Debug)]
pub enum ArborError {
    /// The input was not valid JSON. Surfaced unmodified from `serde_json`.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An object along the path did not contain the requested key.
    #[error("failed to resolve path segment '{position}': key '{key}' was not found")]
    KeyNotFound { position: usize, key: String },

    /// The path tried to step into a scalar value.
    #[error("failed to resolve path segment '{position}': field '{segment}' was not found")]
    FieldNotFound { position: usize, segment: String },

    /// An array segment was not a valid non-negative decimal index.
    #[error(
        "failed to resolve path segment '{position}': found array but segment value '{segment}' could not be parsed into array index"
    )]
    InvalidIndex { position: usize, segment: String },

    /// An array index exceeded the length of the array.
    #[error(
        "failed to resolve path segment '{position}': found array but index '{index}' exceeded target array size of '{len}'"
    )]
    IndexOutOfBounds {
        position: usize,
        index: usize,
        len: usize,
    },

    /// A write path stepped through a scalar where a container was expected.
    #[error("encountered value collision whilst building path at segment '{position}' ('{segment}')")]
    PathCollision { position: usize, segment: String },

    /// The operation requires an array.
    #[error("expected an array but found {found}")]
    NotAnArray { found: &'static str },

    /// The operation requires an object.
    #[error("expected an object but found {found}")]
    NotAnObject { found: &'static str },

    /// The operation requires an object or an array.
    #[error("expected an object or array but found {found}")]
    NotAContainer { found: &'static str },

    /// A JSON Pointer string could not be parsed.
    #[error("failed to resolve JSON pointer: {0}")]
    MalformedPointer(String),

    /// The query was empty or otherwise unusable for the operation.
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),
}

/// Convenience alias used throughout arbor-core.
pub type Result<T> = std::result::Result<T, ArborError>;

/// Name of the JSON shape of `value`, used in type-mismatch errors.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
