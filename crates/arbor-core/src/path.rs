//! Path segments and the two surface syntaxes that produce them.
//!
//! A [`Path`] is an ordered list of string segments. Two textual forms
//! normalize to it:
//!
//! - **Dot-notation**: `a.b.c`. A literal `.` inside a key is written `~1`
//!   and a literal `~` is written `~0`. Empty segments are legal and address
//!   the empty-string key, so `""` is the single segment `[""]` and `a..b`
//!   is `["a", "", "b"]`.
//! - **JSON Pointer** (RFC 6901): `/a/b/c`, with `~1` for `/` and `~0` for
//!   `~`. The leading `/` is mandatory.
//!
//! Segments carry no type information. Whether `"3"` is an object key or an
//! array index is decided by the node it is applied to, which means a key
//! `"3"` and index `3` look the same once a tree is flattened.

use crate::error::{ArborError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Segment that fans a read out across every element of an array.
pub const WILDCARD: &str = "*";

/// Segment that appends a new element when writing into an array.
pub const APPEND: &str = "-";

/// An ordered sequence of path segments.
///
/// # Examples
///
/// ```
/// use arbor_core::Path;
///
/// let dotted = Path::parse_dot("users.0.name");
/// let pointer = Path::parse_pointer("/users/0/name").unwrap();
/// assert_eq!(dotted, pointer);
/// assert_eq!(dotted.to_pointer(), "/users/0/name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<String>);

impl Path {
    /// Create an empty path, addressing the root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a dot-notation path. Never fails: every string is a valid
    /// dot-path.
    pub fn parse_dot(path: &str) -> Self {
        Self(
            path.split('.')
                .map(|seg| unescape_dot_segment(seg).into_owned())
                .collect(),
        )
    }

    /// Parse a JSON Pointer. The pointer must begin with `/`; `"/"` addresses
    /// the empty-string key of the root. The empty pointer is rejected.
    pub fn parse_pointer(pointer: &str) -> Result<Self> {
        if pointer.is_empty() {
            return Err(ArborError::MalformedPointer(
                "path must not be empty".to_string(),
            ));
        }
        match pointer.strip_prefix('/') {
            Some(rest) => Ok(Self(
                rest.split('/')
                    .map(|seg| unescape_pointer_segment(seg).into_owned())
                    .collect(),
            )),
            None => Err(ArborError::MalformedPointer(
                "path must begin with '/'".to_string(),
            )),
        }
    }

    /// Builder: append a segment and return the path.
    pub fn key(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Builder: append an array index segment and return the path.
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(index.to_string());
        self
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as dot-notation, escaping `~` and `.` inside segments.
    pub fn to_dot(&self) -> String {
        self.0
            .iter()
            .map(|seg| escape_dot_segment(seg))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Render as a JSON Pointer. The root renders as `""`.
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for seg in &self.0 {
            out.push('/');
            out.push_str(&escape_pointer_segment(seg));
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot())
    }
}

impl AsRef<[String]> for Path {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

/// Escape a segment for use in a JSON Pointer (`~` → `~0`, `/` → `~1`).
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    escape(segment, '/')
}

/// Reverse of [`escape_pointer_segment`].
pub fn unescape_pointer_segment(segment: &str) -> Cow<'_, str> {
    unescape(segment, '/')
}

/// Escape a segment for use in a dot-path (`~` → `~0`, `.` → `~1`).
pub fn escape_dot_segment(segment: &str) -> Cow<'_, str> {
    escape(segment, '.')
}

/// Reverse of [`escape_dot_segment`].
pub fn unescape_dot_segment(segment: &str) -> Cow<'_, str> {
    unescape(segment, '.')
}

fn escape(segment: &str, separator: char) -> Cow<'_, str> {
    if !segment.contains(&['~', separator][..]) {
        return Cow::Borrowed(segment);
    }
    let mut out = String::with_capacity(segment.len() + 2);
    for c in segment.chars() {
        if c == '~' {
            out.push_str("~0");
        } else if c == separator {
            out.push_str("~1");
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Single left-to-right pass, so `~01` decodes to `~1` and never to the
/// separator. Unknown escapes (`~2`, trailing `~`) are kept literally.
fn unescape(segment: &str, separator: char) -> Cow<'_, str> {
    if !segment.contains('~') {
        return Cow::Borrowed(segment);
    }
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('0') => {
                out.push('~');
                chars.next();
            }
            Some('1') => {
                out.push(separator);
                chars.next();
            }
            _ => out.push('~'),
        }
    }
    Cow::Owned(out)
}

/// Parse an array index segment.
///
/// Only ASCII decimal digits are accepted. Leading zeros are tolerated
/// (`"01"` is index 1); signs, whitespace and the empty string are not.
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
