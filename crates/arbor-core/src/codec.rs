//! The boundary with the JSON codec: decoding input into a tree and encoding
//! a tree back to bytes.
//!
//! Parsing and serialization are delegated to `serde_json`; this module only
//! adds the output options (indentation with a line prefix, HTML escaping).

use crate::error::Result;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};
use serde_json::Value;
use std::io::{self, Read};

/// Decode a complete JSON document. Empty input and trailing content are
/// errors.
pub fn decode(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode a complete JSON document from a string.
pub fn decode_str(json: &str) -> Result<Value> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a complete JSON document from a reader.
pub fn decode_reader<R: Read>(reader: R) -> Result<Value> {
    Ok(serde_json::from_reader(reader)?)
}

/// Output options for [`encode`].
///
/// The default produces compact JSON with no escaping beyond what JSON
/// requires.
///
/// # Examples
///
/// ```
/// use arbor_core::{encode, EncodeOptions};
/// use serde_json::json;
///
/// let value = json!({"a": ["<b>"]});
/// let opts = EncodeOptions::new().indent("", "  ").html_escape(true);
/// let out = String::from_utf8(encode(&value, &opts).unwrap()).unwrap();
/// assert_eq!(out, "{\n  \"a\": [\n    \"\\u003cb\\u003e\"\n  ]\n}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    indent: Option<Indent>,
    html_escape: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Indent {
    prefix: String,
    unit: String,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-print. Every line after the first starts with `prefix`,
    /// followed by one `unit` per nesting level.
    pub fn indent(mut self, prefix: impl Into<String>, unit: impl Into<String>) -> Self {
        self.indent = Some(Indent {
            prefix: prefix.into(),
            unit: unit.into(),
        });
        self
    }

    /// Escape `<`, `>`, `&`, U+2028 and U+2029 as `\uXXXX` so the output can
    /// be embedded in HTML `<script>` blocks.
    pub fn html_escape(mut self, on: bool) -> Self {
        self.html_escape = on;
        self
    }
}

/// Serialize `value` according to `options`.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match &options.indent {
        None => serialize(&mut buf, value, CompactFormatter, options.html_escape)?,
        Some(indent) => {
            let formatter = PrettyFormatter::with_indent(indent.unit.as_bytes());
            serialize(&mut buf, value, formatter, options.html_escape)?;
            if !indent.prefix.is_empty() {
                buf = prefix_lines(&buf, indent.prefix.as_bytes());
            }
        }
    }
    Ok(buf)
}

/// [`encode`] into a `String`.
pub fn encode_string(value: &Value, options: &EncodeOptions) -> Result<String> {
    let bytes = encode(value, options)?;
    // serde_json only ever writes UTF-8 and the prefix is spliced in after
    // ASCII newlines.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn serialize<F: Formatter>(
    buf: &mut Vec<u8>,
    value: &Value,
    formatter: F,
    html_escape: bool,
) -> Result<()> {
    if html_escape {
        value.serialize(&mut Serializer::with_formatter(buf, HtmlEscape(formatter)))?;
    } else {
        value.serialize(&mut Serializer::with_formatter(buf, formatter))?;
    }
    Ok(())
}

// Newlines inside JSON strings are always escaped, so every raw '\n' in the
// serializer output is a structural line break.
fn prefix_lines(buf: &[u8], prefix: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len() + prefix.len() * 8);
    for &b in buf {
        out.push(b);
        if b == b'\n' {
            out.extend_from_slice(prefix);
        }
    }
    out
}

/// Wraps a formatter and rewrites the HTML-sensitive characters of string
/// contents (keys and values) as `\uXXXX`. Layout is left to the inner
/// formatter.
struct HtmlEscape<F>(F);

impl<F: Formatter> Formatter for HtmlEscape<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            self.0.write_string_fragment(writer, &fragment[start..i])?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        self.0.write_string_fragment(writer, &fragment[start..])
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_value(writer)
    }
}
