//! `arbor` CLI: query, edit, merge and flatten JSON documents by path.
//!
//! ## Usage
//!
//! ```sh
//! # Read a value by dot-path (stdin → stdout)
//! echo '{"a":{"b":[1,2]}}' | arbor get a.b.1
//!
//! # Wildcards fan out across arrays
//! arbor get 'users.*.name' -i users.json
//!
//! # JSON Pointer instead of dot-notation
//! arbor get --pointer /a/b/0 -i doc.json
//!
//! # Write a value (parsed as JSON, falling back to a string)
//! arbor set a.c '{"x":true}' -i doc.json -o doc.json
//! arbor set 'a.b.-' 3 -i doc.json
//!
//! # Remove a value
//! arbor delete a.b.0 -i doc.json
//!
//! # Merge other documents into the input
//! arbor merge extra.json more.json -i base.json
//!
//! # Flatten to dotted keys, pretty-printed
//! arbor --indent '  ' flatten --include-empty -i doc.json
//! ```

use anyhow::{anyhow, Context, Result};
use arbor_core::{Document, EncodeOptions, Path};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde_json::Value;
use std::borrow::Cow;
use std::io::{self, Read};
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(
    name = "arbor",
    version,
    about = "Query, edit, merge and flatten JSON documents by path"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print output, using this string for each indentation level
    #[arg(long, global = true)]
    indent: Option<String>,

    /// Escape <, > and & in output as \u sequences
    #[arg(long, global = true)]
    html_escape: bool,

    /// Log to stderr (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct Io {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a path
    Get {
        /// Dot-path (or JSON Pointer with --pointer); `*` expands arrays
        path: String,
        /// Interpret PATH as a JSON Pointer
        #[arg(long)]
        pointer: bool,
        #[command(flatten)]
        io: Io,
    },
    /// Write a value at a path and print the updated document
    Set {
        /// Dot-path (or JSON Pointer with --pointer); `-` appends to an array
        path: String,
        /// JSON value; anything that does not parse is stored as a string
        value: String,
        /// Interpret PATH as a JSON Pointer
        #[arg(long)]
        pointer: bool,
        #[command(flatten)]
        io: Io,
    },
    /// Remove the value at a path and print the updated document
    Delete {
        /// Dot-path (or JSON Pointer with --pointer)
        path: String,
        /// Interpret PATH as a JSON Pointer
        #[arg(long)]
        pointer: bool,
        #[command(flatten)]
        io: Io,
    },
    /// Merge one or more JSON files into the input document
    Merge {
        /// Files to merge, in order
        #[arg(required = true)]
        files: Vec<String>,
        #[command(flatten)]
        io: Io,
    },
    /// Flatten the input into an object keyed by dotted paths
    Flatten {
        /// Keep empty objects and arrays as leaves
        #[arg(long)]
        include_empty: bool,
        #[command(flatten)]
        io: Io,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let mut options = EncodeOptions::new().html_escape(cli.html_escape);
    if let Some(unit) = cli.indent {
        options = options.indent("", unit);
    }

    match cli.command {
        Commands::Get { path, pointer, io } => {
            let doc = read_document(io.input.as_deref())?;
            let found = if pointer {
                doc.pointer(&path)
                    .map(Cow::Borrowed)
                    .with_context(|| format!("Failed to resolve pointer: {}", path))?
            } else {
                doc.path(&path)
                    .ok_or_else(|| anyhow!("Path not found: {}", path))?
            };
            write_value(io.output.as_deref(), &found, &options)?;
        }
        Commands::Set {
            path,
            value,
            pointer,
            io,
        } => {
            let mut doc = read_document(io.input.as_deref())?;
            let segments = parse_path(&path, pointer)?;
            doc.set(segments.segments(), parse_value(&value))
                .with_context(|| format!("Failed to set value at: {}", path))?;
            write_document(io.output.as_deref(), &doc, &options)?;
        }
        Commands::Delete { path, pointer, io } => {
            let mut doc = read_document(io.input.as_deref())?;
            let segments = parse_path(&path, pointer)?;
            let removed = doc
                .delete(segments.segments())
                .with_context(|| format!("Failed to delete value at: {}", path))?;
            debug!(path = %path, removed = %removed, "deleted");
            write_document(io.output.as_deref(), &doc, &options)?;
        }
        Commands::Merge { files, io } => {
            let mut doc = read_document(io.input.as_deref())?;
            for file in &files {
                let raw = read_input(Some(file.as_str()))?;
                let other = Document::parse_str(&raw)
                    .with_context(|| format!("Failed to parse JSON from: {}", file))?;
                doc.merge(other);
                debug!(file = %file, "merged");
            }
            write_document(io.output.as_deref(), &doc, &options)?;
        }
        Commands::Flatten { include_empty, io } => {
            let doc = read_document(io.input.as_deref())?;
            let flat = doc
                .flatten(include_empty)
                .context("Failed to flatten document")?;
            write_value(io.output.as_deref(), &Value::Object(flat), &options)?;
        }
    }

    Ok(())
}

fn parse_path(raw: &str, pointer: bool) -> Result<Path> {
    if pointer {
        Path::parse_pointer(raw).with_context(|| format!("Invalid JSON pointer: {}", raw))
    } else {
        Ok(Path::parse_dot(raw))
    }
}

/// `set` values are JSON when they parse as JSON, plain strings otherwise,
/// so `arbor set name Alice` works without shell-quoting the quotes.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn read_document(path: Option<&str>) -> Result<Document> {
    let raw = read_input(path)?;
    Document::parse_str(&raw).context("Failed to parse input JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_document(path: Option<&str>, doc: &Document, options: &EncodeOptions) -> Result<()> {
    write_value(path, doc.root().unwrap_or(&Value::Null), options)
}

fn write_value(path: Option<&str>, value: &Value, options: &EncodeOptions) -> Result<()> {
    let mut content =
        arbor_core::encode_string(value, options).context("Failed to encode output JSON")?;
    content.push('\n');
    write_output(path, &content)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
            info!(path, bytes = content.len(), "wrote output");
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
