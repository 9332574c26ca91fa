//! Document loader.
//!
//! Parses JSON palette source into a [`Palette`]. Object key order is kept
//! (`serde_json` is built with `preserve_order`), so the tree iterates in the
//! same order the document was written.

use crate::tree::{Entry, Table};
use crate::LoadError;
use serde_json::{Map, Value};
use std::path::Path;

/// Top-level key holding the node classes in a palette document.
pub const DEFAULT_ROOT: &str = "Node";

/// A loaded palette: the node classes found under the root section.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub root: String,
    pub classes: Table,
}

impl Palette {
    /// Parse JSON source and select the `root` section.
    pub fn parse(source: &str, root: &str) -> Result<Palette, LoadError> {
        let document: Value = serde_json::from_str(source).map_err(syntax_error)?;

        let section = document.get(root).ok_or_else(|| LoadError::MissingRoot {
            root: root.to_string(),
        })?;

        // Paths in diagnostics start at the node class, like generated keys.
        let Value::Object(map) = section else {
            return Err(LoadError::NotATable {
                path: root.to_string(),
            });
        };
        let classes = convert_object(map, &mut Vec::new())?;

        Ok(Palette {
            root: root.to_string(),
            classes,
        })
    }

    /// Read a palette document from disk.
    pub fn load(path: impl AsRef<Path>, root: &str) -> Result<Palette, LoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source, root)
    }

    /// Total number of leaf values across all node classes.
    pub fn leaf_count(&self) -> usize {
        self.classes.leaf_count()
    }
}

fn syntax_error(e: serde_json::Error) -> LoadError {
    let mut message = e.to_string();
    // serde_json appends the position; it is reported separately.
    if let Some(at) = message.rfind(" at line ") {
        message.truncate(at);
    }
    LoadError::Syntax {
        message,
        line: e.line(),
        column: e.column(),
    }
}

fn convert(value: &Value, path: &mut Vec<String>) -> Result<Entry, LoadError> {
    match value {
        Value::String(s) => Ok(Entry::Leaf(s.clone())),
        Value::Number(n) => Ok(Entry::Leaf(n.to_string())),
        Value::Object(map) => convert_object(map, path).map(Entry::Table),
        Value::Bool(_) => Err(unsupported(path, "boolean")),
        Value::Null => Err(unsupported(path, "null")),
        Value::Array(_) => Err(unsupported(path, "array")),
    }
}

fn convert_object(map: &Map<String, Value>, path: &mut Vec<String>) -> Result<Table, LoadError> {
    let mut entries = Vec::with_capacity(map.len());
    for (key, child) in map {
        path.push(key.clone());
        let entry = convert(child, path)?;
        path.pop();
        entries.push((key.clone(), entry));
    }
    // serde_json has already collapsed duplicate keys.
    Ok(Table::from_unique(entries))
}

fn unsupported(path: &[String], kind: &'static str) -> LoadError {
    LoadError::UnsupportedValue {
        path: path.join("."),
        kind,
    }
}
