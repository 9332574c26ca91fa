//! Palette document model and loader.
//!
//! Reads a JSON palette document into an insertion-ordered tree, selects the
//! well-known root section, and validates the expected shape before anything
//! is flattened.
//!
//! ```text
//! JSON source → Palette::parse() → Palette { root, classes } → Schema::validate()
//! ```
//!
//! # Example
//!
//! ```
//! use palette_doc::{Palette, Schema};
//!
//! let palette = Palette::parse(r##"{"Node": {"Root": {"Fill": {"Static": "#FF0054"}}}}"##, "Node").unwrap();
//! assert_eq!(palette.leaf_count(), 1);
//! assert!(Schema::default().validate(&palette).is_ok());
//! ```

pub mod loader;
pub mod schema;
pub mod tree;

pub use loader::{Palette, DEFAULT_ROOT};
pub use schema::{Schema, COMPOUND_PROPERTIES};
pub use tree::{Entry, Table};

use std::path::PathBuf;

/// Error raised while reading or parsing a palette document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON syntax error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Missing root section `{root}`")]
    MissingRoot { root: String },

    #[error("Expected a table at `{path}`")]
    NotATable { path: String },

    #[error("Unsupported {kind} value at `{path}`: leaves must be strings or numbers")]
    UnsupportedValue { path: String, kind: &'static str },
}

/// A palette that does not have the expected class → property → state shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Schema error at `{path}`: {message}")]
pub struct SchemaError {
    pub path: String,
    pub message: String,
}

impl SchemaError {
    pub fn new(path: &[&str], message: impl Into<String>) -> Self {
        Self {
            path: path.join("."),
            message: message.into(),
        }
    }
}
