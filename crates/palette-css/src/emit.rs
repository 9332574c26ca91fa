//! Stylesheet output.
//!
//! Renders declarations as an indented body fragment, one per line, and
//! writes it to a file (the text sink) or any other writer.

use crate::flatten::Declaration;
use crate::CssError;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Render declarations as text, each line terminated by `\n`.
pub fn render(declarations: &[Declaration]) -> String {
    let mut css = String::new();
    for decl in declarations {
        css.push_str(&decl.to_string());
        css.push('\n');
    }
    css
}

/// Write one line per declaration.
pub fn write_declarations<W: Write>(out: &mut W, declarations: &[Declaration]) -> io::Result<()> {
    for decl in declarations {
        writeln!(out, "{decl}")?;
    }
    out.flush()
}

/// Create the parent directory if needed, then replace `path` with the
/// rendered declarations.
///
/// The stylesheet is written to a temporary file next to `path` and renamed
/// into place, so a failed write never leaves a truncated stylesheet behind.
pub fn write_stylesheet(path: &Path, declarations: &[Declaration]) -> Result<(), CssError> {
    let io_error = |source: io::Error| CssError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent().filter(|d| !d.as_os_str().is_empty()) {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(io_error)?;
            dir
        }
        None => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(io_error)?;
    {
        let mut out = BufWriter::new(staged.as_file_mut());
        write_declarations(&mut out, declarations).map_err(io_error)?;
    }
    staged.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}
