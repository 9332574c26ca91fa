//! Palette → CSS custom properties
//!
//! Flattens a loaded palette into `--class-property[-sub][-state]: value;`
//! declarations and writes them as a stylesheet body fragment. Wrapping the
//! fragment in a selector block is left to the consumer.
//!
//! ```text
//! Config → Palette::load() → Flattener::flatten() → Vec<Declaration> → write_stylesheet()
//! ```

pub mod emit;
pub mod flatten;

pub use emit::{render, write_declarations, write_stylesheet};
pub use flatten::{find_collisions, Collision, CollisionPolicy, Declaration, Flattener};

use palette_doc::{LoadError, Palette, Schema, SchemaError, DEFAULT_ROOT};
use std::path::PathBuf;

/// Input document read when no path is given.
pub const DEFAULT_INPUT: &str = "input/palette.json";
/// Stylesheet written when no path is given.
pub const DEFAULT_OUTPUT: &str = "output/palette.css";

/// Conversion error.
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Collision(#[from] Collision),

    #[error("Error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything a conversion run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub root: String,
    pub schema: Schema,
    pub collisions: CollisionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            root: DEFAULT_ROOT.to_string(),
            schema: Schema::default(),
            collisions: CollisionPolicy::default(),
        }
    }
}

impl Config {
    pub fn flattener(&self) -> Flattener {
        Flattener::new(self.schema.clone(), self.collisions)
    }
}

/// The result of flattening a palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub declarations: Vec<Declaration>,
    /// Key collisions tolerated under [`CollisionPolicy::Lenient`].
    pub collisions: Vec<Collision>,
}

impl Conversion {
    fn from_palette(palette: &Palette, flattener: &Flattener) -> Result<Self, CssError> {
        let declarations = flattener.flatten(palette)?;
        let collisions = find_collisions(&declarations);
        Ok(Self {
            declarations,
            collisions,
        })
    }

    /// The stylesheet fragment, one declaration per line.
    pub fn css(&self) -> String {
        render(&self.declarations)
    }
}

/// Flatten palette JSON source using the root, schema and policy in `config`.
/// The input and output paths are ignored.
pub fn compile(source: &str, config: &Config) -> Result<Conversion, CssError> {
    let palette = Palette::parse(source, &config.root)?;
    Conversion::from_palette(&palette, &config.flattener())
}

/// Load and flatten `config.input` without writing anything.
pub fn check(config: &Config) -> Result<Conversion, CssError> {
    let palette = Palette::load(&config.input, &config.root)?;
    Conversion::from_palette(&palette, &config.flattener())
}

/// Load `config.input`, flatten it, and write the stylesheet to `config.output`.
pub fn convert(config: &Config) -> Result<Conversion, CssError> {
    let conversion = check(config)?;
    write_stylesheet(&config.output, &conversion.declarations)?;
    Ok(conversion)
}
