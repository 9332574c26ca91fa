//! Palette shape validation.
//!
//! A palette is `class → property → state → leaf`, except for the compound
//! properties, which nest one extra sub-property level:
//! `class → property → sub-property → state → leaf`.
//!
//! Validation runs before flattening so that a malformed document fails with
//! the path of the offending entry instead of producing partial output.

use crate::loader::Palette;
use crate::tree::{Entry, Table};
use crate::SchemaError;

/// Properties that nest a sub-property table beneath them.
pub const COMPOUND_PROPERTIES: &[&str] = &["Position", "Mutation", "Trend", "Timeline"];

/// The expected palette shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    compound: Vec<String>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(COMPOUND_PROPERTIES.iter().copied())
    }
}

impl Schema {
    /// Create a schema with a custom set of compound property names.
    pub fn new<I, S>(compound: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            compound: compound.into_iter().map(Into::into).collect(),
        }
    }

    /// Property names are matched case-sensitively.
    pub fn is_compound(&self, property: &str) -> bool {
        self.compound.iter().any(|p| p == property)
    }

    pub fn compound_properties(&self) -> impl Iterator<Item = &str> {
        self.compound.iter().map(String::as_str)
    }

    /// Validate every node class in the palette.
    pub fn validate(&self, palette: &Palette) -> Result<(), SchemaError> {
        for (class, entry) in palette.classes.iter() {
            let properties = entry
                .as_table()
                .ok_or_else(|| SchemaError::new(&[class], "node class must be a table of properties"))?;
            self.validate_class(class, properties)?;
        }
        Ok(())
    }

    /// Validate the property table of one node class.
    pub fn validate_class(&self, class: &str, properties: &Table) -> Result<(), SchemaError> {
        for (property, entry) in properties.iter() {
            let Some(body) = entry.as_table() else {
                return Err(SchemaError::new(
                    &[class, property],
                    "property must be a table, found a leaf value",
                ));
            };

            if self.is_compound(property) {
                for (sub, sub_entry) in body.iter() {
                    let Some(states) = sub_entry.as_table() else {
                        return Err(SchemaError::new(
                            &[class, property, sub],
                            format!("compound property `{property}` expects sub-property tables"),
                        ));
                    };
                    check_states(&[class, property, sub], states)?;
                }
            } else {
                check_states(&[class, property], body)?;
            }
        }
        Ok(())
    }
}

fn check_states(path: &[&str], states: &Table) -> Result<(), SchemaError> {
    for (state, entry) in states.iter() {
        if let Entry::Table(_) = entry {
            let mut full = path.to_vec();
            full.push(state);
            return Err(SchemaError::new(
                &full,
                "expected a leaf value, found a table",
            ));
        }
    }
    Ok(())
}
