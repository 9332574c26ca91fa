//! Palette flattener.
//!
//! Walks the validated tree depth-first, accumulating the path of names from
//! the node class down to each leaf. Every leaf becomes one [`Declaration`]
//! whose key is the lowercased, hyphen-joined path. A final `Static` state is
//! dropped from the key, so `Fill.Static` and `Fill.On` become `--x-fill` and
//! `--x-fill-on`.

use crate::CssError;
use palette_doc::{Entry, Palette, Schema, Table};
use std::collections::hash_map::{self, HashMap};
use std::fmt;

/// State name omitted from generated keys.
pub const STATIC_STATE: &str = "Static";

/// One `--key: value;` custom-property declaration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Declaration {
    /// Custom property name, including the leading `--`.
    pub key: String,
    pub value: String,
    /// Names traversed to reach the value, starting with the node class.
    pub path: Vec<String>,
}

impl Declaration {
    fn from_path(path: &[String], value: &str) -> Self {
        let segments = match path.split_last() {
            Some((last, rest)) if last == STATIC_STATE && !rest.is_empty() => rest,
            _ => path,
        };
        Self {
            key: format!("--{}", segments.join("-")).to_lowercase(),
            value: value.to_string(),
            path: path.to_vec(),
        }
    }

    /// The source path joined with `.`, as used in diagnostics.
    pub fn source(&self) -> String {
        self.path.join(".")
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {};", self.key, self.value)
    }
}

/// What to do when two paths produce the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Emit every declaration; the later one wins when the stylesheet is read.
    #[default]
    Lenient,
    /// Fail the conversion.
    Strict,
}

/// Two distinct paths that generate the same custom property.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Duplicate custom property `{key}` generated by `{first}` and `{second}`")]
pub struct Collision {
    pub key: String,
    pub first: String,
    pub second: String,
}

/// Every repeated key, reported against its first occurrence.
pub fn find_collisions(declarations: &[Declaration]) -> Vec<Collision> {
    let mut seen: HashMap<&str, &Declaration> = HashMap::new();
    let mut collisions = Vec::new();

    for decl in declarations {
        match seen.entry(decl.key.as_str()) {
            hash_map::Entry::Occupied(first) => collisions.push(Collision {
                key: decl.key.clone(),
                first: first.get().source(),
                second: decl.source(),
            }),
            hash_map::Entry::Vacant(slot) => {
                slot.insert(decl);
            }
        }
    }

    collisions
}

/// Converts palettes into declarations.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    schema: Schema,
    collisions: CollisionPolicy,
}

impl Flattener {
    pub fn new(schema: Schema, collisions: CollisionPolicy) -> Self {
        Self { schema, collisions }
    }

    /// Default schema, failing on key collisions.
    pub fn strict() -> Self {
        Self::new(Schema::default(), CollisionPolicy::Strict)
    }

    /// Flatten the property table of a single node class.
    pub fn flatten_class(
        &self,
        class: &str,
        properties: &Table,
    ) -> Result<Vec<Declaration>, CssError> {
        self.schema.validate_class(class, properties)?;

        let mut out = Vec::with_capacity(properties.leaf_count());
        let mut path = vec![class.to_string()];
        walk(properties, &mut path, &mut out);

        self.enforce(&out)?;
        Ok(out)
    }

    /// Flatten every node class in document order.
    pub fn flatten(&self, palette: &Palette) -> Result<Vec<Declaration>, CssError> {
        self.schema.validate(palette)?;

        let mut out = Vec::with_capacity(palette.leaf_count());
        let mut path = Vec::new();
        walk(&palette.classes, &mut path, &mut out);

        self.enforce(&out)?;
        Ok(out)
    }

    fn enforce(&self, declarations: &[Declaration]) -> Result<(), CssError> {
        if self.collisions == CollisionPolicy::Strict {
            if let Some(collision) = find_collisions(declarations).into_iter().next() {
                return Err(collision.into());
            }
        }
        Ok(())
    }
}

fn walk(table: &Table, path: &mut Vec<String>, out: &mut Vec<Declaration>) {
    for (name, entry) in table.iter() {
        path.push(name.to_string());
        match entry {
            Entry::Leaf(value) => out.push(Declaration::from_path(path, value)),
            Entry::Table(child) => walk(child, path, out),
        }
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn states(pairs: &[(&str, &str)]) -> Table {
        pairs
            .iter()
            .fold(Table::new(), |table, (k, v)| table.with(*k, *v))
    }

    fn pairs(declarations: &[Declaration]) -> Vec<(&str, &str)> {
        declarations
            .iter()
            .map(|d| (d.key.as_str(), d.value.as_str()))
            .collect()
    }

    fn sample_class() -> Table {
        Table::new()
            .with("Fill", states(&[("Static", "#FF0054"), ("On", "#F30049")]))
            .with(
                "Stroke",
                states(&[("Static", "#B0001F"), ("Off", "#ED7285"), ("On", "#8E0008")]),
            )
            .with("Trend", Table::new().with("Stroke", states(&[("Static", "#FF0054")])))
            .with(
                "Timeline",
                Table::new()
                    .with("Fill", states(&[("Static", "#ED7285"), ("Off", "#FFFFFF")]))
                    .with("Text", states(&[("Static", "#8E0008")])),
            )
    }

    // =========================================================================
    // Plain properties
    // =========================================================================

    #[test]
    fn test_plain_property() {
        let class = Table::new().with("Fill", states(&[("Static", "#FF0054"), ("On", "#F30049")]));
        let out = Flattener::default().flatten_class("Node", &class).unwrap();
        assert_eq!(
            pairs(&out),
            vec![("--node-fill", "#FF0054"), ("--node-fill-on", "#F30049")]
        );
    }

    #[test]
    fn test_rendered_lines() {
        let class = Table::new().with("Fill", states(&[("Static", "#FF0054"), ("On", "#F30049")]));
        let out = Flattener::default().flatten_class("Node", &class).unwrap();
        let lines: Vec<String> = out.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec!["  --node-fill: #FF0054;", "  --node-fill-on: #F30049;"]
        );
    }

    #[test]
    fn test_non_static_states_are_kept() {
        let class = Table::new().with("Stroke", states(&[("Off", "#1"), ("On", "#2")]));
        let out = Flattener::default().flatten_class("Tip", &class).unwrap();
        assert_eq!(
            pairs(&out),
            vec![("--tip-stroke-off", "#1"), ("--tip-stroke-on", "#2")]
        );
    }

    #[test]
    fn test_values_keep_case() {
        let class = Table::new().with("Font", states(&[("Static", "Helvetica Neue")]));
        let out = Flattener::default().flatten_class("Label", &class).unwrap();
        assert_eq!(pairs(&out), vec![("--label-font", "Helvetica Neue")]);
    }

    // =========================================================================
    // Compound properties
    // =========================================================================

    #[test]
    fn test_compound_property() {
        let class = Table::new().with("Trend", Table::new().with("Stroke", states(&[("Static", "#FF0054")])));
        let out = Flattener::default().flatten_class("Node", &class).unwrap();
        assert_eq!(pairs(&out), vec![("--node-trend-stroke", "#FF0054")]);
        assert_eq!(out[0].to_string(), "  --node-trend-stroke: #FF0054;");
    }

    #[test]
    fn test_compound_with_state() {
        let class = Table::new().with(
            "Mutation",
            Table::new().with("Text", states(&[("Static", "#1"), ("On", "#2")])),
        );
        let out = Flattener::default().flatten_class("Node", &class).unwrap();
        assert_eq!(
            pairs(&out),
            vec![("--node-mutation-text", "#1"), ("--node-mutation-text-on", "#2")]
        );
    }

    #[test]
    fn test_compound_shape_rejected_for_plain_property() {
        let class = Table::new().with("Halo", Table::new().with("Stroke", states(&[("Static", "#1")])));
        let err = Flattener::default().flatten_class("Node", &class).unwrap_err();
        assert!(matches!(err, CssError::Schema(ref e) if e.path == "Node.Halo.Stroke"));
    }

    #[test]
    fn test_custom_schema_changes_depth() {
        let class = Table::new().with("Halo", Table::new().with("Stroke", states(&[("Static", "#1")])));
        let flattener = Flattener::new(Schema::new(["Halo"]), CollisionPolicy::Lenient);
        let out = flattener.flatten_class("Node", &class).unwrap();
        assert_eq!(pairs(&out), vec![("--node-halo-stroke", "#1")]);
    }

    // =========================================================================
    // Order, counts and key shape
    // =========================================================================

    #[test]
    fn test_order_matches_input() {
        let out = Flattener::default().flatten_class("Node", &sample_class()).unwrap();
        let keys: Vec<&str> = out.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "--node-fill",
                "--node-fill-on",
                "--node-stroke",
                "--node-stroke-off",
                "--node-stroke-on",
                "--node-trend-stroke",
                "--node-timeline-fill",
                "--node-timeline-fill-off",
                "--node-timeline-text",
            ]
        );
    }

    #[test]
    fn test_one_declaration_per_leaf() {
        let class = sample_class();
        let out = Flattener::default().flatten_class("Node", &class).unwrap();
        assert_eq!(out.len(), class.leaf_count());
    }

    #[test]
    fn test_key_segment_counts() {
        let schema = Schema::default();
        let out = Flattener::default().flatten_class("Node", &sample_class()).unwrap();
        for decl in &out {
            let segments = decl.key.trim_start_matches("--").split('-').count();
            let is_static = decl.path.last().map(String::as_str) == Some(STATIC_STATE);
            let expected = match (schema.is_compound(&decl.path[1]), is_static) {
                (true, true) => 3,
                (true, false) => 4,
                (false, true) => 2,
                (false, false) => 3,
            };
            assert_eq!(segments, expected, "key {}", decl.key);
        }
    }

    #[test]
    fn test_static_never_in_key() {
        let out = Flattener::default().flatten_class("Node", &sample_class()).unwrap();
        for decl in out.iter().filter(|d| d.path.last().map(String::as_str) == Some(STATIC_STATE)) {
            assert!(!decl.key.contains("static"), "key {}", decl.key);
        }
    }

    #[test]
    fn test_flatten_is_repeatable() {
        let flattener = Flattener::default();
        let class = sample_class();
        assert_eq!(
            flattener.flatten_class("Node", &class).unwrap(),
            flattener.flatten_class("Node", &class).unwrap()
        );
    }

    #[test]
    fn test_path_is_recorded() {
        let out = Flattener::default().flatten_class("Node", &sample_class()).unwrap();
        assert_eq!(out[5].source(), "Node.Trend.Stroke.Static");
    }

    // =========================================================================
    // Whole palettes
    // =========================================================================

    #[test]
    fn test_flatten_palette_classes_in_order() {
        let palette = Palette {
            root: "Node".into(),
            classes: Table::new()
                .with("Tip", Table::new().with("Fill", states(&[("Static", "#1")])))
                .with("Inner", Table::new().with("Fill", states(&[("On", "#2")]))),
        };
        let out = Flattener::default().flatten(&palette).unwrap();
        assert_eq!(pairs(&out), vec![("--tip-fill", "#1"), ("--inner-fill-on", "#2")]);
    }

    #[test]
    fn test_strict_rejects_collision_across_classes() {
        let palette = Palette {
            root: "Node".into(),
            classes: Table::new()
                .with("A-B", Table::new().with("C", states(&[("Static", "#1")])))
                .with("A", Table::new().with("B-C", states(&[("Static", "#2")]))),
        };
        for (name, entry) in palette.classes.iter() {
            let properties = entry.as_table().unwrap();
            assert!(Flattener::strict().flatten_class(name, properties).is_ok());
        }

        let err = Flattener::strict().flatten(&palette).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Duplicate custom property `--a-b-c` generated by `A-B.C.Static` and `A.B-C.Static`"
        );
    }

    #[test]
    fn test_empty_palette() {
        let palette = Palette {
            root: "Node".into(),
            classes: Table::new(),
        };
        assert!(Flattener::default().flatten(&palette).unwrap().is_empty());
    }

    // =========================================================================
    // Collisions
    // =========================================================================

    fn colliding_class() -> Table {
        Table::new()
            .with("Fill", states(&[("Static", "#1")]))
            .with("FILL", states(&[("Static", "#2")]))
    }

    #[test]
    fn test_find_collisions() {
        let out = Flattener::default().flatten_class("Node", &colliding_class()).unwrap();
        assert_eq!(
            find_collisions(&out),
            vec![Collision {
                key: "--node-fill".into(),
                first: "Node.Fill.Static".into(),
                second: "Node.FILL.Static".into(),
            }]
        );
    }

    #[test]
    fn test_lenient_keeps_both() {
        let out = Flattener::default().flatten_class("Node", &colliding_class()).unwrap();
        assert_eq!(pairs(&out), vec![("--node-fill", "#1"), ("--node-fill", "#2")]);
    }

    #[test]
    fn test_strict_rejects() {
        let err = Flattener::strict()
            .flatten_class("Node", &colliding_class())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Duplicate custom property `--node-fill` generated by `Node.Fill.Static` and `Node.FILL.Static`"
        );
    }

    #[test]
    fn test_no_collisions() {
        let out = Flattener::strict().flatten_class("Node", &sample_class()).unwrap();
        assert!(find_collisions(&out).is_empty());
    }
}
