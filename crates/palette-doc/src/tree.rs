//! Insertion-ordered palette tree.
//!
//! Key order is significant: it decides the order of the generated
//! declarations, so tables keep entries in the order they were read.

/// A node in the palette tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A terminal value such as a color.
    Leaf(String),
    /// A nested table of named entries.
    Table(Table),
}

impl Entry {
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Entry::Table(table) => Some(table),
            Entry::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Entry::Leaf(value) => Some(value.as_str()),
            Entry::Table(_) => None,
        }
    }

    /// Number of leaves at or beneath this entry.
    pub fn leaf_count(&self) -> usize {
        match self {
            Entry::Leaf(_) => 1,
            Entry::Table(table) => table.leaf_count(),
        }
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::Leaf(value.to_string())
    }
}

impl From<Table> for Entry {
    fn from(table: Table) -> Self {
        Entry::Table(table)
    }
}

/// An ordered mapping from names to entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    entries: Vec<(String, Entry)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Re-inserting an existing key replaces its value but
    /// keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) {
        let key = key.into();
        let entry = entry.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Build a table from entries whose keys are already distinct.
    pub(crate) fn from_unique(entries: Vec<(String, Entry)>) -> Self {
        Self { entries }
    }

    /// Builder-style [`Table::insert`].
    pub fn with(mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Self {
        self.insert(key, entry);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, entry)| (k.as_str(), entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.entries.iter().map(|(_, entry)| entry.leaf_count()).sum()
    }
}
