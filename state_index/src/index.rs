//! State name to declaration line index

use crate::grammar::parse_state_declaration;
use dialect_types::TextSnapshot;
use std::collections::BTreeMap;

/// Maps every declared state to its zero-based declaration line
///
/// When a name is declared more than once the last declaration wins. That
/// shadows earlier blocks silently; tests pin the behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateIndex {
    positions: BTreeMap<String, usize>,
}

impl StateIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from a snapshot
    pub fn build(snapshot: &TextSnapshot) -> Self {
        Self::from_lines(snapshot.lines())
    }

    /// Builds an index from lines in document order
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut positions = BTreeMap::new();
        for (line_number, line) in lines.into_iter().enumerate() {
            if let Some(name) = parse_state_declaration(line) {
                positions.insert(name.to_string(), line_number);
            }
        }
        Self { positions }
    }

    /// Declaration line of a state
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates `(name, line)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.positions.iter().map(|(name, line)| (name.as_str(), *line))
    }
}
