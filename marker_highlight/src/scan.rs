//! Marker keyword scanning

use dialect_types::{TextRange, TextSnapshot};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Keyword class of a marker comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarkerClass {
    Todo,
    Fixme,
}

impl MarkerClass {
    /// All classes, in scan order
    pub const ALL: [MarkerClass; 2] = [MarkerClass::Todo, MarkerClass::Fixme];

    /// Keyword the class matches
    pub fn keyword(&self) -> &'static str {
        match self {
            MarkerClass::Todo => "TODO",
            MarkerClass::Fixme => "FIXME",
        }
    }

    /// Glyph prefixed to hover annotations
    pub fn glyph(&self) -> &'static str {
        match self {
            MarkerClass::Todo => "📝",
            MarkerClass::Fixme => "🚨",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            MarkerClass::Todo => todo_re(),
            MarkerClass::Fixme => fixme_re(),
        }
    }
}

impl fmt::Display for MarkerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

// A match runs up to the next line terminator: `\r`, `\n`, U+2028 or U+2029.
// Word boundaries are ASCII-only.
fn todo_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?-u:\b)TODO(?-u:\b)[^\r\n\x{2028}\x{2029}]*").expect("TODO regex must compile")
    })
}

fn fixme_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?-u:\b)FIXME(?-u:\b)[^\r\n\x{2028}\x{2029}]*").expect("FIXME regex must compile")
    })
}

/// One highlighted marker comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightMatch {
    pub class: MarkerClass,
    /// Byte offset of the keyword
    pub start: usize,
    /// Byte offset just past the end of the line's text
    pub end: usize,
    /// Editor range covering `start..end`
    pub range: TextRange,
    /// Hover text: glyph, a space, then the matched text
    pub annotation: String,
}

impl HighlightMatch {
    /// Length of the match in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Highlights for both marker classes from one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSet {
    todo: Vec<HighlightMatch>,
    fixme: Vec<HighlightMatch>,
}

impl HighlightSet {
    /// Matches of one class, in document order
    pub fn matches(&self, class: MarkerClass) -> &[HighlightMatch] {
        match class {
            MarkerClass::Todo => &self.todo,
            MarkerClass::Fixme => &self.fixme,
        }
    }

    /// Total number of matches across classes
    pub fn len(&self) -> usize {
        self.todo.len() + self.fixme.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todo.is_empty() && self.fixme.is_empty()
    }

    /// Iterates over all matches, TODOs first
    pub fn iter(&self) -> impl Iterator<Item = &HighlightMatch> {
        self.todo.iter().chain(self.fixme.iter())
    }
}

/// Scans a snapshot for every marker comment
///
/// Each class is matched independently over the whole text, so a line that
/// holds both keywords produces one match per class.
pub fn scan_markers(snapshot: &TextSnapshot) -> HighlightSet {
    HighlightSet {
        todo: scan_class(snapshot, MarkerClass::Todo),
        fixme: scan_class(snapshot, MarkerClass::Fixme),
    }
}

fn scan_class(snapshot: &TextSnapshot, class: MarkerClass) -> Vec<HighlightMatch> {
    class
        .pattern()
        .find_iter(snapshot.text())
        .map(|m| HighlightMatch {
            class,
            start: m.start(),
            end: m.end(),
            range: TextRange::new(snapshot.position_at(m.start()), snapshot.position_at(m.end())),
            annotation: format!("{} {}", class.glyph(), m.as_str()),
        })
        .collect()
}
