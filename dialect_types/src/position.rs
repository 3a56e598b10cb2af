//! Positions and ranges in editor coordinates

use core::fmt;
use serde::{Deserialize, Serialize};

/// Position in a document
///
/// `character` counts UTF-16 code units from the start of the line, which is
/// the column unit editor hosts expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextPosition {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column in UTF-16 code units (0-indexed)
    pub character: usize,
}

impl TextPosition {
    /// Creates a new position
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }

    /// Start of the given line
    pub const fn line_start(line: usize) -> Self {
        Self { line, character: 0 }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// Half-open range between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TextRange {
    /// Creates a new range
    pub const fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }

    /// Zero-width range at the start of a line
    pub const fn at_line_start(line: usize) -> Self {
        let pos = TextPosition::line_start(line);
        Self { start: pos, end: pos }
    }

    /// Returns true if start and end coincide
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the range lies on a single line
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
