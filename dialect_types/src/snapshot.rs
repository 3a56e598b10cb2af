//! Immutable, line-indexed text snapshots

use crate::TextPosition;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Read-only copy of a document's text at one point in time
///
/// Lines are split on `\n` only; a trailing `\r` stays part of the line. A
/// text ending in `\n` therefore has an empty last line, and the empty text
/// has exactly one (empty) line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSnapshot {
    text: String,
    /// Byte offset of the first character of every line
    line_starts: Vec<usize>,
}

impl TextSnapshot {
    /// Creates a snapshot of the given text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Creates a snapshot from already-split lines
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut text = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(line.as_ref());
        }
        Self::new(text)
    }

    /// Full text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the snapshot holds no text at all
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of one line, without its `\n`
    pub fn line(&self, index: usize) -> Option<&str> {
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        Some(&self.text[start..end])
    }

    /// Iterates over all lines in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Converts a byte offset into a line/character position
    ///
    /// Offsets past the end clamp to the end of the text; offsets inside a
    /// multi-byte character round down to its first byte.
    pub fn position_at(&self, offset: usize) -> TextPosition {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = self.line_starts.partition_point(|start| *start <= offset) - 1;
        let line_start = self.line_starts[line];
        let character = self.text[line_start..offset]
            .chars()
            .map(char::len_utf16)
            .sum();

        TextPosition::new(line, character)
    }
}

impl Default for TextSnapshot {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl From<&str> for TextSnapshot {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
