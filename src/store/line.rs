//! A single stored line.

use super::runes::{rune_count, Runes};
use crate::parser::{parse_line, ParseResult};
use std::borrow::Cow;

/// Raw bytes of one record (terminator excluded) plus its structured parse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    data: Vec<u8>,
    entry: ParseResult,
}

impl Line {
    /// Wrap raw bytes, parsing them opportunistically.
    pub fn new(data: Vec<u8>) -> Self {
        let entry = parse_line(&data);
        Self { data, entry }
    }

    /// Raw bytes of the line.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Structured parse of the line.
    pub fn entry(&self) -> &ParseResult {
        &self.entry
    }

    /// Number of runes in the line.
    pub fn rune_count(&self) -> usize {
        rune_count(&self.data)
    }

    /// Runes of the line with their byte offsets.
    pub fn runes(&self) -> Runes<'_> {
        Runes::new(&self.data)
    }

    /// Line as text, invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Mutable access to the bytes; the parse is refreshed when the guard drops.
    pub(crate) fn edit(&mut self) -> LineEdit<'_> {
        LineEdit { line: self }
    }
}

/// Scoped mutable borrow of a line's bytes.
///
/// Re-parses on drop so the structured fields never describe stale bytes.
pub(crate) struct LineEdit<'a> {
    line: &'a mut Line,
}

impl std::ops::Deref for LineEdit<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.line.data
    }
}

impl std::ops::DerefMut for LineEdit<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.line.data
    }
}

impl Drop for LineEdit<'_> {
    fn drop(&mut self) {
        self.line.entry = parse_line(&self.line.data);
    }
}
