//! Line storage.
//!
//! [`LineStore`] ingests a byte stream once and holds it as an indexable
//! sequence of [`Line`]s. Reads never fail: out-of-range rows read as empty.
//! The mutation primitives are contract-checked and panic on out-of-range
//! positions, since every correct caller derives them from
//! [`LineStore::line_count`] and [`LineStore::rune_count`].

pub mod line;
pub mod runes;

pub use line::Line;
pub use runes::{rune_count, rune_to_byte, Runes};

use crate::model::error::InputError;
use crate::model::Position;
use crate::parser::ParseResult;
use std::io::{BufRead, BufReader, Read};
use tracing::debug;

/// Initial line capacity before the bytes-per-line estimate is available.
const INITIAL_CAPACITY: usize = 1000;
/// Lines read before storage is re-sized from the observed line length.
const RESIZE_AFTER_LINES: usize = 1000;
/// Extra lines reserved on top of the estimate.
const CAPACITY_HEADROOM: usize = 10_000;

/// Terminator style of a loaded stream.
///
/// Detected from the first terminator seen during a load and fixed for the
/// lifetime of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// No terminator was seen (single-line or empty input).
    #[default]
    None,
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Terminator written between lines when rendering.
    ///
    /// `None` renders as `\n`; it can only join a single line anyway.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::None | LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Short label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            LineEnding::None => "none",
            LineEnding::Lf => "LF",
            LineEnding::CrLf => "CRLF",
        }
    }
}

/// Ordered, indexable sequence of lines plus the detected line ending.
#[derive(Debug, Clone, Default)]
pub struct LineStore {
    lines: Vec<Line>,
    line_ending: LineEnding,
}

impl LineStore {
    /// Read `reader` to completion, splitting on `\n`.
    ///
    /// `size_hint` is the expected stream length in bytes (0 if unknown) and
    /// only affects pre-allocation. Bytes after the last terminator form the
    /// final line, so a stream ending in a terminator yields a trailing empty
    /// line and an empty stream yields one empty line.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if reading fails. Nothing partial is returned.
    pub fn load<R: Read>(reader: R, size_hint: u64) -> Result<Self, InputError> {
        let mut reader = BufReader::new(reader);
        let mut lines: Vec<Line> = Vec::with_capacity(INITIAL_CAPACITY);
        let mut line_ending = LineEnding::None;
        let mut loaded_bytes: u64 = 0;
        let mut resized = false;

        loop {
            let mut data = Vec::new();
            let read = reader.read_until(b'\n', &mut data)?;

            let terminated = data.last() == Some(&b'\n');
            if terminated {
                data.pop();
                let crlf = data.last() == Some(&b'\r');
                if crlf {
                    data.pop();
                }
                if line_ending == LineEnding::None {
                    line_ending = if crlf {
                        LineEnding::CrLf
                    } else {
                        LineEnding::Lf
                    };
                }
            }

            if !resized {
                loaded_bytes += read as u64;
                if lines.len() >= RESIZE_AFTER_LINES {
                    reserve_estimate(&mut lines, size_hint, loaded_bytes);
                    resized = true;
                }
            }

            lines.push(Line::new(data));
            if !terminated {
                break;
            }
        }

        let structured = lines
            .iter()
            .filter(|line| matches!(line.entry(), ParseResult::Structured(_)))
            .count();
        debug!(
            lines = lines.len(),
            structured,
            ?line_ending,
            "Loaded line store"
        );

        Ok(Self { lines, line_ending })
    }

    /// Build a store from in-memory bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        // Reading from a slice cannot fail.
        Self::load(data, data.len() as u64).unwrap_or_default()
    }

    /// Number of lines. Zero only for a store that was never loaded.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the store holds no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Terminator style detected at load.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Bytes of `row`, terminator excluded; empty when out of range.
    pub fn line_at(&self, row: usize) -> &[u8] {
        self.lines.get(row).map(Line::bytes).unwrap_or_default()
    }

    /// The line at `row`, if any.
    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    /// Lines in `[start_row, end_row)`, clamped to the store.
    pub fn slice(&self, start_row: usize, end_row: usize) -> &[Line] {
        let end = end_row.min(self.lines.len());
        let start = start_row.min(end);
        &self.lines[start..end]
    }

    /// Rune count of `row`; 0 when out of range.
    pub fn rune_count(&self, row: usize) -> usize {
        self.lines.get(row).map(Line::rune_count).unwrap_or(0)
    }

    /// All lines joined with the detected terminator, byte-exact.
    pub fn render_bytes(&self) -> Vec<u8> {
        let sep = self.line_ending.as_str().as_bytes();
        let total: usize = self.lines.iter().map(|l| l.bytes().len() + sep.len()).sum();
        let mut out = Vec::with_capacity(total);
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.extend_from_slice(sep);
            }
            out.extend_from_slice(line.bytes());
        }
        out
    }

    /// All lines joined with the detected terminator, as text.
    pub fn render(&self) -> String {
        String::from_utf8_lossy(&self.render_bytes()).into_owned()
    }

    // ===== Mutation primitives =====

    /// Insert `value` before the rune at `pos`.
    ///
    /// # Panics
    ///
    /// If `pos` is outside the store.
    pub fn insert_byte(&mut self, pos: Position, value: u8) {
        let offset = self.byte_offset(pos);
        self.lines[pos.row].edit().insert(offset, value);
    }

    /// Delete the first byte of the rune at `pos`.
    ///
    /// # Panics
    ///
    /// If `pos` does not name a rune (the line end included).
    pub fn delete_byte(&mut self, pos: Position) {
        assert!(
            pos.column < self.rune_count(pos.row),
            "delete_byte: column {} is past the last rune of row {}",
            pos.column,
            pos.row
        );
        let offset = self.byte_offset(pos);
        self.lines[pos.row].edit().remove(offset);
    }

    /// Delete runes `[start_column, end_column)` of `row`.
    ///
    /// # Panics
    ///
    /// If the range is reversed or outside the line.
    pub fn delete_range(&mut self, row: usize, start_column: usize, end_column: usize) {
        assert!(
            start_column <= end_column,
            "delete_range: reversed range {start_column}..{end_column}"
        );
        let start = self.byte_offset(Position::new(row, start_column));
        let end = self.byte_offset(Position::new(row, end_column));
        self.lines[row].edit().drain(start..end);
    }

    /// Delete from `pos` to the end of its line.
    ///
    /// # Panics
    ///
    /// If `pos` is outside the store.
    pub fn delete_to_end(&mut self, pos: Position) {
        let offset = self.byte_offset(pos);
        self.lines[pos.row].edit().truncate(offset);
    }

    /// Delete from the start of the line through the rune at `pos`.
    ///
    /// # Panics
    ///
    /// If `pos` does not name a rune (the line end included).
    pub fn delete_from_start(&mut self, pos: Position) {
        assert!(
            pos.column < self.rune_count(pos.row),
            "delete_from_start: column {} is past the last rune of row {}",
            pos.column,
            pos.row
        );
        let offset = self.byte_offset(Position::new(pos.row, pos.column + 1));
        self.lines[pos.row].edit().drain(..offset);
    }

    /// Remove `row` entirely.
    ///
    /// # Panics
    ///
    /// If `row` is out of range.
    pub fn delete_line(&mut self, row: usize) {
        assert!(
            row < self.lines.len(),
            "delete_line: row {row} out of range (line count {})",
            self.lines.len()
        );
        self.lines.remove(row);
    }

    /// Text between two positions, rows joined with `\n`.
    ///
    /// # Panics
    ///
    /// If either position is outside the store or `end` precedes `start`.
    pub fn substr(&self, start: Position, end: Position) -> String {
        assert!(start <= end, "substr: end {end:?} precedes start {start:?}");
        let start_offset = self.byte_offset(start);
        let end_offset = self.byte_offset(end);

        if start.row == end.row {
            let data = self.lines[start.row].bytes();
            return String::from_utf8_lossy(&data[start_offset..end_offset]).into_owned();
        }

        let mut out = Vec::new();
        out.extend_from_slice(&self.lines[start.row].bytes()[start_offset..]);
        out.push(b'\n');
        for line in &self.lines[start.row + 1..end.row] {
            out.extend_from_slice(line.bytes());
            out.push(b'\n');
        }
        out.extend_from_slice(&self.lines[end.row].bytes()[..end_offset]);
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Byte offset of `pos` within its line, enforcing the position contract.
    fn byte_offset(&self, pos: Position) -> usize {
        let line = self.lines.get(pos.row).unwrap_or_else(|| {
            panic!(
                "row {} out of range (line count {})",
                pos.row,
                self.lines.len()
            )
        });
        rune_to_byte(line.bytes(), pos.column).unwrap_or_else(|| {
            panic!(
                "column {} out of range for row {} ({} runes)",
                pos.column,
                pos.row,
                line.rune_count()
            )
        })
    }
}

/// Reserve storage for the whole stream from the bytes-per-line seen so far.
fn reserve_estimate(lines: &mut Vec<Line>, size_hint: u64, loaded_bytes: u64) {
    if size_hint == 0 || loaded_bytes == 0 {
        return;
    }
    let estimated = (size_hint as f64 * (lines.len() as f64 / loaded_bytes as f64)) as u64;
    // A stream cannot hold more lines than bytes.
    let estimated = estimated.min(size_hint.saturating_add(1));
    let Ok(estimated) = usize::try_from(estimated) else {
        return;
    };
    let wanted = estimated.saturating_add(CAPACITY_HEADROOM);
    lines.reserve(wanted.saturating_sub(lines.len()));
    debug!(estimated, "Re-sized line storage from observed line length");
}

#[cfg(test)]
#[path = "line_store_tests.rs"]
mod tests;
