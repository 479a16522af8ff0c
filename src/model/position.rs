//! Rune-granularity location within the line store.

/// A zero-based location: `row` is a line index, `column` a rune index.
///
/// For a position inside the store, `row < line_count` and
/// `column <= rune_count(row)` (one past the last rune is the line end).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line index.
    pub row: usize,
    /// Rune index within the line.
    pub column: usize,
}

impl Position {
    /// Create a position from a row and a column.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Start of the given row.
    pub const fn line_start(row: usize) -> Self {
        Self { row, column: 0 }
    }
}
