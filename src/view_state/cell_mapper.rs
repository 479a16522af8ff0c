//! Mapping from stored lines to terminal cells.
//!
//! [`draw`] is a pure function of the store and a viewport rectangle. It
//! carries no state between frames, so it is re-run on every redraw and its
//! cost depends only on the rectangle, never on the size of the file.

use crate::model::Position;
use crate::parser::Severity;
use crate::store::{LineStore, Runes};
use unicode_width::UnicodeWidthChar;

/// Display style of a cell, derived from the source line's level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellStyle {
    /// Raw lines and lines without a recognized level.
    #[default]
    Normal,
    /// info-level lines.
    Good,
    /// warn-level lines.
    Warn,
    /// error-level lines.
    Error,
}

impl From<Severity> for CellStyle {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => CellStyle::Error,
            Severity::Warn => CellStyle::Warn,
            Severity::Info => CellStyle::Good,
            Severity::Debug | Severity::Unknown => CellStyle::Normal,
        }
    }
}

/// One resolved terminal slot for a single draw pass.
///
/// Carries both where it is drawn (`visual`) and which rune it came from
/// (`source`), so a click on any cell maps back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Column and row on screen, relative to the drawn rectangle.
    pub visual: Position,
    /// Rune column and line index in the store.
    pub source: Position,
    /// Glyph to draw; blank for placeholders and tab expansion.
    pub glyph: char,
    /// Style derived from the line's level.
    pub style: CellStyle,
    /// Columns the glyph occupies: 2 for the lead cell of a wide rune, else 1.
    pub width: u8,
}

/// Rectangular result of a draw pass.
///
/// Row `i` holds the cells of store row `top_row + i`. Rows are only as long
/// as their content; the caller pads to the rectangle width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGrid {
    top_row: usize,
    rows: Vec<Vec<Cell>>,
}

impl CellGrid {
    /// Store row drawn on the first grid row.
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    /// Number of drawn rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing was drawn.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of grid row `index`.
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Text of grid row `index` with wide-rune placeholders folded away.
    pub fn row_text(&self, index: usize) -> String {
        let Some(cells) = self.rows.get(index) else {
            return String::new();
        };
        let mut text = String::new();
        let mut after_wide = false;
        for cell in cells {
            if !after_wide {
                text.push(cell.glyph);
            }
            after_wide = cell.width == 2;
        }
        text
    }
}

/// Columns a rune occupies when it starts at accumulated width `column`.
fn rune_width(ch: char, column: usize, tab_size: usize) -> usize {
    if ch == '\t' {
        let tab_size = tab_size.max(1);
        return tab_size - (column % tab_size);
    }
    match ch.width() {
        Some(w) if w >= 2 => 2,
        _ => 1,
    }
}

/// Total columns `line` occupies with tabs expanded.
pub fn display_width(line: &[u8], tab_size: usize) -> usize {
    Runes::new(line).fold(0, |width, (_, ch)| width + rune_width(ch, width, tab_size))
}

/// Find where drawing starts for horizontal offset `left`.
///
/// Returns the index of the rune whose accumulated width first reaches or
/// exceeds `left`, and how many of the line's columns up to `left` that rune
/// starts behind (`left` minus the width of everything before it). Drawing
/// from that rune at visual column `-overflow` lands column `left` on screen
/// column 0. Returns `None` when the line is narrower than `left`.
pub fn locate(line: &[u8], left: usize, tab_size: usize) -> Option<(usize, usize)> {
    let mut width = 0;
    for (index, (_, ch)) in Runes::new(line).enumerate() {
        let w = rune_width(ch, width, tab_size);
        if width + w >= left {
            return Some((index, left - width));
        }
        width += w;
    }
    None
}

/// Map `height` rows from `top_row`, columns `[left, left + width)`, to cells.
///
/// Stops early when the store runs out of rows; every returned row is fully
/// populated up to `width` columns or the end of its line. A wide rune is a
/// glyph cell followed by a blank placeholder with the same source position;
/// if either edge would split it, both halves are drawn as placeholders.
pub fn draw(
    store: &LineStore,
    top_row: usize,
    height: usize,
    left: usize,
    width: usize,
    tab_size: usize,
) -> CellGrid {
    let rows = store
        .slice(top_row, top_row.saturating_add(height))
        .iter()
        .enumerate()
        .map(|(visual_row, line)| {
            let source_row = top_row + visual_row;
            let style = CellStyle::from(line.entry().severity());
            draw_row(
                line.bytes(),
                RowSpec {
                    source_row,
                    visual_row,
                    left,
                    width,
                    tab_size,
                    style,
                },
            )
        })
        .collect();

    CellGrid { top_row, rows }
}

/// Per-row drawing parameters.
struct RowSpec {
    source_row: usize,
    visual_row: usize,
    left: usize,
    width: usize,
    tab_size: usize,
    style: CellStyle,
}

fn draw_row(line: &[u8], params: RowSpec) -> Vec<Cell> {
    let Some((start, overflow)) = locate(line, params.left, params.tab_size) else {
        return Vec::new();
    };

    let width = params.width as isize;
    let mut cells = Vec::with_capacity(params.width);
    let mut visual_col = -(overflow as isize);
    let mut column = params.left - overflow;

    let mut push = |visual_col: isize, source_col: usize, glyph: char, cell_width: u8| {
        if (0..width).contains(&visual_col) {
            cells.push(Cell {
                visual: Position::new(params.visual_row, visual_col as usize),
                source: Position::new(params.source_row, source_col),
                glyph,
                style: params.style,
                width: cell_width,
            });
        }
    };

    for (source_col, (_, ch)) in Runes::new(line).enumerate().skip(start) {
        if visual_col >= width {
            break;
        }
        let w = rune_width(ch, column, params.tab_size);

        if ch == '\t' {
            for i in 0..w {
                push(visual_col + i as isize, source_col, ' ', 1);
            }
        } else if w == 2 {
            if visual_col >= 0 && visual_col + 2 <= width {
                push(visual_col, source_col, ch, 2);
                push(visual_col + 1, source_col, ' ', 1);
            } else {
                push(visual_col, source_col, ' ', 1);
                push(visual_col + 1, source_col, ' ', 1);
            }
        } else {
            let glyph = if ch.is_control() {
                char::REPLACEMENT_CHARACTER
            } else {
                ch
            };
            push(visual_col, source_col, glyph, 1);
        }

        visual_col += w as isize;
        column += w;
    }

    cells
}

#[cfg(test)]
#[path = "cell_mapper_tests.rs"]
mod tests;
