//! Scroll and cursor state for the text area.
//!
//! The viewport never holds a reference to the store; every operation that
//! needs bounds takes the current `line_count`. All operations are O(1).

use std::ops::Range;

/// Window into the store plus the cursor row.
///
/// Invariants maintained by every operation:
/// - `cursor_row < max(line_count, 1)`
/// - when `line_count >= height`, `top_row <= cursor_row <= top_row + height - 1`
///   after [`relocate`](Self::relocate) or [`scroll_by`](Self::scroll_by)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    top_row: usize,
    left_column: usize,
    cursor_row: usize,
    height: usize,
    width: usize,
    scroll_margin: usize,
}

impl Viewport {
    /// New viewport at the top-left of the store.
    pub fn new(width: usize, height: usize, scroll_margin: usize) -> Self {
        Self {
            top_row: 0,
            left_column: 0,
            cursor_row: 0,
            height,
            width,
            scroll_margin,
        }
    }

    /// First store row shown.
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    /// First display column shown.
    pub fn left_column(&self) -> usize {
        self.left_column
    }

    /// Row the cursor is on.
    pub fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    /// Rows in the text area.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Columns in the text area.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows kept between the cursor and the window edge, away from buffer edges.
    pub fn scroll_margin(&self) -> usize {
        self.scroll_margin
    }

    /// Store rows currently inside the window.
    pub fn visible_rows(&self, line_count: usize) -> Range<usize> {
        let end = self.top_row.saturating_add(self.height).min(line_count);
        self.top_row.min(end)..end
    }

    /// Change the text area size. The caller relocates afterwards.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Place the cursor on `row`, clamped to the store.
    pub fn set_cursor_row(&mut self, row: usize, line_count: usize) {
        self.cursor_row = row.min(line_count.saturating_sub(1));
    }

    /// Move the cursor by `delta` rows, clamped to `[0, line_count - 1]`.
    ///
    /// Returns whether the cursor moved.
    pub fn move_cursor(&mut self, delta: isize, line_count: usize) -> bool {
        let before = self.cursor_row;
        let last = line_count.saturating_sub(1);
        self.cursor_row = if delta < 0 {
            self.cursor_row.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor_row.saturating_add(delta.unsigned_abs()).min(last)
        };
        self.cursor_row != before
    }

    /// Move the cursor up one page.
    pub fn page_up(&mut self, line_count: usize) -> bool {
        self.move_cursor(-(self.height as isize), line_count)
    }

    /// Move the cursor down one page.
    pub fn page_down(&mut self, line_count: usize) -> bool {
        self.move_cursor(self.height as isize, line_count)
    }

    /// Move the cursor to the first row.
    pub fn go_to_top(&mut self) -> bool {
        let moved = self.cursor_row != 0;
        self.cursor_row = 0;
        moved
    }

    /// Move the cursor to the last row.
    pub fn go_to_bottom(&mut self, line_count: usize) -> bool {
        let last = line_count.saturating_sub(1);
        let moved = self.cursor_row != last;
        self.cursor_row = last;
        moved
    }

    /// Move the cursor to 1-based line `line`.
    ///
    /// Fails without moving when the line does not exist.
    pub fn jump_to_line(&mut self, line: usize, line_count: usize) -> bool {
        match line.checked_sub(1) {
            Some(row) if row < line_count => {
                self.cursor_row = row;
                true
            }
            _ => false,
        }
    }

    /// Scroll the window by `n` rows.
    ///
    /// When the jump would leave `[0, line_count - height]`, the window moves
    /// a single row toward that bound instead. The cursor is pulled into the
    /// window so it stays visible. Returns whether `top_row` changed.
    pub fn scroll_by(&mut self, n: isize, line_count: usize) -> bool {
        let before = self.top_row;
        let max_top = line_count.saturating_sub(self.height);
        let target = self.top_row as isize + n;

        if (0..=max_top as isize).contains(&target) {
            self.top_row = target as usize;
        } else if n > 0 && self.top_row < max_top {
            self.top_row += 1;
        } else if n < 0 && self.top_row > 0 {
            self.top_row -= 1;
        }

        if self.height > 0 && line_count > 0 {
            let last_visible = (self.top_row + self.height).min(line_count) - 1;
            self.cursor_row = self.cursor_row.max(self.top_row).min(last_visible);
        }

        self.top_row != before
    }

    /// Scroll horizontally left by `n` columns.
    pub fn scroll_left(&mut self, n: usize) -> bool {
        let before = self.left_column;
        self.left_column = self.left_column.saturating_sub(n);
        self.left_column != before
    }

    /// Scroll horizontally right by `n` columns.
    ///
    /// `content_width` is the widest visible line; the window does not scroll
    /// further than needed to show its last column.
    pub fn scroll_right(&mut self, n: usize, content_width: usize) -> bool {
        let before = self.left_column;
        let max_left = content_width.saturating_sub(self.width).max(self.left_column);
        self.left_column = self.left_column.saturating_add(n).min(max_left);
        self.left_column != before
    }

    /// Adjust `top_row` so the cursor is visible, honoring the scroll margin.
    ///
    /// The branches run in a fixed order and later ones overwrite earlier
    /// results; for small heights or large margins their guards overlap and
    /// this order decides. A final clamp brings the cursor into the window for
    /// the cases the guards leave uncovered: overlapping guards, and the gap
    /// between the two bottom guards where the cursor sits inside the last
    /// `scroll_margin` rows but not below row `height`. Returns whether
    /// `top_row` changed.
    pub fn relocate(&mut self, line_count: usize) -> bool {
        let before = self.top_row;

        let lines = line_count as isize;
        let cursor = self.cursor_row as isize;
        let margin = self.scroll_margin as isize;
        // No soft wrap: the bottom row is always top + height.
        let height = self.height as isize;
        let mut top = self.top_row as isize;

        if cursor < top + margin && cursor > margin - 1 {
            top = cursor - margin;
        } else if cursor < top {
            top = cursor;
        }

        if cursor > top + height - 1 - margin && cursor < lines - margin {
            top = cursor - height + 1 + margin;
        } else if cursor >= lines - margin && cursor > height {
            top = lines - height;
        }

        if height > 0 && lines > 0 {
            if cursor < top {
                top = cursor;
            } else if cursor > top + height - 1 {
                top = cursor - height + 1;
            }
        }

        self.top_row = top.max(0) as usize;
        self.top_row != before
    }
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
