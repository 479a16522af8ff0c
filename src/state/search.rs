//! Regex search over the line store.
//!
//! Searches are directional and wrap around: a forward search that reaches
//! the last row continues from row 0 back to its anchor, and a backward
//! search does the mirror image. Only whether a row matches is used; the
//! cursor moves to the row, never to a column.
//!
//! [`SearchSession`] owns all search state (last pattern, anchor, history and
//! the live prompt) and lives next to the viewport in `AppState`.

use crate::store::LineStore;
use crate::view_state::Viewport;
use regex::bytes::{Regex, RegexBuilder};
use tracing::{debug, trace};

/// Direction of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward higher rows, wrapping to row 0.
    Forward,
    /// Toward lower rows, wrapping to the last row.
    Backward,
}

/// Compile `pattern` as a case-insensitive regex.
///
/// Returns `None` for an empty or invalid pattern.
pub fn compile(pattern: &str) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(err) => {
            debug!(pattern, error = %err, "Invalid search pattern");
            None
        }
    }
}

/// Find the first matching row in `direction` from `anchor`, wrapping once.
///
/// Forward scans `[anchor, last]` then `[0, anchor)`. Backward scans
/// `[0, anchor)` from `anchor - 1` down, then `[anchor, last]` from the last
/// row down, so the anchor row itself is tried last.
pub fn find_row(
    store: &LineStore,
    regex: &Regex,
    anchor: usize,
    direction: Direction,
) -> Option<usize> {
    let count = store.line_count();
    let anchor = anchor.min(count);
    let is_match = |row: &usize| regex.is_match(store.line_at(*row));

    match direction {
        Direction::Forward => (anchor..count).chain(0..anchor).find(is_match),
        Direction::Backward => (0..anchor).rev().chain((anchor..count).rev()).find(is_match),
    }
}

/// State of an open search prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveSearch {
    query: String,
    original_cursor_row: usize,
    /// Index into history while recalling; `history.len()` means "not recalling".
    history_index: usize,
}

impl InteractiveSearch {
    /// Query typed so far.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Cursor row when the prompt was opened.
    pub fn original_cursor_row(&self) -> usize {
        self.original_cursor_row
    }
}

/// Search state owned alongside the viewport.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    last_pattern: String,
    anchor_row: usize,
    interactive: Option<InteractiveSearch>,
    history: Vec<String>,
}

impl SearchSession {
    /// Empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently committed pattern; empty when none.
    pub fn last_pattern(&self) -> &str {
        &self.last_pattern
    }

    /// Row the most recent search started from.
    pub fn anchor_row(&self) -> usize {
        self.anchor_row
    }

    /// Committed queries, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The open prompt, if any.
    pub fn interactive(&self) -> Option<&InteractiveSearch> {
        self.interactive.as_ref()
    }

    /// Whether a prompt is open.
    pub fn is_interactive(&self) -> bool {
        self.interactive.is_some()
    }

    /// Open a prompt anchored on the row after the cursor.
    ///
    /// Returns `false` if a prompt is already open.
    pub fn begin_interactive(&mut self, viewport: &Viewport) -> bool {
        if self.interactive.is_some() {
            return false;
        }
        self.anchor_row = viewport.cursor_row() + 1;
        self.interactive = Some(InteractiveSearch {
            query: String::new(),
            original_cursor_row: viewport.cursor_row(),
            history_index: self.history.len(),
        });
        debug!(anchor = self.anchor_row, "Search prompt opened");
        true
    }

    /// Replace the live query and search forward from the anchor.
    ///
    /// Returns whether the cursor moved.
    pub fn update_query(&mut self, store: &LineStore, viewport: &mut Viewport, query: String) -> bool {
        let Some(interactive) = self.interactive.as_mut() else {
            return false;
        };
        interactive.query = query;
        self.live_search(store, viewport)
    }

    /// Append `ch` to the live query and search again.
    pub fn insert_char(&mut self, store: &LineStore, viewport: &mut Viewport, ch: char) -> bool {
        let Some(interactive) = self.interactive.as_mut() else {
            return false;
        };
        interactive.query.push(ch);
        self.live_search(store, viewport)
    }

    /// Drop the last character of the live query and search again.
    pub fn backspace(&mut self, store: &LineStore, viewport: &mut Viewport) -> bool {
        let Some(interactive) = self.interactive.as_mut() else {
            return false;
        };
        interactive.query.pop();
        self.live_search(store, viewport)
    }

    /// Recall the previous history entry into the prompt.
    pub fn history_prev(&mut self, store: &LineStore, viewport: &mut Viewport) -> bool {
        let Some(interactive) = self.interactive.as_mut() else {
            return false;
        };
        if interactive.history_index == 0 {
            return false;
        }
        interactive.history_index -= 1;
        interactive.query = self.history[interactive.history_index].clone();
        self.live_search(store, viewport);
        true
    }

    /// Recall the next history entry, or clear the prompt past the newest.
    pub fn history_next(&mut self, store: &LineStore, viewport: &mut Viewport) -> bool {
        let Some(interactive) = self.interactive.as_mut() else {
            return false;
        };
        if interactive.history_index >= self.history.len() {
            return false;
        }
        interactive.history_index += 1;
        interactive.query = self
            .history
            .get(interactive.history_index)
            .cloned()
            .unwrap_or_default();
        self.live_search(store, viewport);
        true
    }

    /// Close the prompt, committing a non-empty query as the last pattern.
    ///
    /// Returns whether a pattern was committed.
    pub fn confirm(&mut self) -> bool {
        let Some(interactive) = self.interactive.take() else {
            return false;
        };
        if interactive.query.is_empty() {
            return false;
        }
        debug!(pattern = %interactive.query, "Search committed");
        self.last_pattern = interactive.query.clone();
        self.history.push(interactive.query);
        true
    }

    /// Append `pattern` to the history unless it is already the newest entry.
    pub fn remember(&mut self, pattern: &str) {
        if !pattern.is_empty() && self.history.last().map(String::as_str) != Some(pattern) {
            self.history.push(pattern.to_string());
        }
    }

    /// Close the prompt, restoring the cursor. The last pattern is untouched.
    pub fn cancel(&mut self, line_count: usize, viewport: &mut Viewport) -> bool {
        let Some(interactive) = self.interactive.take() else {
            return false;
        };
        viewport.set_cursor_row(interactive.original_cursor_row, line_count);
        viewport.relocate(line_count);
        debug!("Search cancelled");
        true
    }

    /// One-shot search for `pattern` from the cursor.
    ///
    /// Forward starts on the row after the cursor, backward before it. On a
    /// match the cursor moves, the view relocates and `pattern` becomes the
    /// last pattern; otherwise nothing changes.
    pub fn find(
        &mut self,
        store: &LineStore,
        viewport: &mut Viewport,
        pattern: &str,
        direction: Direction,
    ) -> bool {
        let Some(regex) = compile(pattern) else {
            return false;
        };
        let anchor = match direction {
            Direction::Forward => viewport.cursor_row() + 1,
            Direction::Backward => viewport.cursor_row(),
        };
        match find_row(store, &regex, anchor, direction) {
            Some(row) => {
                trace!(pattern, row, ?direction, "Search hit");
                self.anchor_row = anchor;
                viewport.set_cursor_row(row, store.line_count());
                viewport.relocate(store.line_count());
                self.last_pattern = pattern.to_string();
                true
            }
            None => {
                debug!(pattern, ?direction, "Search found nothing");
                false
            }
        }
    }

    /// Repeat the last pattern in `direction`; no-op without one.
    pub fn repeat(&mut self, store: &LineStore, viewport: &mut Viewport, direction: Direction) -> bool {
        if self.last_pattern.is_empty() {
            return false;
        }
        let pattern = self.last_pattern.clone();
        self.find(store, viewport, &pattern, direction)
    }

    /// Forward search for the live query from the session anchor.
    fn live_search(&self, store: &LineStore, viewport: &mut Viewport) -> bool {
        let Some(interactive) = self.interactive.as_ref() else {
            return false;
        };
        let Some(regex) = compile(&interactive.query) else {
            return false;
        };
        match find_row(store, &regex, self.anchor_row, Direction::Forward) {
            Some(row) => {
                viewport.set_cursor_row(row, store.line_count());
                viewport.relocate(store.line_count());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
