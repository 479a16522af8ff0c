//! Application state and the command dispatcher.
//!
//! [`AppState`] owns the line store, the viewport and the search session.
//! Every user intent arrives as a [`Command`] and is applied by
//! [`AppState::apply`] as one sequential transition; the view layer only
//! reads the result.

use crate::model::Command;
use crate::state::search::{Direction, SearchSession};
use crate::store::LineStore;
use crate::view_state::{display_width, draw, CellGrid, Viewport};
use tracing::{debug, info};

/// Result of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// The command did what it asked for (cursor moved, match found...).
    pub succeeded: bool,
    /// Something visible changed and the screen should be redrawn.
    pub redraw: bool,
}

impl Outcome {
    fn new(succeeded: bool, redraw: bool) -> Self {
        Self { succeeded, redraw }
    }

    /// Success that changed the screen.
    fn changed() -> Self {
        Self::new(true, true)
    }

    /// Failure that changed nothing.
    fn unchanged() -> Self {
        Self::new(false, false)
    }
}

/// Application state. The single consumer of [`Command`]s.
#[derive(Debug, Clone)]
pub struct AppState {
    store: LineStore,
    /// Name shown in the status bar (file name or `[stdin]`).
    source_name: String,
    viewport: Viewport,
    search: SearchSession,
    tab_size: usize,
    /// One-shot message for the status bar, cleared by the next command.
    status: Option<String>,
    quit: bool,
}

impl AppState {
    /// Wrap a loaded store. The cursor starts on the first row.
    pub fn new(store: LineStore, source_name: impl Into<String>, viewport: Viewport, tab_size: usize) -> Self {
        let mut viewport = viewport;
        viewport.relocate(store.line_count());
        Self {
            store,
            source_name: source_name.into(),
            viewport,
            search: SearchSession::new(),
            tab_size: tab_size.max(1),
            status: None,
            quit: false,
        }
    }

    /// The loaded lines.
    pub fn store(&self) -> &LineStore {
        &self.store
    }

    /// Display name of the input.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Window and cursor.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Search state.
    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    /// Columns per tab stop.
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Pending status bar message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether [`Command::Quit`] was applied.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Cells for the current window.
    pub fn visible_cells(&self) -> CellGrid {
        draw(
            &self.store,
            self.viewport.top_row(),
            self.viewport.height(),
            self.viewport.left_column(),
            self.viewport.width(),
            self.tab_size,
        )
    }

    /// Widest visible line in display columns.
    pub fn content_width(&self) -> usize {
        let rows = self.viewport.visible_rows(self.store.line_count());
        self.store
            .slice(rows.start, rows.end)
            .iter()
            .map(|line| display_width(line.bytes(), self.tab_size))
            .max()
            .unwrap_or(0)
    }

    /// Show `message` on the status bar until the next command.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// One-shot forward search for `pattern`, as if typed and confirmed.
    ///
    /// The pattern becomes the last pattern and joins the history when it
    /// matches; otherwise the status bar reports the miss.
    pub fn search_for(&mut self, pattern: &str) -> Outcome {
        if self
            .search
            .find(&self.store, &mut self.viewport, pattern, Direction::Forward)
        {
            self.search.remember(pattern);
            Outcome::changed()
        } else {
            self.status = Some(format!("Pattern not found: {pattern}"));
            Outcome::new(false, true)
        }
    }

    /// Apply one command.
    ///
    /// While the search prompt is open only prompt edits, resizes and quit
    /// are accepted; anything else is ignored until the prompt closes.
    pub fn apply(&mut self, command: Command) -> Outcome {
        if self.search.is_interactive()
            && !command.is_prompt_edit()
            && !matches!(command, Command::Resize { .. } | Command::Quit)
        {
            debug!(?command, "Ignored while search prompt is open");
            return Outcome::unchanged();
        }

        let had_status = self.status.take().is_some();
        let mut outcome = self.dispatch(command);
        outcome.redraw |= had_status || self.status.is_some();
        outcome
    }

    fn dispatch(&mut self, command: Command) -> Outcome {
        let lines = self.store.line_count();

        match command {
            Command::CursorUp(n) => self.cursor_moved(|vp| vp.move_cursor(-(n as isize), lines)),
            Command::CursorDown(n) => self.cursor_moved(|vp| vp.move_cursor(n as isize, lines)),
            Command::PageUp => self.cursor_moved(|vp| vp.page_up(lines)),
            Command::PageDown => self.cursor_moved(|vp| vp.page_down(lines)),
            Command::GoToTop => self.cursor_moved(|vp| vp.go_to_top()),
            Command::GoToBottom => self.cursor_moved(|vp| vp.go_to_bottom(lines)),
            Command::JumpToLine(line) => {
                let outcome = self.cursor_moved(|vp| vp.jump_to_line(line, lines));
                if !outcome.succeeded {
                    self.status = Some(format!("Line {line} out of range (1-{lines})"));
                }
                outcome
            }

            Command::ScrollUp(n) => Self::changed_if(self.viewport.scroll_by(-(n as isize), lines)),
            Command::ScrollDown(n) => Self::changed_if(self.viewport.scroll_by(n as isize, lines)),
            Command::ScrollLeft(n) => Self::changed_if(self.viewport.scroll_left(n)),
            Command::ScrollRight(n) => {
                let content_width = self.content_width();
                Self::changed_if(self.viewport.scroll_right(n, content_width))
            }

            Command::BeginSearch => Outcome::new(self.search.begin_interactive(&self.viewport), true),
            Command::SearchInput(ch) => {
                let found = self.search.insert_char(&self.store, &mut self.viewport, ch);
                Outcome::new(found, true)
            }
            Command::SearchBackspace => {
                let empty = self
                    .search
                    .interactive()
                    .is_some_and(|prompt| prompt.query().is_empty());
                if empty {
                    return self.dispatch(Command::EndSearch);
                }
                let found = self.search.backspace(&self.store, &mut self.viewport);
                Outcome::new(found, true)
            }
            Command::SearchHistoryPrev => {
                Outcome::new(self.search.history_prev(&self.store, &mut self.viewport), true)
            }
            Command::SearchHistoryNext => {
                Outcome::new(self.search.history_next(&self.store, &mut self.viewport), true)
            }
            Command::EndSearch => {
                let committed = self.search.confirm();
                if !self.search.last_pattern().is_empty() {
                    self.status = Some("N Previous n Next".to_string());
                }
                Outcome::new(committed, true)
            }
            Command::CancelSearch => Outcome::new(self.search.cancel(lines, &mut self.viewport), true),
            Command::SearchNext => self.repeat_search(Direction::Forward),
            Command::SearchPrevious => self.repeat_search(Direction::Backward),

            Command::Resize { width, height } => {
                self.viewport.set_size(width, height);
                self.viewport.relocate(lines);
                Outcome::changed()
            }
            Command::Quit => {
                info!("Quit requested");
                self.quit = true;
                Outcome::changed()
            }
        }
    }

    /// Run a cursor movement, then relocate the window around the cursor.
    fn cursor_moved(&mut self, movement: impl FnOnce(&mut Viewport) -> bool) -> Outcome {
        let moved = movement(&mut self.viewport);
        let scrolled = self.viewport.relocate(self.store.line_count());
        Outcome::new(moved, moved || scrolled)
    }

    fn changed_if(changed: bool) -> Outcome {
        Outcome::new(changed, changed)
    }

    fn repeat_search(&mut self, direction: Direction) -> Outcome {
        if self.search.last_pattern().is_empty() {
            self.status = Some("No previous search".to_string());
            return Outcome::unchanged();
        }
        let before = self.viewport.clone();
        if self.search.repeat(&self.store, &mut self.viewport, direction) {
            Outcome::new(true, before != self.viewport)
        } else {
            self.status = Some(format!("Pattern not found: {}", self.search.last_pattern()));
            Outcome::unchanged()
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
