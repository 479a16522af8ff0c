//! Domain-level commands independent of key bindings.

/// Commands consumed from the input-dispatch layer.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `Command` is handled by `KeyBindings`;
/// commands carrying a count or character are built by the view shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Cursor movement
    /// Move the cursor up by n rows. Default: k/↑
    CursorUp(usize),
    /// Move the cursor down by n rows. Default: j/↓
    CursorDown(usize),
    /// Move the cursor up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Move the cursor down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Move the cursor to a 1-based line number. Entered through the `:` prompt.
    JumpToLine(usize),
    /// Move the cursor to the first line. Default: g/Home
    GoToTop,
    /// Move the cursor to the last line. Default: G/End
    GoToBottom,

    // Scrolling without explicit cursor movement
    /// Scroll the view up by n rows. Default: Ctrl+y
    ScrollUp(usize),
    /// Scroll the view down by n rows. Default: Ctrl+e
    ScrollDown(usize),
    /// Scroll horizontally left by n columns. Default: h/←
    ScrollLeft(usize),
    /// Scroll horizontally right by n columns. Default: l/→
    ScrollRight(usize),

    // Search
    /// Open an interactive search prompt. Default: /
    BeginSearch,
    /// Append a character to the live search query.
    SearchInput(char),
    /// Remove the last character of the live search query.
    SearchBackspace,
    /// Recall the previous query from history into the prompt.
    SearchHistoryPrev,
    /// Recall the next query from history into the prompt.
    SearchHistoryNext,
    /// Repeat the last search forward. Default: n
    SearchNext,
    /// Repeat the last search backward. Default: N
    SearchPrevious,
    /// Commit the interactive search. Default: Enter
    EndSearch,
    /// Abandon the interactive search and restore the cursor. Default: Esc
    CancelSearch,

    // Application
    /// Terminal was resized to the given text area.
    Resize {
        /// Text area width in columns.
        width: usize,
        /// Text area height in rows.
        height: usize,
    },
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl Command {
    /// Whether this command edits the interactive search prompt.
    ///
    /// These are only meaningful while a search session is open.
    pub fn is_prompt_edit(&self) -> bool {
        matches!(
            self,
            Command::SearchInput(_)
                | Command::SearchBackspace
                | Command::SearchHistoryPrev
                | Command::SearchHistoryNext
                | Command::EndSearch
                | Command::CancelSearch
        )
    }
}
