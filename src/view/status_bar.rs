//! Bottom status line and the prompts that temporarily replace it.

use crate::state::AppState;
use crate::view::styles::LineStyles;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use unicode_width::UnicodeWidthStr;

/// Label shown before the live search query.
pub const SEARCH_PROMPT: &str = "Find: ";

/// Label shown before the goto-line digits.
pub const GOTO_PROMPT: &str = ":";

/// What the bottom line is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt<'a> {
    /// The regular status line.
    None,
    /// Interactive search with the current query.
    Search(&'a str),
    /// Goto-line prompt with the digits typed so far.
    Goto(&'a str),
}

impl Prompt<'_> {
    /// Full prompt text, or `None` for the status line.
    pub fn text(&self) -> Option<String> {
        match self {
            Prompt::None => None,
            Prompt::Search(query) => Some(format!("{SEARCH_PROMPT}{query}")),
            Prompt::Goto(digits) => Some(format!("{GOTO_PROMPT}{digits}")),
        }
    }

    /// Display width of the prompt text, where the terminal cursor goes.
    pub fn cursor_offset(&self) -> Option<u16> {
        self.text()
            .map(|text| u16::try_from(text.width()).unwrap_or(u16::MAX))
    }
}

/// Reverse-video line at the bottom of the screen.
///
/// Shows the source name, cursor position and line ending on the left, then
/// the pending message (or the cursor line's parsed summary), and the last
/// search pattern on the right.
pub struct StatusBar<'a> {
    state: &'a AppState,
    prompt: Prompt<'a>,
    styles: &'a LineStyles,
}

impl<'a> StatusBar<'a> {
    /// Create the widget.
    pub fn new(state: &'a AppState, prompt: Prompt<'a>, styles: &'a LineStyles) -> Self {
        Self {
            state,
            prompt,
            styles,
        }
    }

    fn left_text(&self) -> String {
        let store = self.state.store();
        let cursor = self.state.viewport().cursor_row();
        let mut text = format!(
            " {}  {}/{}  {}",
            self.state.source_name(),
            cursor + 1,
            store.line_count(),
            store.line_ending().label()
        );

        if let Some(message) = self.state.status() {
            text.push_str("  ");
            text.push_str(message);
        } else if let Some(record) = store.line(cursor).and_then(|line| line.entry().as_structured()) {
            text.push_str(" ");
            text.push_str(&record.summary());
        }
        text
    }

    fn right_text(&self) -> Option<String> {
        let pattern = self.state.search().last_pattern();
        (!pattern.is_empty()).then(|| format!("/{pattern} "))
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = self.styles.status_bar();
        let line = Rect::new(area.x, area.y, area.width, 1);
        buf.set_style(line, style);
        let width = usize::from(area.width);

        if let Some(prompt) = self.prompt.text() {
            buf.set_stringn(area.x, area.y, prompt, width, style);
            return;
        }

        let left = self.left_text();
        let right = self.right_text();
        let right_width = right.as_deref().map_or(0, UnicodeWidthStr::width);
        let left_room = if right_width < width {
            width - right_width
        } else {
            width
        };
        buf.set_stringn(area.x, area.y, left, left_room, style);

        if let Some(right) = right.filter(|_| right_width < width) {
            let Ok(offset) = u16::try_from(width - right_width) else {
                return;
            };
            buf.set_stringn(area.x + offset, area.y, right, right_width, style);
        }
    }
}
