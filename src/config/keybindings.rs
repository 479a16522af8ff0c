//! Keyboard bindings configuration.

use crate::model::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Columns moved by the large horizontal scroll keys (`H`/`L`).
const WIDE_HORIZONTAL_STEP: usize = 8;

/// Maps keyboard events to commands in normal mode.
///
/// Prompt editing (search query, goto line) is handled by the view and never
/// goes through this table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Command>,
}

impl KeyBindings {
    /// Look up the command for a key event.
    ///
    /// Terminals disagree on whether an uppercase letter carries `SHIFT`, so
    /// both spellings are tried.
    pub fn get(&self, key: KeyEvent) -> Option<Command> {
        let key = KeyEvent::new(key.code, key.modifiers);
        if let Some(command) = self.bindings.get(&key) {
            return Some(*command);
        }
        match key.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => self
                .bindings
                .get(&KeyEvent::new(key.code, key.modifiers ^ KeyModifiers::SHIFT))
                .copied(),
            _ => None,
        }
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no keys are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, modifiers: KeyModifiers, command: Command| {
            bindings.insert(KeyEvent::new(code, modifiers), command);
        };

        // Vim-style cursor movement
        bind(KeyCode::Char('j'), KeyModifiers::NONE, Command::CursorDown(1));
        bind(KeyCode::Char('k'), KeyModifiers::NONE, Command::CursorUp(1));
        bind(KeyCode::Down, KeyModifiers::NONE, Command::CursorDown(1));
        bind(KeyCode::Up, KeyModifiers::NONE, Command::CursorUp(1));
        bind(KeyCode::Char('g'), KeyModifiers::NONE, Command::GoToTop);
        bind(KeyCode::Char('G'), KeyModifiers::SHIFT, Command::GoToBottom);
        bind(KeyCode::Home, KeyModifiers::NONE, Command::GoToTop);
        bind(KeyCode::End, KeyModifiers::NONE, Command::GoToBottom);

        // Page navigation
        bind(KeyCode::Char('d'), KeyModifiers::CONTROL, Command::PageDown);
        bind(KeyCode::Char('u'), KeyModifiers::CONTROL, Command::PageUp);
        bind(KeyCode::Char('f'), KeyModifiers::CONTROL, Command::PageDown);
        bind(KeyCode::Char('b'), KeyModifiers::CONTROL, Command::PageUp);
        bind(KeyCode::PageDown, KeyModifiers::NONE, Command::PageDown);
        bind(KeyCode::PageUp, KeyModifiers::NONE, Command::PageUp);
        bind(KeyCode::Char(' '), KeyModifiers::NONE, Command::PageDown);

        // Scrolling without moving the cursor
        bind(KeyCode::Char('e'), KeyModifiers::CONTROL, Command::ScrollDown(1));
        bind(KeyCode::Char('y'), KeyModifiers::CONTROL, Command::ScrollUp(1));
        bind(KeyCode::Char('h'), KeyModifiers::NONE, Command::ScrollLeft(1));
        bind(KeyCode::Char('l'), KeyModifiers::NONE, Command::ScrollRight(1));
        bind(KeyCode::Left, KeyModifiers::NONE, Command::ScrollLeft(1));
        bind(KeyCode::Right, KeyModifiers::NONE, Command::ScrollRight(1));
        bind(
            KeyCode::Char('H'),
            KeyModifiers::SHIFT,
            Command::ScrollLeft(WIDE_HORIZONTAL_STEP),
        );
        bind(
            KeyCode::Char('L'),
            KeyModifiers::SHIFT,
            Command::ScrollRight(WIDE_HORIZONTAL_STEP),
        );

        // Search
        bind(KeyCode::Char('/'), KeyModifiers::NONE, Command::BeginSearch);
        bind(KeyCode::Char('n'), KeyModifiers::NONE, Command::SearchNext);
        bind(KeyCode::Char('N'), KeyModifiers::SHIFT, Command::SearchPrevious);

        // Application controls
        bind(KeyCode::Char('q'), KeyModifiers::NONE, Command::Quit);
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, Command::Quit);

        Self { bindings }
    }
}
