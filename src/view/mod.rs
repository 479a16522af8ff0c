//! TUI rendering and terminal management (impure shell)
//!
//! One producer thread reads terminal events into a bounded channel; the
//! main thread is the only consumer and the only writer of [`AppState`].

pub mod status_bar;
pub mod styles;
pub mod text_area;

pub use status_bar::{Prompt, StatusBar};
pub use styles::{ColorConfig, LineStyles};
pub use text_area::{gutter_width, TextArea};

use crate::config::KeyBindings;
use crate::model::{AppError, Command};
use crate::state::AppState;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Rows reserved below the text area.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Terminal events buffered between the reader thread and the main loop.
const EVENT_QUEUE_DEPTH: usize = 64;

/// How long the reader thread blocks before rechecking its stop flag.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => AppError::Terminal(e),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: LineStyles,
    /// Digits typed into the goto-line prompt while it is open.
    goto: Option<String>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        app_state: AppState,
        key_bindings: KeyBindings,
        styles: LineStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, app_state, key_bindings, styles)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits or the event reader fails. Draws only
    /// after events that change the screen; idle costs nothing.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let (tx, rx) = mpsc::sync_channel(EVENT_QUEUE_DEPTH);
        let stop = Arc::new(AtomicBool::new(false));
        let reader = spawn_event_reader(tx, Arc::clone(&stop));

        let result = self.event_loop(&rx);

        stop.store(true, Ordering::Relaxed);
        drop(rx);
        if reader.join().is_err() {
            warn!("Event reader thread panicked");
        }
        result
    }
}

/// Read terminal events until `stop` is set or the receiver goes away.
///
/// A read error is forwarded once and ends the thread.
fn spawn_event_reader(
    tx: SyncSender<io::Result<Event>>,
    stop: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            let ready = match event::poll(INPUT_POLL_INTERVAL) {
                Ok(ready) => ready,
                Err(e) => {
                    let _ = tx.send(Err(e));
                    return;
                }
            };
            if !ready {
                continue;
            }
            let event = event::read();
            let failed = event.is_err();
            if tx.send(event).is_err() || failed {
                return;
            }
        }
        debug!("Event reader stopped");
    })
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap an already initialized terminal.
    ///
    /// The viewport is sized to the terminal before the first draw.
    pub fn with_terminal(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
        styles: LineStyles,
    ) -> Result<Self, TuiError> {
        let mut app = Self {
            terminal,
            app_state,
            key_bindings,
            styles,
            goto: None,
        };
        let size = app.terminal.size()?;
        app.resize(size.width, size.height);
        Ok(app)
    }

    /// Current application state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn event_loop(&mut self, events: &Receiver<io::Result<Event>>) -> Result<(), TuiError> {
        self.draw()?;

        while !self.app_state.should_quit() {
            let Ok(event) = events.recv() else {
                warn!("Event reader disconnected");
                break;
            };
            if self.handle_event(event?) {
                self.draw()?;
            }
        }

        info!("Event loop finished");
        Ok(())
    }

    /// Apply one terminal event. Returns whether the screen needs a redraw.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Resize(width, height) => self.resize(width, height),
            _ => false,
        }
    }

    /// Size the viewport to the terminal minus the gutter and status bar.
    fn resize(&mut self, width: u16, height: u16) -> bool {
        let gutter = gutter_width(self.app_state.store().line_count());
        let width = usize::from(width.saturating_sub(gutter));
        let height = usize::from(height.saturating_sub(STATUS_BAR_HEIGHT));
        debug!(width, height, "Resizing text area");
        self.apply(Command::Resize { width, height })
    }

    /// Route a key to the open prompt, or through the key bindings.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.goto.is_some() {
            return self.handle_goto_key(key);
        }
        if self.app_state.search().is_interactive() {
            return match search_prompt_command(key) {
                Some(command) => self.apply(command),
                None => false,
            };
        }

        if key.code == KeyCode::Char(':') && !key.modifiers.contains(KeyModifiers::CONTROL) {
            self.goto = Some(String::new());
            return true;
        }

        match self.key_bindings.get(key) {
            Some(command) => self.apply(command),
            None => {
                debug!(?key, "Unbound key");
                false
            }
        }
    }

    fn handle_goto_key(&mut self, key: KeyEvent) -> bool {
        let Some(digits) = self.goto.as_mut() else {
            return false;
        };

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.goto = None;
                self.apply(Command::Quit)
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                digits.push(c);
                true
            }
            KeyCode::Backspace => {
                if digits.pop().is_none() {
                    self.goto = None;
                }
                true
            }
            KeyCode::Esc => {
                self.goto = None;
                true
            }
            KeyCode::Enter => {
                let digits = self.goto.take().unwrap_or_default();
                match digits.parse::<usize>() {
                    Ok(line) => {
                        self.apply(Command::JumpToLine(line));
                    }
                    Err(_) if digits.is_empty() => {}
                    Err(e) => debug!(%digits, error = %e, "Unusable line number"),
                }
                true
            }
            _ => false,
        }
    }

    fn apply(&mut self, command: Command) -> bool {
        self.app_state.apply(command).redraw
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let app_state = &self.app_state;
        let styles = &self.styles;
        let prompt = current_prompt(self.goto.as_deref(), app_state);

        self.terminal.draw(|frame| {
            let [text_area, status_area] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .areas(frame.area());

            frame.render_widget(TextArea::new(app_state, styles), text_area);
            frame.render_widget(StatusBar::new(app_state, prompt, styles), status_area);

            if let Some(offset) = prompt.cursor_offset() {
                let x = status_area
                    .x
                    .saturating_add(offset)
                    .min(status_area.right().saturating_sub(1));
                frame.set_cursor_position((x, status_area.y));
            }
        })?;

        Ok(())
    }
}

/// Prompt shown on the bottom line, goto taking precedence over search.
fn current_prompt<'a>(goto: Option<&'a str>, app_state: &'a AppState) -> Prompt<'a> {
    if let Some(digits) = goto {
        return Prompt::Goto(digits);
    }
    match app_state.search().interactive() {
        Some(search) => Prompt::Search(search.query()),
        None => Prompt::None,
    }
}

/// Map a key pressed while the search prompt is open.
fn search_prompt_command(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char(ch) => Some(Command::SearchInput(ch)),
        KeyCode::Backspace => Some(Command::SearchBackspace),
        KeyCode::Up => Some(Command::SearchHistoryPrev),
        KeyCode::Down => Some(Command::SearchHistoryNext),
        KeyCode::Enter => Some(Command::EndSearch),
        KeyCode::Esc => Some(Command::CancelSearch),
        _ => None,
    }
}

/// Initialize the terminal, run the viewer, and restore the terminal.
///
/// Logging must be initialized by the caller.
pub fn run_with_state(
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: LineStyles,
) -> Result<(), TuiError> {
    let mut app = match TuiApp::new(app_state, key_bindings, styles) {
        Ok(app) => app,
        Err(e) => {
            let _ = restore_terminal();
            return Err(e);
        }
    };

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
