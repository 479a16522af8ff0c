//! Tests for command dispatch.
//!
//! These run the full state machine without a terminal.

use super::*;

// ===== Test Helpers =====

fn numbered(count: usize) -> LineStore {
    let text: Vec<String> = (0..count).map(|i| format!("line {i}")).collect();
    LineStore::from_bytes(text.join("\n").as_bytes())
}

fn state_with(store: LineStore, height: usize, margin: usize) -> AppState {
    AppState::new(store, "test.log", Viewport::new(20, height, margin), 4)
}

// ===== AppState::new =====

#[test]
fn new_state_starts_at_top() {
    let state = state_with(numbered(50), 10, 3);
    assert_eq!(state.viewport().cursor_row(), 0);
    assert_eq!(state.viewport().top_row(), 0);
    assert_eq!(state.source_name(), "test.log");
    assert!(!state.should_quit());
    assert!(state.status().is_none());
}

#[test]
fn zero_tab_size_is_raised_to_one() {
    let state = AppState::new(numbered(1), "x", Viewport::new(10, 5, 0), 0);
    assert_eq!(state.tab_size(), 1);
}

// ===== Cursor movement =====

#[test]
fn cursor_down_relocates_with_margin() {
    let mut state = state_with(numbered(100), 10, 3);
    let outcome = state.apply(Command::CursorDown(15));
    assert_eq!(outcome, Outcome { succeeded: true, redraw: true });
    assert_eq!(state.viewport().cursor_row(), 15);
    assert_eq!(state.viewport().top_row(), 9);
}

#[test]
fn cursor_up_at_top_fails_without_redraw() {
    let mut state = state_with(numbered(10), 5, 0);
    let outcome = state.apply(Command::CursorUp(1));
    assert!(!outcome.succeeded);
    assert!(!outcome.redraw);
}

#[test]
fn go_to_bottom_pins_last_page() {
    let mut state = state_with(numbered(100), 10, 3);
    state.apply(Command::GoToBottom);
    assert_eq!(state.viewport().cursor_row(), 99);
    assert_eq!(state.viewport().top_row(), 90);
    state.apply(Command::GoToTop);
    assert_eq!(state.viewport().top_row(), 0);
}

#[test]
fn page_down_moves_by_height() {
    let mut state = state_with(numbered(100), 10, 0);
    state.apply(Command::PageDown);
    assert_eq!(state.viewport().cursor_row(), 10);
    state.apply(Command::PageUp);
    assert_eq!(state.viewport().cursor_row(), 0);
}

// ===== JumpToLine =====

#[test]
fn jump_to_line_out_of_range_reports_status() {
    let mut state = state_with(numbered(10), 5, 0);
    state.apply(Command::CursorDown(4));

    let outcome = state.apply(Command::JumpToLine(15));
    assert!(!outcome.succeeded);
    assert!(outcome.redraw, "status message needs a redraw");
    assert_eq!(state.viewport().cursor_row(), 4);
    assert_eq!(state.status(), Some("Line 15 out of range (1-10)"));
}

#[test]
fn jump_to_first_line() {
    let mut state = state_with(numbered(10), 5, 0);
    state.apply(Command::CursorDown(6));
    assert!(state.apply(Command::JumpToLine(1)).succeeded);
    assert_eq!(state.viewport().cursor_row(), 0);
    assert_eq!(state.viewport().top_row(), 0);
}

#[test]
fn status_is_cleared_by_next_command() {
    let mut state = state_with(numbered(10), 5, 0);
    state.apply(Command::JumpToLine(99));
    assert!(state.status().is_some());
    let outcome = state.apply(Command::CursorUp(1));
    assert!(state.status().is_none());
    assert!(outcome.redraw);
}

// ===== Scrolling =====

#[test]
fn scroll_down_keeps_cursor_visible() {
    let mut state = state_with(numbered(100), 10, 0);
    assert!(state.apply(Command::ScrollDown(20)).succeeded);
    assert_eq!(state.viewport().top_row(), 20);
    assert_eq!(state.viewport().cursor_row(), 20);
}

#[test]
fn scroll_right_bounded_by_visible_content() {
    let long = format!("{}\nshort", "x".repeat(30));
    let mut state = state_with(LineStore::from_bytes(long.as_bytes()), 5, 0);
    assert_eq!(state.content_width(), 30);

    state.apply(Command::ScrollRight(100));
    assert_eq!(state.viewport().left_column(), 10);
    assert!(!state.apply(Command::ScrollRight(1)).succeeded);

    state.apply(Command::ScrollLeft(4));
    assert_eq!(state.viewport().left_column(), 6);
}

#[test]
fn visible_cells_follow_viewport() {
    let mut state = state_with(numbered(100), 3, 0);
    state.apply(Command::ScrollDown(10));
    let grid = state.visible_cells();
    assert_eq!(grid.top_row(), 10);
    assert_eq!(grid.len(), 3);
    assert_eq!(grid.row_text(0), "line 10");
}

// ===== Search =====

fn searchable() -> LineStore {
    LineStore::from_bytes(b"alpha\nneedle\nbeta\ngamma\ndelta")
}

#[test]
fn interactive_search_round_trip() {
    let mut state = state_with(searchable(), 3, 0);
    assert!(state.apply(Command::BeginSearch).succeeded);
    for ch in "gam".chars() {
        state.apply(Command::SearchInput(ch));
    }
    assert_eq!(state.viewport().cursor_row(), 3);

    assert!(state.apply(Command::EndSearch).succeeded);
    assert_eq!(state.search().last_pattern(), "gam");
    assert_eq!(state.status(), Some("N Previous n Next"));
}

#[test]
fn navigation_is_ignored_while_prompt_is_open() {
    let mut state = state_with(searchable(), 3, 0);
    state.apply(Command::BeginSearch);
    let outcome = state.apply(Command::CursorDown(1));
    assert_eq!(outcome, Outcome::default());
    assert_eq!(state.viewport().cursor_row(), 0);
}

#[test]
fn cancel_search_restores_cursor() {
    let mut state = state_with(searchable(), 3, 0);
    state.apply(Command::CursorDown(1));
    state.apply(Command::BeginSearch);
    state.apply(Command::SearchInput('d'));
    state.apply(Command::SearchInput('e'));
    assert_eq!(state.viewport().cursor_row(), 4);

    state.apply(Command::CancelSearch);
    assert_eq!(state.viewport().cursor_row(), 1);
    assert!(!state.search().is_interactive());
}

#[test]
fn backspace_on_empty_query_ends_search() {
    let mut state = state_with(searchable(), 3, 0);
    state.apply(Command::BeginSearch);
    state.apply(Command::SearchBackspace);
    assert!(!state.search().is_interactive());
}

#[test]
fn search_next_wraps_around() {
    let mut state = state_with(searchable(), 3, 0);
    state.apply(Command::BeginSearch);
    for ch in "needle".chars() {
        state.apply(Command::SearchInput(ch));
    }
    state.apply(Command::EndSearch);
    state.apply(Command::GoToBottom);

    assert!(state.apply(Command::SearchNext).succeeded);
    assert_eq!(state.viewport().cursor_row(), 1);
}

#[test]
fn search_next_without_pattern_reports_status() {
    let mut state = state_with(searchable(), 3, 0);
    let outcome = state.apply(Command::SearchNext);
    assert!(!outcome.succeeded);
    assert_eq!(state.status(), Some("No previous search"));
}

// ===== Application =====

#[test]
fn resize_relocates_around_cursor() {
    let mut state = state_with(numbered(100), 20, 0);
    state.apply(Command::CursorDown(15));
    assert_eq!(state.viewport().top_row(), 0);

    state.apply(Command::Resize { width: 40, height: 5 });
    assert_eq!(state.viewport().height(), 5);
    assert_eq!(state.viewport().width(), 40);
    assert_eq!(state.viewport().top_row(), 11);
}

#[test]
fn quit_sets_flag_even_during_search() {
    let mut state = state_with(searchable(), 3, 0);
    state.apply(Command::BeginSearch);
    state.apply(Command::Quit);
    assert!(state.should_quit());
}

#[test]
fn empty_store_accepts_every_command() {
    let mut state = state_with(LineStore::default(), 5, 2);
    for command in [
        Command::CursorDown(3),
        Command::CursorUp(3),
        Command::PageDown,
        Command::GoToBottom,
        Command::ScrollDown(4),
        Command::ScrollRight(4),
        Command::JumpToLine(1),
        Command::SearchNext,
    ] {
        state.apply(command);
        assert_eq!(state.viewport().cursor_row(), 0);
        assert_eq!(state.viewport().top_row(), 0);
    }
}

// ===== Startup helpers =====

#[test]
fn search_for_moves_to_match_and_sets_pattern() {
    let mut state = state_with(numbered(40), 10, 0);
    let outcome = state.search_for("line 3[0-9]");

    assert!(outcome.succeeded);
    assert_eq!(state.viewport().cursor_row(), 30);
    assert_eq!(state.search().last_pattern(), "line 3[0-9]");
    assert_eq!(state.search().history(), ["line 3[0-9]".to_string()]);

    state.apply(Command::SearchNext);
    assert_eq!(state.viewport().cursor_row(), 31);
}

#[test]
fn search_for_miss_reports_status() {
    let mut state = state_with(numbered(5), 10, 0);
    let outcome = state.search_for("absent");

    assert!(!outcome.succeeded);
    assert_eq!(state.viewport().cursor_row(), 0);
    assert_eq!(state.status(), Some("Pattern not found: absent"));
    assert_eq!(state.search().last_pattern(), "");
}

#[test]
fn notify_shows_until_next_command() {
    let mut state = state_with(numbered(5), 10, 0);
    state.notify("loaded with errors");
    assert_eq!(state.status(), Some("loaded with errors"));

    let outcome = state.apply(Command::CursorUp(1));
    assert!(outcome.redraw, "clearing the message redraws");
    assert!(state.status().is_none());
}
