//! Snapshot tests for the rendered screen
//!
//! Uses insta + ratatui TestBackend to verify rendering output doesn't regress.
//! Rows are snapshotted as a debug list so leading gutter padding survives.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use jlv::config::KeyBindings;
use jlv::state::AppState;
use jlv::store::LineStore;
use jlv::view::{ColorConfig, LineStyles, TuiApp};
use jlv::view_state::Viewport;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

// ===== Test Helpers =====

/// Every screen row, trailing blanks trimmed.
fn screen_rows(buffer: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buffer.area();
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

fn create_app(data: &[u8], width: u16, height: u16) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let state = AppState::new(
        LineStore::from_bytes(data),
        "app.log",
        Viewport::new(0, 0, 0),
        4,
    );
    let styles = LineStyles::with_color_config(ColorConfig::from_env_and_args(true));
    TuiApp::with_terminal(terminal, state, KeyBindings::default(), styles).unwrap()
}

fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) {
    app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn render(app: &mut TuiApp<TestBackend>) -> Vec<String> {
    app.draw().unwrap();
    screen_rows(app.terminal().backend().buffer())
}

const JSON_LOG: &[u8] = b"{\"ts\":\"2024-05-01T10:00:00Z\",\"level\":\"info\",\"msg\":\"boot\"}
{\"ts\":\"2024-05-01T10:00:02Z\",\"level\":\"error\",\"msg\":\"disk full\"}
not json at all";

// ===== Snapshots =====

#[test]
fn snapshot_structured_log_first_line() {
    let mut app = create_app(JSON_LOG, 70, 5);

    insta::assert_debug_snapshot!(render(&mut app), @r#"
    [
        " 1 {\"ts\":\"2024-05-01T10:00:00Z\",\"level\":\"info\",\"msg\":\"boot\"}",
        " 2 {\"ts\":\"2024-05-01T10:00:02Z\",\"level\":\"error\",\"msg\":\"disk full\"}",
        " 3 not json at all",
        "",
        " app.log  1/3  LF  2024-05-01T10:00:00.000  info  boot",
    ]
    "#);
}

#[test]
fn snapshot_cursor_on_error_line() {
    let mut app = create_app(JSON_LOG, 70, 5);
    press(&mut app, KeyCode::Char('j'));

    insta::assert_debug_snapshot!(render(&mut app), @r#"
    [
        " 1 {\"ts\":\"2024-05-01T10:00:00Z\",\"level\":\"info\",\"msg\":\"boot\"}",
        " 2 {\"ts\":\"2024-05-01T10:00:02Z\",\"level\":\"error\",\"msg\":\"disk full\"}",
        " 3 not json at all",
        "",
        " app.log  2/3  LF  2024-05-01T10:00:02.000  error disk full",
    ]
    "#);
}

#[test]
fn snapshot_raw_line_has_no_summary() {
    let mut app = create_app(JSON_LOG, 70, 5);
    press(&mut app, KeyCode::End);

    insta::assert_debug_snapshot!(render(&mut app), @r#"
    [
        " 1 {\"ts\":\"2024-05-01T10:00:00Z\",\"level\":\"info\",\"msg\":\"boot\"}",
        " 2 {\"ts\":\"2024-05-01T10:00:02Z\",\"level\":\"error\",\"msg\":\"disk full\"}",
        " 3 not json at all",
        "",
        " app.log  3/3  LF",
    ]
    "#);
}

#[test]
fn snapshot_live_search_prompt() {
    let data: Vec<String> = (1..=100).map(|n| format!("line {n}")).collect();
    let mut app = create_app(data.join("\n").as_bytes(), 30, 6);
    press(&mut app, KeyCode::Char('/'));
    for ch in "line 4".chars() {
        press(&mut app, KeyCode::Char(ch));
    }

    insta::assert_debug_snapshot!(render(&mut app), @r#"
    [
        "   1 line 1",
        "   2 line 2",
        "   3 line 3",
        "   4 line 4",
        "   5 line 5",
        "Find: line 4",
    ]
    "#);
}

#[test]
fn snapshot_horizontal_scroll() {
    let mut app = create_app(b"0123456789abcdefghijklmnopqrstuvwxyz", 20, 3);
    press(&mut app, KeyCode::Char('L'));

    insta::assert_debug_snapshot!(render(&mut app), @r#"
    [
        " 1 89abcdefghijklmno",
        "",
        " app.log  1/1  none",
    ]
    "#);
}

#[test]
fn snapshot_goto_prompt() {
    let mut app = create_app(JSON_LOG, 40, 3);
    press(&mut app, KeyCode::Char(':'));
    press(&mut app, KeyCode::Char('3'));

    insta::assert_debug_snapshot!(render(&mut app), @r#"
    [
        " 1 {\"ts\":\"2024-05-01T10:00:00Z\",\"level\":",
        " 2 {\"ts\":\"2024-05-01T10:00:02Z\",\"level\":",
        ":3",
    ]
    "#);
}
