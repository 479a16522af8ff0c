use super::*;
use std::io::{self, Read};

fn store(text: &str) -> LineStore {
    LineStore::from_bytes(text.as_bytes())
}

/// Reader that fails after yielding some bytes.
struct FailingReader {
    sent: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        }
        self.sent = true;
        let data = b"first line\nsecond";
        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }
}

// ===== Load =====

#[test]
fn load_splits_on_line_feed() {
    let s = store("alpha\nbeta\ngamma");
    assert_eq!(s.line_count(), 3);
    assert_eq!(s.line_at(0), b"alpha");
    assert_eq!(s.line_at(1), b"beta");
    assert_eq!(s.line_at(2), b"gamma");
}

#[test]
fn trailing_terminator_yields_empty_last_line() {
    let s = store("a\nb\n");
    assert_eq!(s.line_count(), 3);
    assert_eq!(s.line_at(2), b"");
}

#[test]
fn empty_stream_yields_one_empty_line() {
    let s = store("");
    assert_eq!(s.line_count(), 1);
    assert_eq!(s.line_at(0), b"");
    assert_eq!(s.line_ending(), LineEnding::None);
}

#[test]
fn default_store_is_validly_empty() {
    let s = LineStore::default();
    assert_eq!(s.line_count(), 0);
    assert!(s.is_empty());
    assert_eq!(s.line_at(0), b"");
    assert!(s.slice(0, 10).is_empty());
}

#[test]
fn detects_lf() {
    assert_eq!(store("a\nb").line_ending(), LineEnding::Lf);
}

#[test]
fn detects_crlf_and_strips_carriage_returns() {
    let s = store("a\r\nb\r\nc");
    assert_eq!(s.line_ending(), LineEnding::CrLf);
    assert_eq!(s.line_at(0), b"a");
    assert_eq!(s.line_at(1), b"b");
}

#[test]
fn line_ending_is_fixed_by_first_terminator() {
    let s = store("a\nb\r\nc\r\n");
    assert_eq!(s.line_ending(), LineEnding::Lf);
    // Later CRLF lines are still stripped of their carriage return.
    assert_eq!(s.line_at(1), b"b");
}

#[test]
fn single_unterminated_line_has_no_line_ending() {
    let s = store("only");
    assert_eq!(s.line_ending(), LineEnding::None);
    assert_eq!(s.line_count(), 1);
}

#[test]
fn reload_detects_afresh() {
    let first = store("a\r\nb");
    let second = store("a\nb");
    assert_eq!(first.line_ending(), LineEnding::CrLf);
    assert_eq!(second.line_ending(), LineEnding::Lf);
}

#[test]
fn load_surfaces_read_errors() {
    let result = LineStore::load(FailingReader { sent: false }, 0);
    assert!(matches!(result, Err(InputError::Io(_))));
}

#[test]
fn load_of_many_lines_with_small_size_hint() {
    let text: String = (0..5000).map(|i| format!("line {i}\n")).collect();
    // Deliberately wrong hint; the estimate only affects capacity.
    let s = LineStore::load(text.as_bytes(), 10).unwrap();
    assert_eq!(s.line_count(), 5001);
    assert_eq!(s.line_at(4999), b"line 4999");
}

#[test]
fn load_of_many_lines_with_unknown_size() {
    let text: String = (0..2500).map(|i| format!("{i}\n")).collect();
    let s = LineStore::load(text.as_bytes(), 0).unwrap();
    assert_eq!(s.line_count(), 2501);
}

#[test]
fn structured_lines_are_parsed_during_load() {
    let s = store("{\"level\":\"warn\",\"message\":\"hot\"}\nplain");
    let record = s.line(0).unwrap().entry().as_structured().unwrap();
    assert_eq!(record.message(), Some("hot"));
    assert_eq!(s.line(1).unwrap().entry(), &ParseResult::Raw);
}

// ===== Reads =====

#[test]
fn line_at_out_of_range_is_empty() {
    let s = store("a\nb");
    assert_eq!(s.line_at(2), b"");
    assert_eq!(s.line_at(usize::MAX), b"");
}

#[test]
fn slice_is_clamped() {
    let s = store("a\nb\nc");
    assert_eq!(s.slice(1, 3).len(), 2);
    assert_eq!(s.slice(1, 100).len(), 2);
    assert_eq!(s.slice(5, 9).len(), 0);
    assert_eq!(s.slice(2, 1).len(), 0);
}

#[test]
fn rune_count_of_row() {
    let s = store("a漢b\n");
    assert_eq!(s.rune_count(0), 3);
    assert_eq!(s.rune_count(1), 0);
    assert_eq!(s.rune_count(9), 0);
}

// ===== Render =====

#[test]
fn render_round_trips_lf() {
    let text = "one\ntwo\nthree\n";
    assert_eq!(store(text).render(), text);
}

#[test]
fn render_round_trips_crlf() {
    let text = "one\r\ntwo\r\n";
    assert_eq!(store(text).render(), text);
}

#[test]
fn render_bytes_preserves_invalid_utf8() {
    let data = b"ok\n\xff\xfe\n";
    assert_eq!(LineStore::from_bytes(data).render_bytes(), data.to_vec());
}

// ===== Mutation =====

#[test]
fn insert_byte_translates_rune_column() {
    let mut s = store("漢字");
    s.insert_byte(Position::new(0, 1), b'-');
    assert_eq!(s.line_at(0), "漢-字".as_bytes());
}

#[test]
fn insert_byte_at_line_end() {
    let mut s = store("ab");
    s.insert_byte(Position::new(0, 2), b'c');
    assert_eq!(s.line_at(0), b"abc");
}

#[test]
fn delete_byte_removes_ascii_rune() {
    let mut s = store("abc");
    s.delete_byte(Position::new(0, 1));
    assert_eq!(s.line_at(0), b"ac");
}

#[test]
fn delete_range_removes_runes() {
    let mut s = store("a漢字b");
    s.delete_range(0, 1, 3);
    assert_eq!(s.line_at(0), b"ab");
}

#[test]
fn delete_to_end_truncates() {
    let mut s = store("héllo world");
    s.delete_to_end(Position::new(0, 5));
    assert_eq!(s.line_at(0), "héllo".as_bytes());
}

#[test]
fn delete_from_start_removes_through_position() {
    let mut s = store("héllo world");
    s.delete_from_start(Position::new(0, 5));
    assert_eq!(s.line_at(0), b"world");
}

#[test]
fn delete_from_start_handles_wide_runes() {
    let mut s = store("漢字ab\nnext");
    s.delete_from_start(Position::new(0, 1));
    assert_eq!(s.line_at(0), b"ab");
    assert_eq!(s.line_at(1), b"next");
}

#[test]
fn delete_line_shifts_following_rows() {
    let mut s = store("a\nb\nc");
    s.delete_line(1);
    assert_eq!(s.line_count(), 2);
    assert_eq!(s.line_at(1), b"c");
}

#[test]
fn mutation_refreshes_structured_parse() {
    let mut s = store("{\"message\":\"x\"}");
    s.delete_byte(Position::new(0, 0));
    assert_eq!(s.line(0).unwrap().entry(), &ParseResult::Raw);
}

#[test]
fn substr_within_one_row() {
    let s = store("a漢字b");
    assert_eq!(s.substr(Position::new(0, 1), Position::new(0, 3)), "漢字");
}

#[test]
fn substr_across_rows() {
    let s = store("first\nmiddle\nlast");
    assert_eq!(
        s.substr(Position::new(0, 3), Position::new(2, 2)),
        "st\nmiddle\nla"
    );
}

#[test]
fn substr_across_adjacent_rows() {
    let s = store("ab\ncd");
    assert_eq!(s.substr(Position::new(0, 1), Position::new(1, 1)), "b\nc");
}

#[test]
#[should_panic(expected = "row 3 out of range")]
fn insert_byte_past_last_row_panics() {
    let mut s = store("a\nb");
    s.insert_byte(Position::new(3, 0), b'x');
}

#[test]
#[should_panic(expected = "column 4 out of range")]
fn insert_byte_past_line_end_panics() {
    let mut s = store("abc");
    s.insert_byte(Position::new(0, 4), b'x');
}

#[test]
#[should_panic(expected = "past the last rune")]
fn delete_byte_at_line_end_panics() {
    let mut s = store("abc");
    s.delete_byte(Position::new(0, 3));
}

#[test]
#[should_panic(expected = "past the last rune")]
fn delete_from_start_at_line_end_panics() {
    let mut s = store("abc");
    s.delete_from_start(Position::new(0, 3));
}

#[test]
#[should_panic(expected = "delete_from_start")]
fn delete_from_start_past_last_row_panics() {
    let mut s = store("a\nb");
    s.delete_from_start(Position::new(2, 0));
}

#[test]
#[should_panic(expected = "delete_line")]
fn delete_line_out_of_range_panics() {
    let mut s = store("a");
    s.delete_line(1);
}

#[test]
#[should_panic(expected = "reversed range")]
fn delete_range_reversed_panics() {
    let mut s = store("abc");
    s.delete_range(0, 2, 1);
}
