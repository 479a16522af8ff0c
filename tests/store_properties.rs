//! Property-based tests for line store loading and cell mapping.

use jlv::store::{LineEnding, LineStore};
use jlv::view_state::draw;
use proptest::prelude::*;

// ===== Arbitrary Strategies =====

/// One line's content: any bytes except terminators.
fn arb_line_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>().prop_filter("no terminators", |b| *b != b'\n' && *b != b'\r'), 0..40)
}

fn arb_lines() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(arb_line_bytes(), 1..30)
}

/// Printable ASCII without tabs: every rune is one column wide.
fn arb_narrow_line() -> impl Strategy<Value = String> {
    "[ -~]{0,120}"
}

fn join(lines: &[Vec<u8>], sep: &[u8]) -> Vec<u8> {
    lines.join(sep)
}

// ===== Property Tests =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// `line_at` returns exactly the bytes between terminators.
    #[test]
    fn line_at_returns_bytes_between_terminators(lines in arb_lines()) {
        let data = join(&lines, b"\n");
        let store = LineStore::from_bytes(&data);

        prop_assert_eq!(store.line_count(), lines.len());
        for (row, expected) in lines.iter().enumerate() {
            prop_assert_eq!(store.line_at(row), expected.as_slice());
        }
    }

    /// Line count is the number of terminators plus one.
    #[test]
    fn line_count_is_terminators_plus_one(data in prop::collection::vec(any::<u8>(), 0..500)) {
        let store = LineStore::from_bytes(&data);
        let terminators = data.iter().filter(|b| **b == b'\n').count();
        prop_assert_eq!(store.line_count(), terminators + 1);
    }

    /// LF input renders back byte for byte.
    #[test]
    fn lf_round_trip(lines in arb_lines()) {
        let data = join(&lines, b"\n");
        let store = LineStore::from_bytes(&data);

        if lines.len() > 1 {
            prop_assert_eq!(store.line_ending(), LineEnding::Lf);
        }
        prop_assert_eq!(store.render_bytes(), data);
    }

    /// CRLF input renders back byte for byte, and lines exclude the `\r`.
    #[test]
    fn crlf_round_trip(lines in arb_lines()) {
        prop_assume!(lines.len() > 1);
        let data = join(&lines, b"\r\n");
        let store = LineStore::from_bytes(&data);

        prop_assert_eq!(store.line_ending(), LineEnding::CrLf);
        prop_assert_eq!(store.line_at(0), lines[0].as_slice());
        prop_assert_eq!(store.render_bytes(), data);
    }

    /// For single-width lines, a row holds `min(rune_count - left, width)`
    /// cells whenever `left` is inside the line.
    #[test]
    fn narrow_line_cell_count(
        line in arb_narrow_line(),
        left in 0usize..120,
        width in 1usize..100,
    ) {
        let runes = line.chars().count();
        prop_assume!(left < runes);

        let store = LineStore::from_bytes(line.as_bytes());
        let grid = draw(&store, 0, 1, left, width, 4);
        let cells = grid.row(0).map_or(0, <[_]>::len);

        prop_assert_eq!(cells, (runes - left).min(width));
    }

    /// Cells never extend past the drawn rectangle.
    #[test]
    fn cells_stay_inside_rectangle(
        text in "[a-z\t漢字é ]{0,60}",
        left in 0usize..30,
        width in 1usize..40,
        tab_size in 1usize..9,
    ) {
        let store = LineStore::from_bytes(text.as_bytes());
        let grid = draw(&store, 0, 1, left, width, tab_size);

        for cell in grid.row(0).unwrap_or_default() {
            prop_assert!(cell.visual.column < width);
            prop_assert!(cell.width == 1 || cell.visual.column + 1 < width);
        }
    }
}
