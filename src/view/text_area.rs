//! Text area widget: line-number gutter plus the mapped cells.

use crate::state::AppState;
use crate::view::styles::LineStyles;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Columns taken by the line-number gutter for a store of `line_count` rows.
///
/// One column of padding on each side of the widest line number.
pub fn gutter_width(line_count: usize) -> u16 {
    let digits = line_count.max(1).ilog10() as u16 + 1;
    digits + 2
}

/// Renders the visible window of the store.
///
/// Only paints what the viewport covers; callers size the viewport to
/// `area` minus the gutter before rendering.
pub struct TextArea<'a> {
    state: &'a AppState,
    styles: &'a LineStyles,
}

impl<'a> TextArea<'a> {
    /// Create the widget over the current state.
    pub fn new(state: &'a AppState, styles: &'a LineStyles) -> Self {
        Self { state, styles }
    }
}

impl Widget for TextArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let line_count = self.state.store().line_count();
        let gutter = gutter_width(line_count).min(area.width);
        let digits = usize::from(gutter.saturating_sub(2));
        let text_x = area.x + gutter;
        let text_width = area.width - gutter;
        let grid = self.state.visible_cells();
        let cursor_row = self.state.viewport().cursor_row();

        for (visual_row, cells) in grid.rows().iter().enumerate() {
            let Ok(offset) = u16::try_from(visual_row) else {
                break;
            };
            if offset >= area.height {
                break;
            }
            let y = area.y + offset;
            let source_row = grid.top_row() + visual_row;

            let number = format!(" {:>digits$} ", source_row + 1);
            buf.set_stringn(area.x, y, number, usize::from(gutter), self.styles.gutter());

            let mut skip_placeholder = false;
            for cell in cells {
                if skip_placeholder {
                    skip_placeholder = false;
                    continue;
                }
                let Ok(column) = u16::try_from(cell.visual.column) else {
                    break;
                };
                if column >= text_width {
                    break;
                }
                let x = text_x + column;
                let style = self.styles.for_cell(cell.style);
                if cell.width == 2 && column + 1 < text_width {
                    buf.set_string(x, y, cell.glyph.to_string(), style);
                    skip_placeholder = true;
                } else if let Some(slot) = buf.cell_mut((x, y)) {
                    slot.set_char(cell.glyph).set_style(style);
                }
            }

            if source_row == cursor_row && text_width > 0 {
                let row_area = Rect::new(text_x, y, text_width, 1);
                buf.set_style(row_area, self.styles.cursor_row());
            }
        }
    }
}
