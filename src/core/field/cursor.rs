//! Cursor and scroll tracking for a `Field`.
//!
//! `CursorState` owns the byte offset of the cursor and the scroll position.
//! The text itself stays in `Field`; every method takes it as `buffer: &str`.

use super::text_wrap::{
    BODY_VISIBLE_LINES, Row, columns, is_soft_wrapped, offset_at_column, row_of, wrap_rows,
};

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible row (multi-line) or first visible column (single-line)
    pub scroll_offset: usize,
    /// Inner width seen at the last render, used for vertical movement
    pub last_inner_width: u16,
}

impl CursorState {
    pub fn new(width_hint: u16) -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_inner_width: width_hint,
        }
    }

    /// Move one visual row up (`-1`) or down (`1`), keeping the display column
    /// where the target row is long enough.
    ///
    /// Returns `true` if the cursor moved.
    pub fn move_vertically(&mut self, buffer: &str, direction: i8) -> bool {
        let rows = wrap_rows(buffer, self.last_inner_width);
        let current = row_of(&rows, self.pos);

        let target = match direction {
            d if d < 0 && current > 0 => current - 1,
            d if d > 0 && current + 1 < rows.len() => current + 1,
            _ => return false,
        };

        let col = columns(buffer, rows[current].start, self.pos);
        let mut pos = offset_at_column(buffer, rows[target], col);

        // The end of a soft-wrapped row is drawn on the following row
        if pos == rows[target].end && is_soft_wrapped(&rows, target) {
            pos = last_char_start(buffer, rows[target]);
        }

        self.pos = pos;
        true
    }

    /// Keep the cursor row inside the visible window of a multi-line field.
    /// Returns `(row, column)` of the cursor relative to the window.
    pub fn follow_rows(&mut self, buffer: &str, rows: &[Row]) -> (u16, u16) {
        let row = row_of(rows, self.pos);
        let visible = usize::from(BODY_VISIBLE_LINES);

        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + visible {
            self.scroll_offset = row + 1 - visible;
        }

        let col = columns(buffer, rows[row].start, self.pos);
        (to_u16(row - self.scroll_offset), to_u16(col))
    }

    /// Keep the cursor column inside a single-line window `inner_width` wide.
    /// Returns the cursor column relative to the window.
    pub fn follow_columns(&mut self, buffer: &str, inner_width: u16) -> u16 {
        let col = columns(buffer, 0, self.pos);
        let width = usize::from(inner_width.max(1));

        if col < self.scroll_offset {
            self.scroll_offset = col;
        } else if col >= self.scroll_offset + width {
            self.scroll_offset = col + 1 - width;
        }

        to_u16(col - self.scroll_offset)
    }
}

fn last_char_start(buffer: &str, row: Row) -> usize {
    buffer[row.start..row.end]
        .char_indices()
        .next_back()
        .map(|(i, _)| row.start + i)
        .unwrap_or(row.start)
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
