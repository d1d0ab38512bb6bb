//! Row layout and dimensional constants for fields.
//!
//! Pure helpers: they know nothing about `Field` or `CursorState`, only about
//! strings, byte offsets and terminal columns.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Left + right border consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Content rows shown by the multi-line field before it scrolls
pub const BODY_VISIBLE_LINES: u16 = 6;

/// A visual row of the buffer, as a byte range (`end` is exclusive and never
/// includes the `'\n'` that terminates a logical line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row {
    pub start: usize,
    pub end: usize,
}

/// Width left for text once the borders are subtracted (0 if too narrow).
pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Split `text` into rows no wider than `width` columns.
///
/// Every logical line produces at least one row, so an empty buffer yields a
/// single empty row. Long lines are broken at character boundaries.
pub(super) fn wrap_rows(text: &str, width: u16) -> Vec<Row> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let mut row_start = line_start;
        let mut col = 0;
        for (idx, c) in line.char_indices() {
            let w = c.width().unwrap_or(0);
            if col > 0 && col + w > width {
                rows.push(Row {
                    start: row_start,
                    end: line_start + idx,
                });
                row_start = line_start + idx;
                col = 0;
            }
            col += w;
        }
        rows.push(Row {
            start: row_start,
            end: line_start + line.len(),
        });
        line_start += line.len() + 1;
    }

    rows
}

/// Index of the row holding byte offset `pos`.
///
/// At a soft wrap the end of one row is the start of the next; the cursor
/// belongs to the later row there.
pub(super) fn row_of(rows: &[Row], pos: usize) -> usize {
    rows.iter().rposition(|row| row.start <= pos).unwrap_or(0)
}

/// Whether `rows[idx]` continues on the next row without a newline.
pub(super) fn is_soft_wrapped(rows: &[Row], idx: usize) -> bool {
    rows.get(idx + 1)
        .is_some_and(|next| next.start == rows[idx].end)
}

/// Display columns between `from` and `to` in `text`.
pub(super) fn columns(text: &str, from: usize, to: usize) -> usize {
    text[from..to].width()
}

/// Byte offset inside `row` closest to display column `col` (without passing it).
pub(super) fn offset_at_column(text: &str, row: Row, col: usize) -> usize {
    let mut acc = 0;
    for (idx, c) in text[row.start..row.end].char_indices() {
        let w = c.width().unwrap_or(0);
        if acc + w > col {
            return row.start + idx;
        }
        acc += w;
    }
    row.end
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
