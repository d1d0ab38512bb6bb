//! # Field
//!
//! A focusable text input: single-line (the title) or multi-line (the body).
//!
//! ## Responsibilities
//!
//! - Own the text buffer and the cursor
//! - Apply edit keys (insert, paste, delete, cursor movement)
//! - Ignore every key while blurred, so the form can forward each key to both
//!   fields and let focus decide which one reacts
//! - Lay the buffer out for a given width (wrapping or horizontal scrolling)
//!
//! Rendering lives in `tui::components::FieldView`; this module only computes
//! what should be visible and where the cursor sits.

mod cursor;
mod text_wrap;

use log::debug;
use unicode_width::UnicodeWidthChar;

use cursor::CursorState;
use text_wrap::{
    VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary, wrap_rows,
};

pub use text_wrap::BODY_VISIBLE_LINES;

/// Editing keys a field understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Newline,
    /// Bracketed paste, newlines preserved
    Paste(String),
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    SingleLine,
    MultiLine,
}

/// What a field shows inside its borders, plus the cursor position
/// relative to the inner area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub lines: Vec<String>,
    pub cursor: (u16, u16),
}

pub struct Field {
    text: String,
    placeholder: String,
    focused: bool,
    width_hint: u16,
    kind: FieldKind,
    cursor: CursorState,
}

impl Field {
    pub fn single_line(placeholder: impl Into<String>, width_hint: u16) -> Self {
        Self::new(FieldKind::SingleLine, placeholder.into(), width_hint)
    }

    pub fn multi_line(placeholder: impl Into<String>, width_hint: u16) -> Self {
        Self::new(FieldKind::MultiLine, placeholder.into(), width_hint)
    }

    fn new(kind: FieldKind, placeholder: String, width_hint: u16) -> Self {
        Self {
            text: String::new(),
            placeholder,
            focused: false,
            width_hint,
            kind,
            cursor: CursorState::new(width_hint),
        }
    }

    /// The buffer exactly as typed.
    pub fn value(&self) -> &str {
        &self.text
    }

    /// Replace the buffer and move the cursor to its end.
    pub fn set_value(&mut self, value: &str) {
        self.text = self.sanitize(value);
        self.cursor.pos = self.text.len();
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn width_hint(&self) -> u16 {
        self.width_hint
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Rows the field occupies on screen, borders included.
    pub fn height(&self) -> u16 {
        match self.kind {
            FieldKind::SingleLine => 1 + VERTICAL_OVERHEAD,
            FieldKind::MultiLine => BODY_VISIBLE_LINES + VERTICAL_OVERHEAD,
        }
    }

    /// Apply an edit key. Returns `true` if the buffer or cursor changed.
    /// A blurred field ignores the key.
    pub fn handle_edit(&mut self, key: &EditKey) -> bool {
        if !self.focused {
            return false;
        }

        let pos = self.cursor.pos;
        match key {
            EditKey::Char(c) => {
                if self.kind == FieldKind::SingleLine && (*c == '\n' || *c == '\r') {
                    return false;
                }
                self.text.insert(pos, *c);
                self.cursor.pos += c.len_utf8();
                true
            }
            EditKey::Newline => {
                if self.kind == FieldKind::SingleLine {
                    return false;
                }
                self.text.insert(pos, '\n');
                self.cursor.pos += 1;
                true
            }
            EditKey::Paste(pasted) => {
                let pasted = self.sanitize(pasted);
                if pasted.is_empty() {
                    return false;
                }
                debug!("Paste of {} bytes into {:?} field", pasted.len(), self.kind);
                self.text.insert_str(pos, &pasted);
                self.cursor.pos += pasted.len();
                true
            }
            EditKey::Backspace => {
                if pos == 0 {
                    return false;
                }
                let prev = prev_char_boundary(&self.text, pos);
                self.text.drain(prev..pos);
                self.cursor.pos = prev;
                true
            }
            EditKey::Delete => {
                if pos >= self.text.len() {
                    return false;
                }
                let next = next_char_boundary(&self.text, pos);
                self.text.drain(pos..next);
                true
            }
            EditKey::Left => {
                if pos == 0 {
                    return false;
                }
                self.cursor.pos = prev_char_boundary(&self.text, pos);
                true
            }
            EditKey::Right => {
                if pos >= self.text.len() {
                    return false;
                }
                self.cursor.pos = next_char_boundary(&self.text, pos);
                true
            }
            EditKey::Home => {
                let line_start = self.text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
                self.cursor.pos = line_start;
                pos != line_start
            }
            EditKey::End => {
                let line_end = self.text[pos..]
                    .find('\n')
                    .map(|i| pos + i)
                    .unwrap_or(self.text.len());
                self.cursor.pos = line_end;
                pos != line_end
            }
            EditKey::Up => {
                self.kind == FieldKind::MultiLine && self.cursor.move_vertically(&self.text, -1)
            }
            EditKey::Down => {
                self.kind == FieldKind::MultiLine && self.cursor.move_vertically(&self.text, 1)
            }
        }
    }

    /// Lay the buffer out inside a bordered area `outer_width` columns wide,
    /// scrolling so that the cursor stays visible.
    pub fn viewport(&mut self, outer_width: u16) -> Viewport {
        let width = inner_width(outer_width);
        self.cursor.last_inner_width = width;

        match self.kind {
            FieldKind::SingleLine => {
                let col = self.cursor.follow_columns(&self.text, width);
                let line = slice_columns(&self.text, self.cursor.scroll_offset, width);
                Viewport {
                    lines: vec![line],
                    cursor: (col.min(width.saturating_sub(1)), 0),
                }
            }
            FieldKind::MultiLine => {
                let rows = wrap_rows(&self.text, width);
                let (row, col) = self.cursor.follow_rows(&self.text, &rows);
                let lines = rows
                    .iter()
                    .skip(self.cursor.scroll_offset)
                    .take(usize::from(BODY_VISIBLE_LINES))
                    .map(|r| self.text[r.start..r.end].to_string())
                    .collect();
                Viewport {
                    lines,
                    cursor: (col.min(width.saturating_sub(1)), row),
                }
            }
        }
    }

    /// Single-line fields flatten line breaks to spaces; multi-line fields
    /// normalize CRLF and lone CR to LF.
    fn sanitize(&self, text: &str) -> String {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        match self.kind {
            FieldKind::SingleLine => normalized.replace('\n', " "),
            FieldKind::MultiLine => normalized,
        }
    }
}

/// The part of `text` starting `skip` columns in and at most `width` wide.
/// A wide character cut by the left edge shows as spaces so every visible
/// character keeps its screen column.
fn slice_columns(text: &str, skip: usize, width: u16) -> String {
    let width = usize::from(width);
    let mut col = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if col >= skip {
            if col + w > skip + width {
                break;
            }
            out.push(c);
        } else if col + w > skip {
            out.extend(std::iter::repeat_n(' ', col + w - skip));
        }
        col += w;
    }
    out
}
