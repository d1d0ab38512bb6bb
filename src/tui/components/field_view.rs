//! # FieldView Component
//!
//! Draws one `core::field::Field` inside a rounded border.
//!
//! The field itself decides what is visible (`Field::viewport`); this
//! component only styles it and places the terminal cursor. An empty field
//! shows its placeholder dimmed, and only the focused field gets the cursor.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::field::Field;
use crate::tui::component::Component;

pub struct FieldView<'a> {
    pub field: &'a mut Field,
}

impl<'a> FieldView<'a> {
    pub fn new(field: &'a mut Field) -> Self {
        Self { field }
    }
}

impl Component for FieldView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.field.is_focused();
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let viewport = self.field.viewport(area.width);

        let lines: Vec<Line> = if self.field.value().is_empty() {
            vec![Line::styled(
                self.field.placeholder().to_string(),
                Style::default().fg(Color::DarkGray),
            )]
        } else {
            viewport.lines.into_iter().map(Line::raw).collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);

        if focused {
            let (col, row) = viewport.cursor;
            // Keep the cursor inside the border even on a squeezed terminal
            let max_x = area.right().saturating_sub(2).max(area.x);
            let max_y = area.bottom().saturating_sub(2).max(area.y);
            let x = (area.x + 1).saturating_add(col).min(max_x);
            let y = (area.y + 1).saturating_add(row).min(max_y);
            frame.set_cursor_position((x, y));
        }
    }
}
