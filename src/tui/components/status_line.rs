//! # StatusLine Component
//!
//! The lines under the form: an append error (if the last attempt failed),
//! an "appending" spinner while a submit is in flight, and the key help.
//!
//! Stateless. Every field is a prop filled in by `draw_ui` each frame:
//!
//! ```rust,ignore
//! let mut status = StatusLine {
//!     error: form.last_error.as_ref().map(ToString::to_string),
//!     submitting: form.is_submitting(),
//!     destination: form.destination.to_string(),
//!     spinner_frame,
//! };
//! status.render(frame, status_area);
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const HELP_TEXT: &str = "(ctrl+c to quit, ctrl+q to submit, tab to switch field)";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusLine {
    /// Message of the last failed append, if any
    pub error: Option<String>,
    pub submitting: bool,
    pub destination: String,
    pub spinner_frame: usize,
}

impl StatusLine {
    /// The lines this status would draw at `width` columns.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if let Some(error) = &self.error {
            let wrap_width = usize::from(width.max(1));
            let error_style = Style::default().fg(Color::Red);
            for part in textwrap::wrap(&format!("Append failed: {error}"), wrap_width) {
                lines.push(Line::styled(part.into_owned(), error_style));
            }
        }

        if self.submitting {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            lines.push(Line::styled(
                format!("{spinner} Appending to {}…", self.destination),
                Style::default().fg(Color::Yellow),
            ));
        }

        lines.push(Line::styled(
            HELP_TEXT,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        ));
        lines
    }

    /// Rows needed at `width` columns.
    pub fn height(&self, width: u16) -> u16 {
        u16::try_from(self.lines(width).len()).unwrap_or(u16::MAX)
    }
}

impl Component for StatusLine {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.lines(area.width)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn status(error: Option<&str>, submitting: bool) -> StatusLine {
        StatusLine {
            error: error.map(str::to_string),
            submitting,
            destination: "inbox.md".to_string(),
            spinner_frame: 0,
        }
    }

    fn screen_text(status: &mut StatusLine, width: u16) -> String {
        let backend = TestBackend::new(width, status.height(width));
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| status.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_idle_shows_only_help() {
        let mut status = status(None, false);
        assert_eq!(status.height(80), 1);

        let text = screen_text(&mut status, 80);
        assert!(text.contains("ctrl+c to quit"));
        assert!(text.contains("ctrl+q to submit"));
        assert!(!text.contains("Append"));
    }

    #[test]
    fn test_submitting_shows_destination() {
        let mut status = status(None, true);
        assert_eq!(status.height(80), 2);

        let text = screen_text(&mut status, 80);
        assert!(text.contains("Appending to inbox.md"));
    }

    #[test]
    fn test_error_is_shown_in_red() {
        let mut status = status(Some("failed to write inbox.md: disk full"), false);
        let backend = TestBackend::new(80, status.height(80));
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| status.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let first_row: String = (0..80).map(|x| buffer[(x, 0)].symbol()).collect();
        assert!(first_row.contains("Append failed: failed to write inbox.md: disk full"));
        assert_eq!(buffer[(0, 0)].fg, Color::Red);
    }

    #[test]
    fn test_long_error_wraps() {
        let status = status(
            Some("the obsidian-cli program exited with status 1 and printed nothing useful"),
            false,
        );
        // Error spans several rows at a narrow width, help stays last
        assert!(status.height(30) > 2);
        assert_eq!(status.height(200), 2);
    }

    #[test]
    fn test_spinner_advances() {
        let first = status(None, true).lines(80);
        let mut later = status(None, true);
        later.spinner_frame = 3;
        assert_ne!(first, later.lines(80));
    }
}
