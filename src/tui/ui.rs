use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::Form;
use crate::tui::component::Component;
use crate::tui::components::{FieldView, StatusLine};

/// Draw the whole form: title, body, then the status lines.
///
/// The form is as wide as its configured width plus borders, or the whole
/// terminal if that is narrower.
pub fn draw_ui(frame: &mut Frame, form: &mut Form, spinner_frame: usize) {
    let area = form_area(frame.area(), form.body.width_hint());

    let mut status = StatusLine {
        error: form.last_error.as_ref().map(ToString::to_string),
        submitting: form.is_submitting(),
        destination: form.destination.to_string(),
        spinner_frame,
    };

    use Constraint::{Length, Min};
    let layout = Layout::vertical([
        Length(form.title.height()),
        Length(form.body.height()),
        Length(status.height(area.width)),
        Min(0),
    ]);
    let [title_area, body_area, status_area, _] = layout.areas(area);

    FieldView::new(&mut form.title).render(frame, title_area);
    FieldView::new(&mut form.body).render(frame, body_area);
    status.render(frame, status_area);
}

fn form_area(screen: Rect, width_hint: u16) -> Rect {
    Rect {
        width: screen.width.min(width_hint.saturating_add(2)),
        ..screen
    }
}
