use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive their data as struct fields ("props") and render into
/// a `Frame` within a given `Rect`.
///
/// `render` takes `&mut self` so a component wrapping mutable state (such as
/// a field's scroll position) can update it during the render pass, in the
/// spirit of ratatui's `StatefulWidget`.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
