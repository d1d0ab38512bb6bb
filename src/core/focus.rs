//! # Focus
//!
//! Exactly one of the two fields owns the keyboard at any time.
//! Tab flips it; nothing else does.

use crate::core::field::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedField {
    #[default]
    Title,
    Body,
}

impl FocusedField {
    /// The field that is not this one.
    pub fn other(self) -> Self {
        match self {
            FocusedField::Title => FocusedField::Body,
            FocusedField::Body => FocusedField::Title,
        }
    }
}

/// Blur the focused field and focus the other one. Returns the new focus.
pub fn toggle_focus(current: FocusedField, title: &mut Field, body: &mut Field) -> FocusedField {
    let next = current.other();
    match next {
        FocusedField::Title => {
            body.blur();
            title.focus();
        }
        FocusedField::Body => {
            title.blur();
            body.focus();
        }
    }
    next
}
