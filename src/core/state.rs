//! # Form State
//!
//! Everything the capture form knows, in one place:
//!
//! ```text
//! Form
//! ├── title: Field                  // single-line, focused at start
//! ├── body: Field                   // multi-line
//! ├── focus: FocusedField           // which field owns the keyboard
//! ├── phase: Phase                  // Editing → Submitting → Terminated
//! ├── last_error: Option<AppendError>
//! └── destination: NoteDestination  // fixed for the run
//! ```
//!
//! State changes only happen through `update(form, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::field::Field;
use crate::core::focus::FocusedField;
use crate::sink::{AppendError, NoteDestination};

/// Why the form stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The entry was appended.
    Submitted,
    /// The user quit (possibly while an append was in flight).
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    /// An append is in flight; further submits are ignored.
    Submitting,
    Terminated(Outcome),
}

pub struct Form {
    pub title: Field,
    pub body: Field,
    pub focus: FocusedField,
    pub phase: Phase,
    pub last_error: Option<AppendError>,
    pub destination: NoteDestination,
}

impl Form {
    pub fn new(
        destination: NoteDestination,
        title_placeholder: &str,
        body_placeholder: &str,
        width: u16,
    ) -> Self {
        let mut title = Field::single_line(title_placeholder, width);
        title.focus();

        Self {
            title,
            body: Field::multi_line(body_placeholder, width),
            focus: FocusedField::Title,
            phase: Phase::Editing,
            last_error: None,
            destination,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            NoteDestination::new(config.note.clone()),
            &config.title_placeholder,
            &config.body_placeholder,
            config.width,
        )
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// `Some` once the form has reached its terminal phase.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }
}
