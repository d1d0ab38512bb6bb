//! # Actions
//!
//! Everything that can happen to the form becomes an `Action`.
//! User presses Ctrl+Q? That's `Action::Submit`.
//! The background append finishes? That's `Action::AppendFinished(result)`.
//!
//! The `update()` function takes the current form and an action, mutates the
//! form, and returns an `Effect` for the adapter to carry out. No I/O here.
//!
//! ```text
//! Form + Action  →  update()  →  Form' + Effect
//! ```
//!
//! Phases:
//!
//! ```text
//!            Submit                    AppendFinished(Ok)
//! Editing ───────────▶ Submitting ───────────────────────▶ Terminated(Submitted)
//!    ▲                     │
//!    └─────────────────────┘ AppendFinished(Err): last_error set
//!
//! Quit from any phase ─────────────────────────────────────▶ Terminated(Cancelled)
//! ```

use log::{debug, info, warn};

use crate::core::field::EditKey;
use crate::core::focus::toggle_focus;
use crate::core::format::format_entry;
use crate::core::state::{Form, Outcome, Phase};
use crate::sink::AppendError;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Switch keyboard focus to the other field (Tab).
    ToggleFocus,
    /// Format and append the entry (Ctrl+Q).
    Submit,
    /// Stop immediately without waiting for an in-flight append (Ctrl+C).
    Quit,
    /// An editing key; offered to both fields, only the focused one reacts.
    Edit(EditKey),
    /// Completion message from the background append.
    AppendFinished(Result<(), AppendError>),
}

/// Work the adapter must do after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Run the sink with this formatted entry off the event loop.
    SpawnAppend(String),
    /// Leave the event loop.
    Quit,
}

pub fn update(form: &mut Form, action: Action) -> Effect {
    if let Phase::Terminated(_) = form.phase {
        debug!("Ignoring {:?} after termination", action);
        return Effect::Quit;
    }

    match action {
        Action::Quit => {
            info!("Quit requested during {:?}", form.phase);
            form.phase = Phase::Terminated(Outcome::Cancelled);
            Effect::Quit
        }
        Action::ToggleFocus => {
            form.focus = toggle_focus(form.focus, &mut form.title, &mut form.body);
            debug!("Focus moved to {:?}", form.focus);
            Effect::None
        }
        Action::Edit(key) => {
            form.title.handle_edit(&key);
            form.body.handle_edit(&key);
            Effect::None
        }
        Action::Submit => match form.phase {
            Phase::Editing => {
                let entry = format_entry(form.title.value(), form.body.value());
                info!(
                    "Submitting entry ({} bytes) to {}",
                    entry.len(),
                    form.destination
                );
                form.phase = Phase::Submitting;
                Effect::SpawnAppend(entry)
            }
            _ => {
                debug!("Submit ignored: append already in flight");
                Effect::None
            }
        },
        Action::AppendFinished(result) => {
            if form.phase != Phase::Submitting {
                warn!("Stale append result ignored: {:?}", result);
                return Effect::None;
            }
            match result {
                Ok(()) => {
                    info!("Append succeeded");
                    form.phase = Phase::Terminated(Outcome::Submitted);
                    Effect::Quit
                }
                Err(e) => {
                    warn!("Append failed: {}", e);
                    form.last_error = Some(e);
                    form.phase = Phase::Editing;
                    Effect::None
                }
            }
        }
    }
}
