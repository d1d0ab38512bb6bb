use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::action::Action;
use crate::core::field::EditKey;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Form commands
    ForceQuit,
    Submit,
    SwitchField,

    // Forwarded to the fields
    Edit(EditKey),

    // TUI-local
    Resize,
}

impl TuiEvent {
    /// The core action for this event, if it has one.
    pub fn into_action(self) -> Option<Action> {
        match self {
            TuiEvent::ForceQuit => Some(Action::Quit),
            TuiEvent::Submit => Some(Action::Submit),
            TuiEvent::SwitchField => Some(Action::ToggleFocus),
            TuiEvent::Edit(key) => Some(Action::Edit(key)),
            TuiEvent::Resize => None,
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key_event(key_event)
        }
        Event::Paste(data) => Some(TuiEvent::Edit(EditKey::Paste(data))),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    })
}

/// Translate a key press into a `TuiEvent`. Key releases are dropped.
pub fn map_key_event(key: KeyEvent) -> Option<TuiEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => Some(TuiEvent::ForceQuit),
        KeyCode::Char('q') | KeyCode::Char('Q') if ctrl => Some(TuiEvent::Submit),
        // Other control chords are not text
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Tab => Some(TuiEvent::SwitchField),
        KeyCode::Char(c) => Some(TuiEvent::Edit(EditKey::Char(c))),
        KeyCode::Enter => Some(TuiEvent::Edit(EditKey::Newline)),
        KeyCode::Backspace => Some(TuiEvent::Edit(EditKey::Backspace)),
        KeyCode::Delete => Some(TuiEvent::Edit(EditKey::Delete)),
        KeyCode::Left => Some(TuiEvent::Edit(EditKey::Left)),
        KeyCode::Right => Some(TuiEvent::Edit(EditKey::Right)),
        KeyCode::Up => Some(TuiEvent::Edit(EditKey::Up)),
        KeyCode::Down => Some(TuiEvent::Edit(EditKey::Down)),
        KeyCode::Home => Some(TuiEvent::Edit(EditKey::Home)),
        KeyCode::End => Some(TuiEvent::Edit(EditKey::End)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_bindings() {
        assert_eq!(
            map_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            map_key_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Submit)
        );
        assert_eq!(
            map_key_event(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(TuiEvent::SwitchField)
        );
    }

    #[test]
    fn test_plain_q_is_text() {
        assert_eq!(
            map_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(TuiEvent::Edit(EditKey::Char('q')))
        );
        assert_eq!(
            map_key_event(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(TuiEvent::Edit(EditKey::Char('Q')))
        );
    }

    #[test]
    fn test_unbound_control_chords_are_dropped() {
        assert_eq!(map_key_event(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_enter_is_newline_edit() {
        assert_eq!(
            map_key_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(TuiEvent::Edit(EditKey::Newline))
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut release = key(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(release), None);
    }

    #[test]
    fn test_into_action() {
        assert_eq!(TuiEvent::ForceQuit.into_action(), Some(Action::Quit));
        assert_eq!(TuiEvent::Submit.into_action(), Some(Action::Submit));
        assert_eq!(TuiEvent::SwitchField.into_action(), Some(Action::ToggleFocus));
        assert_eq!(
            TuiEvent::Edit(EditKey::Backspace).into_action(),
            Some(Action::Edit(EditKey::Backspace))
        );
        assert_eq!(TuiEvent::Resize.into_action(), None);
    }
}
