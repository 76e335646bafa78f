use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C — always quits regardless of state.
    ForceQuit,
    /// Esc — dismiss result/error, or cancel an in-flight generation.
    Escape,
    /// Enter — trigger generation.
    Submit,
    InputChar(char),
    /// Bracketed paste - inserted into the focused field
    Paste(String),
    Backspace,
    /// Tab — focus next brief field.
    FocusNext,
    /// Shift+Tab — focus previous brief field.
    FocusPrev,
    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    translate(event::read().ok()?)
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Maps a raw crossterm event to a `TuiEvent`.
fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                // Terminals report Shift+Tab as BackTab; the SHIFT modifier
                // may or may not accompany it.
                (_, KeyCode::BackTab) => Some(TuiEvent::FocusPrev),
                (_, KeyCode::Tab) => Some(TuiEvent::FocusNext),
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                _ => None,
            }
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
