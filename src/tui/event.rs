use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use log::{debug, warn};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global shortcuts
    ForceQuit,          // Ctrl+C / Ctrl+Q
    NewConversation,    // Ctrl+N
    DeleteConversation, // Ctrl+D, deletes the conversation on screen
    ToggleSidebar,      // Ctrl+B
    ToggleVoice,        // Ctrl+L
    Suggestion(usize),  // F1..F3 on the welcome screen

    // Navigation and editing
    FocusNext, // Tab switches between input and sidebar
    Submit,
    Escape,
    InputChar(char),
    Paste(String), // Bracketed paste
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    CursorUp,
    CursorDown,

    // Transcript scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,

    MouseClick(u16, u16),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Failed to poll terminal events: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => map_event(event),
        Err(e) => {
            warn!("Failed to read terminal event: {}", e);
            None
        }
    }
}

pub fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse.column, mouse.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<TuiEvent> {
    // The keyboard enhancement protocol also reports releases
    if key.kind == KeyEventKind::Release {
        return None;
    }
    debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let event = match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => TuiEvent::ForceQuit,
        KeyCode::Char('n') if ctrl => TuiEvent::NewConversation,
        KeyCode::Char('d') if ctrl => TuiEvent::DeleteConversation,
        KeyCode::Char('b') if ctrl => TuiEvent::ToggleSidebar,
        KeyCode::Char('l') if ctrl => TuiEvent::ToggleVoice,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => TuiEvent::InputChar(c),
        KeyCode::F(n @ 1..=3) => TuiEvent::Suggestion(usize::from(n - 1)),
        KeyCode::Tab | KeyCode::BackTab => TuiEvent::FocusNext,
        KeyCode::Enter => TuiEvent::Submit,
        KeyCode::Esc => TuiEvent::Escape,
        KeyCode::Backspace => TuiEvent::Backspace,
        KeyCode::Delete => TuiEvent::Delete,
        KeyCode::Left => TuiEvent::CursorLeft,
        KeyCode::Right => TuiEvent::CursorRight,
        KeyCode::Home => TuiEvent::CursorHome,
        KeyCode::End => TuiEvent::CursorEnd,
        KeyCode::Up => TuiEvent::CursorUp,
        KeyCode::Down => TuiEvent::CursorDown,
        KeyCode::PageUp => TuiEvent::ScrollPageUp,
        KeyCode::PageDown => TuiEvent::ScrollPageDown,
        _ => return None,
    };
    Some(event)
}
