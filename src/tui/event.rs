use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    // Deck commands (mapped to core::action::Action)
    Next,     // Right, Space
    Previous, // Left, Backspace
    NextPage, // n, PageDown
    PrevPage, // p, PageUp
    FirstPage,
    LastPage,
    Reload,
    Quit, // q, Esc

    // TUI-local events (handled directly in TUI)
    ToggleContents,
    Select, // Enter: next block on slides, open on lists
    ScrollUp,
    ScrollDown,
    ForceQuit, // Ctrl+C, never swallowed by an overlay
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {e}");
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) => map_key(key_event),
        Ok(Event::Mouse(mouse_event)) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Ok(Event::Resize(..)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Event read failed: {e}");
            None
        }
    }
}

/// Translate one key press. Releases are dropped: Windows terminals report
/// both edges and every key would otherwise step twice.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Enter) => Some(TuiEvent::Select),
        (_, KeyCode::Right) | (_, KeyCode::Char(' ')) => Some(TuiEvent::Next),
        (_, KeyCode::Left) | (_, KeyCode::Backspace) => Some(TuiEvent::Previous),
        (_, KeyCode::PageDown) | (_, KeyCode::Char('n')) => Some(TuiEvent::NextPage),
        (_, KeyCode::PageUp) | (_, KeyCode::Char('p')) => Some(TuiEvent::PrevPage),
        (_, KeyCode::Home) => Some(TuiEvent::FirstPage),
        (_, KeyCode::End) => Some(TuiEvent::LastPage),
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(TuiEvent::ScrollUp),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(TuiEvent::ScrollDown),
        (_, KeyCode::Char('t')) => Some(TuiEvent::ToggleContents),
        (_, KeyCode::Char('r')) => Some(TuiEvent::Reload),
        (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
        _ => None,
    }
}
