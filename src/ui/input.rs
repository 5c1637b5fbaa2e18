//! Keyboard input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the UI to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Toggle the capture session (start when idle, stop when capturing)
    Toggle,
    /// Quit the application
    Quit,
    /// No action for this key
    None,
}

/// Map a key event to a UI action.
///
/// Space and Enter toggle capture; `q`, Esc, and Ctrl+C quit.
pub fn handle_key_event(event: KeyEvent) -> UiAction {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c' | 'C')) {
        return UiAction::Quit;
    }

    match code {
        KeyCode::Char(' ') | KeyCode::Enter => UiAction::Toggle,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => UiAction::Quit,
        _ => UiAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_space_and_enter_toggle() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            UiAction::Toggle
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            UiAction::Toggle
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            UiAction::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE)),
            UiAction::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            UiAction::Quit
        );
    }

    #[test]
    fn test_other_keys_do_nothing() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            UiAction::None
        );
    }
}
