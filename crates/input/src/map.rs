//! Key mapping from terminal events to game controls.

use crate::intents::Button;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the control it holds down.
pub fn button_for_key(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Left
        | KeyCode::Char('a')
        | KeyCode::Char('A')
        | KeyCode::Char('h')
        | KeyCode::Char('H') => Some(Button::Left),
        KeyCode::Right
        | KeyCode::Char('d')
        | KeyCode::Char('D')
        | KeyCode::Char('l')
        | KeyCode::Char('L') => Some(Button::Right),
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char(' ') => Some(Button::Rotate),
        KeyCode::Down
        | KeyCode::Char('s')
        | KeyCode::Char('S')
        | KeyCode::Char('j')
        | KeyCode::Char('J') => Some(Button::SoftDrop),
        _ => None,
    }
}

/// Check if key should start a new round.
pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(button_for_key(KeyCode::Left), Some(Button::Left));
        assert_eq!(button_for_key(KeyCode::Char('H')), Some(Button::Left));
        assert_eq!(button_for_key(KeyCode::Right), Some(Button::Right));
        assert_eq!(button_for_key(KeyCode::Char('d')), Some(Button::Right));
        assert_eq!(button_for_key(KeyCode::Down), Some(Button::SoftDrop));
        assert_eq!(button_for_key(KeyCode::Char('j')), Some(Button::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(button_for_key(KeyCode::Up), Some(Button::Rotate));
        assert_eq!(button_for_key(KeyCode::Char(' ')), Some(Button::Rotate));
        assert_eq!(button_for_key(KeyCode::Char('W')), Some(Button::Rotate));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(button_for_key(KeyCode::Char('x')), None);
        assert_eq!(button_for_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_quit_and_restart_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(is_restart(KeyEvent::from(KeyCode::Char('R'))));
        assert!(!is_restart(KeyEvent::from(KeyCode::Char('q'))));
    }
}
