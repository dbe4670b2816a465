//! Key binding definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::NavKey;

/// Maps physical keys onto suggestion-list navigation.
///
/// Arrow keys and Enter always work. With `emacs_nav` on, Ctrl+P/Ctrl+N
/// also move the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Whether Ctrl+P/Ctrl+N navigate.
    pub emacs_nav: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(emacs_nav: bool) -> Self {
        Self { emacs_nav }
    }

    /// Classify a key press.
    ///
    /// Key releases are `Other`. Enter only commits on press, so a held
    /// Enter never commits twice.
    pub fn classify(&self, key: &KeyEvent) -> NavKey {
        if key.kind == KeyEventKind::Release {
            return NavKey::Other;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Up, KeyModifiers::NONE) => NavKey::Previous,
            (KeyCode::Down, KeyModifiers::NONE) => NavKey::Next,
            (KeyCode::Char('p'), KeyModifiers::CONTROL) if self.emacs_nav => NavKey::Previous,
            (KeyCode::Char('n'), KeyModifiers::CONTROL) if self.emacs_nav => NavKey::Next,
            (KeyCode::Enter, KeyModifiers::NONE) if key.kind == KeyEventKind::Press => {
                NavKey::Commit
            }
            _ => NavKey::Other,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn test_arrow_keys() {
        let bindings = KeyBindings::default();
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(bindings.classify(&up), NavKey::Previous);
        assert_eq!(bindings.classify(&down), NavKey::Next);
    }

    #[test]
    fn test_enter_commits() {
        let bindings = KeyBindings::default();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(bindings.classify(&enter), NavKey::Commit);
    }

    #[test]
    fn test_emacs_nav() {
        let ctrl_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);

        let bindings = KeyBindings::new(true);
        assert_eq!(bindings.classify(&ctrl_p), NavKey::Previous);
        assert_eq!(bindings.classify(&ctrl_n), NavKey::Next);

        let bindings = KeyBindings::new(false);
        assert_eq!(bindings.classify(&ctrl_p), NavKey::Other);
        assert_eq!(bindings.classify(&ctrl_n), NavKey::Other);
    }

    #[test]
    fn test_plain_characters_are_other() {
        let bindings = KeyBindings::default();
        let j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        let n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(bindings.classify(&j), NavKey::Other);
        assert_eq!(bindings.classify(&n), NavKey::Other);
    }

    #[test]
    fn test_release_is_other() {
        let bindings = KeyBindings::default();
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(bindings.classify(&release), NavKey::Other);
    }
}
