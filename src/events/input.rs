//! Input event types and key binding matching.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            _ => Key::Other,
        }
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// A processed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers::from(event.modifiers),
        }
    }
}

impl InputEvent {
    /// Get the character if this is a character input.
    pub fn char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) => Some(c),
            _ => None,
        }
    }

    /// Check if this matches a key binding string (e.g., "Ctrl+q", "Enter").
    pub fn matches(&self, binding: &str) -> bool {
        let mut expected = Modifiers::default();
        let mut expected_key = "";

        for part in binding.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" => expected.ctrl = true,
                "alt" => expected.alt = true,
                "shift" => expected.shift = true,
                _ => expected_key = part,
            }
        }

        if self.modifiers.ctrl != expected.ctrl || self.modifiers.alt != expected.alt {
            return false;
        }

        match expected_key.to_lowercase().as_str() {
            "enter" => self.key == Key::Enter,
            "esc" | "escape" => self.key == Key::Escape,
            "backspace" => self.key == Key::Backspace,
            "tab" => self.key == Key::Tab,
            "up" => self.key == Key::Up,
            "down" => self.key == Key::Down,
            "left" => self.key == Key::Left,
            "right" => self.key == Key::Right,
            s if s.len() == 1 => match s.chars().next() {
                Some(c) => {
                    self.key == Key::Char(c) || self.key == Key::Char(c.to_ascii_uppercase())
                }
                None => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(key: Key) -> InputEvent {
        InputEvent {
            key,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn matches_named_keys() {
        assert!(plain(Key::Enter).matches("Enter"));
        assert!(plain(Key::Escape).matches("Esc"));
        assert!(!plain(Key::Enter).matches("Esc"));
    }

    #[test]
    fn matches_characters_case_insensitively() {
        assert!(plain(Key::Char('q')).matches("q"));
        assert!(plain(Key::Char('Q')).matches("q"));
        assert!(!plain(Key::Char('w')).matches("q"));
    }

    #[test]
    fn modifiers_must_agree() {
        let ctrl_q = InputEvent {
            key: Key::Char('q'),
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        };
        assert!(ctrl_q.matches("Ctrl+q"));
        assert!(!ctrl_q.matches("q"));
        assert!(!plain(Key::Char('q')).matches("Ctrl+q"));
    }
}
