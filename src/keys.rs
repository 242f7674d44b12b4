use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// A key as the race controller sees it, independent of the terminal backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Space,
    Tab,
    Backspace,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Single ASCII letter, the only keys allowed to start a word
    pub fn is_letter(&self) -> bool {
        matches!(self, Key::Char(c) if c.is_ascii_alphabetic())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn char(c: char) -> Self {
        if c == ' ' {
            Self::new(Key::Space)
        } else {
            Self::new(Key::Char(c))
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn is_chord(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Key presses for typing `text` verbatim, spaces included
    pub fn sequence(text: &str) -> Vec<KeyPress> {
        text.chars().map(KeyPress::char).collect()
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        let key = match event.code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Tab | KeyCode::BackTab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            _ => Key::Other,
        };

        Self {
            key,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            meta: event
                .modifiers
                .intersects(KeyModifiers::SUPER | KeyModifiers::META),
        }
    }
}
