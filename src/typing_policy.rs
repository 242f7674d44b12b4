use crate::keys::{Key, KeyPress};

/// Characters a word slot may hold past its target length
pub const MAX_OVERFLOW: usize = 7;

/// What a key press means for the current word, before any state changes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyClass {
    /// ctrl/meta held; left to the host
    Chord,
    /// allow-listed non-letter (focus navigation); left to the host
    Allowed,
    /// non-letter while the field is empty; withheld
    StrayAtWordStart,
    /// space with a non-empty field; submits the word
    Submit,
    Letter,
    /// any other key once the word has been started
    Editing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypingPolicy {
    pub max_overflow: usize,
    pub allowed_keys: Vec<Key>,
}

impl Default for TypingPolicy {
    fn default() -> Self {
        Self {
            max_overflow: MAX_OVERFLOW,
            allowed_keys: vec![Key::Tab],
        }
    }
}

impl TypingPolicy {
    pub fn new(max_overflow: usize, allowed_keys: Vec<Key>) -> Self {
        Self {
            max_overflow,
            allowed_keys,
        }
    }

    pub fn classify(&self, press: &KeyPress, current_input: &str) -> KeyClass {
        if press.is_chord() {
            return KeyClass::Chord;
        }

        if !press.key.is_letter() {
            if self.allowed_keys.contains(&press.key) {
                return KeyClass::Allowed;
            }
            if current_input.is_empty() {
                return KeyClass::StrayAtWordStart;
            }
        }

        match press.key {
            Key::Space => KeyClass::Submit,
            key if key.is_letter() => KeyClass::Letter,
            _ => KeyClass::Editing,
        }
    }

    /// Whether `value` fits in a slot whose target is `correct_word`
    pub fn accepts(&self, correct_word: &str, value: &str) -> bool {
        value.chars().count() <= correct_word.chars().count() + self.max_overflow
    }
}
