//! Display projection of a session: which words and letters are correct,
//! wrong, current or not yet reached. Recomputed from `SessionState` on every
//! frame; nothing here is stored.

use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordStatus {
    Upcoming,
    Current,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterStatus {
    Untyped,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterView {
    pub ch: char,
    pub status: LetterStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordView {
    pub status: WordStatus,
    pub letters: Vec<LetterView>,
}

impl WordView {
    pub fn text(&self) -> String {
        self.letters.iter().map(|l| l.ch).collect()
    }
}

pub fn project(state: &SessionState) -> Vec<WordView> {
    state
        .words
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            let status = if idx < state.current_word_index {
                if word.is_correct() {
                    WordStatus::Correct
                } else {
                    WordStatus::Incorrect
                }
            } else if idx == state.current_word_index {
                WordStatus::Current
            } else {
                WordStatus::Upcoming
            };

            WordView {
                status,
                letters: project_letters(&word.correct_word, &word.user_input, status),
            }
        })
        .collect()
}

fn project_letters(correct: &str, input: &str, status: WordStatus) -> Vec<LetterView> {
    let correct: Vec<char> = correct.chars().collect();
    let input: Vec<char> = input.chars().collect();
    let shown = correct.len().max(input.len());

    (0..shown)
        .map(|li| {
            let target = correct.get(li).copied();
            let typed = input.get(li).copied();
            // extra letters past the target show what was typed
            let ch = target.or(typed).unwrap_or(' ');

            let status = match status {
                WordStatus::Correct | WordStatus::Incorrect => {
                    if target == typed {
                        LetterStatus::Correct
                    } else {
                        LetterStatus::Incorrect
                    }
                }
                WordStatus::Current if typed.is_some() => {
                    if target == typed {
                        LetterStatus::Correct
                    } else {
                        LetterStatus::Incorrect
                    }
                }
                WordStatus::Current | WordStatus::Upcoming => LetterStatus::Untyped,
            };

            LetterView { ch, status }
        })
        .collect()
}
