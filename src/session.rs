use std::time::{Duration, Instant};

/// One fixed-position word slot of a round
#[derive(Debug, Clone, PartialEq)]
pub struct WordResult {
    pub correct_word: String,
    pub user_input: String,
    /// set when the first character lands in this slot
    pub started_at: Option<Instant>,
    /// set when the slot is submitted
    pub elapsed: Option<Duration>,
}

impl WordResult {
    pub fn new(correct_word: impl Into<String>) -> Self {
        Self {
            correct_word: correct_word.into(),
            user_input: String::new(),
            started_at: None,
            elapsed: None,
        }
    }

    /// Exact match only, no partial credit
    pub fn is_correct(&self) -> bool {
        self.user_input == self.correct_word
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Shuffled,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub words: Vec<WordResult>,
    pub current_word_index: usize,
    pub current_input: String,
    pub started_at: Option<Instant>,
    pub ended_at: Option<Instant>,
    pub words_per_minute: Option<f64>,
}

impl SessionState {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(WordResult::new).collect(),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_word_index >= self.words.len()
    }

    pub fn phase(&self) -> Phase {
        if self.is_complete() {
            Phase::Complete
        } else if self.started_at.is_some() {
            Phase::InProgress
        } else {
            Phase::Shuffled
        }
    }

    pub fn current_word(&self) -> Option<&WordResult> {
        self.words.get(self.current_word_index)
    }

    pub fn current_word_mut(&mut self) -> Option<&mut WordResult> {
        self.words.get_mut(self.current_word_index)
    }

    /// Words already submitted, frozen
    pub fn submitted(&self) -> &[WordResult] {
        &self.words[..self.current_word_index.min(self.words.len())]
    }

    /// Whole-round duration once both ends are known
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some(end.saturating_duration_since(start)),
            _ => None,
        }
    }

    pub fn target_words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.correct_word.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_shuffled_phase() {
        let state = SessionState::new(["air", "and"]);
        assert_eq!(state.words.len(), 2);
        assert_eq!(state.current_word_index, 0);
        assert_eq!(state.phase(), Phase::Shuffled);
        assert!(state.words.iter().all(|w| w.user_input.is_empty()));
        assert!(state.words.iter().all(|w| w.elapsed.is_none()));
        assert_eq!(state.current_word().unwrap().correct_word, "air");
        assert!(state.submitted().is_empty());
    }

    #[test]
    fn phase_follows_start_and_index() {
        let mut state = SessionState::new(["air"]);
        state.started_at = Some(Instant::now());
        assert_eq!(state.phase(), Phase::InProgress);
        state.current_word_index = 1;
        assert_eq!(state.phase(), Phase::Complete);
        assert!(state.current_word().is_none());
        assert_eq!(state.submitted().len(), 1);
    }

    #[test]
    fn elapsed_needs_both_ends() {
        let mut state = SessionState::new(["air"]);
        let start = Instant::now();
        state.started_at = Some(start);
        assert_eq!(state.elapsed(), None);
        state.ended_at = Some(start + Duration::from_secs(2));
        assert_eq!(state.elapsed(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn word_result_exact_match() {
        let mut word = WordResult::new("America");
        word.user_input = "america".into();
        assert!(!word.is_correct());
        word.user_input = "America".into();
        assert!(word.is_correct());
    }
}
