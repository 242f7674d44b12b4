use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::{Clock, MonotonicClock};
use crate::error::{Error, Result};
use crate::keys::{Key, KeyPress};
use crate::results::RaceSummary;
use crate::session::{Phase, SessionState};
use crate::typing_policy::{KeyClass, TypingPolicy};
use crate::view::{project, WordView};
use crate::word_bank::shuffle;

/// Verdict of a key press
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// not handled here; the host may apply its default
    Ignored,
    /// default withheld, nothing changed
    Rejected,
    /// default allowed; the field applies its edit
    Accepted,
    /// word submitted, more words remain
    Advanced,
    /// last word submitted
    Completed(RaceSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChange {
    Applied,
    /// longer than the slot's overflow slack allows; field keeps its value
    Rejected,
    /// round already complete
    Ignored,
}

/// Typing session controller: owns one round's state and mutates it per
/// key press and per field change.
#[derive(Debug)]
pub struct Race<C: Clock = MonotonicClock> {
    word_set: Vec<String>,
    state: SessionState,
    policy: TypingPolicy,
    clock: C,
    rng: StdRng,
    summary: Option<RaceSummary>,
}

impl Race<MonotonicClock> {
    pub fn new(words: Vec<String>, policy: TypingPolicy) -> Result<Self> {
        Self::with_parts(words, policy, MonotonicClock, StdRng::from_entropy())
    }
}

impl<C: Clock> Race<C> {
    pub fn with_parts(
        words: Vec<String>,
        policy: TypingPolicy,
        clock: C,
        mut rng: StdRng,
    ) -> Result<Self> {
        if words.is_empty() {
            return Err(Error::EmptyWordList);
        }
        if let Some(bad) = words
            .iter()
            .find(|w| w.is_empty() || w.contains(char::is_whitespace))
        {
            return Err(Error::InvalidWord { word: bad.clone() });
        }

        let state = SessionState::new(shuffle(words.clone(), &mut rng));
        Ok(Self {
            word_set: words,
            state,
            policy,
            clock,
            rng,
            summary: None,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn current_input(&self) -> &str {
        &self.state.current_input
    }

    /// Completion signal of the finished round
    pub fn summary(&self) -> Option<&RaceSummary> {
        self.summary.as_ref()
    }

    pub fn words_per_minute(&self) -> Option<f64> {
        self.state.words_per_minute
    }

    pub fn view(&self) -> Vec<WordView> {
        project(&self.state)
    }

    /// Time since the first keystroke, frozen once the round ends
    pub fn running_time(&self) -> Option<std::time::Duration> {
        let start = self.state.started_at?;
        let end = self.state.ended_at.unwrap_or_else(|| self.clock.now());
        Some(end.saturating_duration_since(start))
    }

    pub fn on_key_down(&mut self, press: &KeyPress) -> KeyAction {
        if self.state.is_complete() {
            return KeyAction::Ignored;
        }

        let class = self.policy.classify(press, &self.state.current_input);
        match class {
            KeyClass::Chord | KeyClass::Allowed => return KeyAction::Ignored,
            KeyClass::StrayAtWordStart => return KeyAction::Rejected,
            KeyClass::Submit | KeyClass::Letter | KeyClass::Editing => {}
        }

        if self.state.started_at.is_none() {
            self.state.started_at = Some(self.clock.now());
            debug!("round started");
        }

        match class {
            KeyClass::Submit => self.submit_word(),
            _ => KeyAction::Accepted,
        }
    }

    pub fn on_input_change(&mut self, value: &str) -> InputChange {
        let now = self.clock.now();
        let Some(word) = self.state.current_word_mut() else {
            return InputChange::Ignored;
        };

        if !self.policy.accepts(&word.correct_word, value) {
            return InputChange::Rejected;
        }

        word.user_input = value.to_string();
        if word.started_at.is_none() && !value.is_empty() {
            word.started_at = Some(now);
        }
        self.state.current_input = value.to_string();

        InputChange::Applied
    }

    /// Key down followed by the text field's default edit, if any
    pub fn press(&mut self, press: &KeyPress) -> KeyAction {
        let action = self.on_key_down(press);
        if action != KeyAction::Accepted {
            return action;
        }

        let mut next = self.state.current_input.clone();
        match press.key {
            Key::Char(c) => next.push(c),
            Key::Backspace => {
                next.pop();
            }
            _ => return action,
        }

        if self.on_input_change(&next) == InputChange::Rejected {
            debug!("withheld {:?}: word slot is full", press.key);
        }
        action
    }

    /// Types `text` through `press`, space-separated words included
    pub fn type_text(&mut self, text: &str) -> Vec<KeyAction> {
        KeyPress::sequence(text)
            .iter()
            .map(|k| self.press(k))
            .collect()
    }

    /// Reshuffles the same word set and clears every field
    pub fn restart(&mut self) {
        self.state = SessionState::new(shuffle(self.word_set.clone(), &mut self.rng));
        self.summary = None;
        debug!("round restarted with {} words", self.word_set.len());
    }

    fn submit_word(&mut self) -> KeyAction {
        let now = self.clock.now();
        let idx = self.state.current_word_index;
        if let Some(word) = self.state.current_word_mut() {
            let started = word.started_at.unwrap_or(now);
            word.elapsed = Some(now.saturating_duration_since(started));
        }
        self.state.current_word_index += 1;
        self.state.current_input.clear();
        debug!("submitted word {} of {}", idx + 1, self.state.words.len());

        if self.state.is_complete() {
            KeyAction::Completed(self.complete(now))
        } else {
            KeyAction::Advanced
        }
    }

    fn complete(&mut self, now: std::time::Instant) -> RaceSummary {
        if self.state.ended_at.is_none() {
            self.state.ended_at = Some(now);
        }

        let summary = RaceSummary::from_state(&self.state);
        self.state.words_per_minute = summary.words_per_minute;
        info!(
            "race complete: {} wpm, {}/{} words correct, {:.3} sec",
            summary.wpm_label(),
            summary.correct_words,
            summary.total_words,
            summary.elapsed_secs().unwrap_or_default()
        );
        self.summary = Some(summary.clone());
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use assert_matches::assert_matches;
    use std::time::Duration;

    fn race(words: &[&str]) -> (Race<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let race = Race::with_parts(
            words.iter().map(|w| w.to_string()).collect(),
            TypingPolicy::default(),
            clock.clone(),
            StdRng::seed_from_u64(42),
        )
        .unwrap();
        (race, clock)
    }

    fn target(race: &Race<ManualClock>, idx: usize) -> String {
        race.state().words[idx].correct_word.clone()
    }

    #[test]
    fn rejects_bad_word_lists() {
        let clock = ManualClock::new();
        let empty = Race::with_parts(
            vec![],
            TypingPolicy::default(),
            clock.clone(),
            StdRng::seed_from_u64(0),
        );
        assert_matches!(empty, Err(Error::EmptyWordList));

        let spaced = Race::with_parts(
            vec!["air".into(), "ice cream".into()],
            TypingPolicy::default(),
            clock,
            StdRng::seed_from_u64(0),
        );
        assert_matches!(spaced, Err(Error::InvalidWord { word }) if word == "ice cream");
    }

    #[test]
    fn race_is_debug_printable() {
        let (race, _clock) = race(&["air"]);
        let printed = format!("{race:?}");
        assert!(printed.contains("Race"));
        assert!(printed.contains("air"));
    }

    #[test]
    fn first_letter_starts_the_round() {
        let (mut race, _clock) = race(&["air", "and"]);
        assert_eq!(race.phase(), Phase::Shuffled);

        race.press(&KeyPress::new(Key::Tab));
        assert_eq!(race.phase(), Phase::Shuffled);

        race.press(&KeyPress::char('#'));
        assert_eq!(race.phase(), Phase::Shuffled);

        race.press(&KeyPress::char('a'));
        assert_eq!(race.phase(), Phase::InProgress);
        assert!(race.state().started_at.is_some());
    }

    #[test]
    fn stray_character_at_word_start_is_withheld() {
        let (mut race, _clock) = race(&["air", "and"]);
        assert_eq!(race.press(&KeyPress::char('#')), KeyAction::Rejected);
        assert_eq!(race.current_input(), "");
        assert_eq!(race.press(&KeyPress::char(' ')), KeyAction::Rejected);
        assert_eq!(race.state().current_word_index, 0);

        // once a word has a letter, punctuation is ordinary input
        race.press(&KeyPress::char('a'));
        assert_eq!(race.press(&KeyPress::char('#')), KeyAction::Accepted);
        assert_eq!(race.current_input(), "a#");
    }

    #[test]
    fn chords_do_not_type() {
        let (mut race, _clock) = race(&["air"]);
        assert_eq!(
            race.press(&KeyPress::char('a').with_ctrl()),
            KeyAction::Ignored
        );
        assert_eq!(
            race.press(&KeyPress::char('a').with_meta()),
            KeyAction::Ignored
        );
        assert_eq!(race.current_input(), "");
        assert_eq!(race.phase(), Phase::Shuffled);
    }

    #[test]
    fn overflow_past_slack_is_rejected() {
        let (mut race, _clock) = race(&["air"]);
        let limit = "air".len() + crate::typing_policy::MAX_OVERFLOW;
        for _ in 0..limit + 5 {
            race.press(&KeyPress::char('x'));
        }
        assert_eq!(race.current_input().len(), limit);
        assert_eq!(race.state().words[0].user_input.len(), limit);

        assert_eq!(race.on_input_change(&"x".repeat(limit + 1)), InputChange::Rejected);
        assert_eq!(race.current_input().len(), limit);
    }

    #[test]
    fn backspace_edits_the_field() {
        let (mut race, _clock) = race(&["air"]);
        race.type_text("aix");
        race.press(&KeyPress::new(Key::Backspace));
        assert_eq!(race.current_input(), "ai");
        race.press(&KeyPress::char('r'));
        assert_eq!(race.state().words[0].user_input, "air");
    }

    #[test]
    fn space_freezes_word_and_records_its_time() {
        let (mut race, clock) = race(&["air", "and", "any"]);
        let first = target(&race, 0);

        clock.advance_ms(100);
        race.type_text(&first[..1]);
        clock.advance_ms(250);
        race.type_text(&first[1..]);
        assert_eq!(race.press(&KeyPress::char(' ')), KeyAction::Advanced);

        let state = race.state();
        assert_eq!(state.current_word_index, 1);
        assert_eq!(state.current_input, "");
        assert_eq!(state.words[0].user_input, first);
        assert_eq!(state.words[0].elapsed, Some(Duration::from_millis(250)));
        assert_eq!(state.words[1].elapsed, None);
    }

    #[test]
    fn word_index_only_moves_forward_one_per_space() {
        let (mut race, _clock) = race(&["air", "and", "any", "all"]);
        let mut last = 0;
        for i in 0..4 {
            race.type_text("zz");
            race.press(&KeyPress::char(' '));
            let idx = race.state().current_word_index;
            assert_eq!(idx, last + 1, "after word {i}");
            last = idx;
        }
        assert!(race.is_complete());

        race.type_text("more words ");
        assert_eq!(race.state().current_word_index, 4);
    }

    #[test]
    fn completion_fires_once_and_freezes_end_time() {
        let (mut race, clock) = race(&["air", "and"]);
        let words: Vec<String> = (0..2).map(|i| target(&race, i)).collect();

        race.type_text(&words[0]);
        clock.advance_ms(1000);
        assert_eq!(race.press(&KeyPress::char(' ')), KeyAction::Advanced);
        race.type_text(&words[1]);
        clock.advance_ms(1000);

        let action = race.press(&KeyPress::char(' '));
        let summary = match action {
            KeyAction::Completed(summary) => summary,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(summary.wpm_label(), "42.00");
        assert_eq!(race.words_per_minute(), summary.words_per_minute);
        assert_eq!(race.phase(), Phase::Complete);

        let ended = race.state().ended_at;
        clock.advance_ms(5000);
        assert_eq!(race.press(&KeyPress::char('a')), KeyAction::Ignored);
        assert_eq!(race.press(&KeyPress::char(' ')), KeyAction::Ignored);
        assert_eq!(race.on_input_change("a"), InputChange::Ignored);
        assert_eq!(race.state().ended_at, ended);
        assert_eq!(race.running_time(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn zero_elapsed_round_has_no_wpm() {
        let (mut race, _clock) = race(&["air"]);
        race.type_text("air");
        let action = race.press(&KeyPress::char(' '));
        assert_matches!(action, KeyAction::Completed(s) if s.words_per_minute.is_none());
        assert_eq!(race.words_per_minute(), None);
    }

    #[test]
    fn restart_reshuffles_and_clears() {
        let (mut race, clock) = race(&[
            "about", "above", "add", "after", "again", "air", "all", "almost", "along", "also",
        ]);
        let original: Vec<String> = race.state().target_words().map(str::to_string).collect();

        race.type_text("abc def ");
        clock.advance_ms(300);

        let mut saw_new_order = false;
        for _ in 0..5 {
            race.restart();
            let state = race.state();
            assert_eq!(state.current_word_index, 0);
            assert_eq!(state.current_input, "");
            assert!(state.started_at.is_none());
            assert!(state.ended_at.is_none());
            assert!(state.words_per_minute.is_none());
            assert!(state.words.iter().all(|w| w.user_input.is_empty()));
            assert!(race.summary().is_none());

            let order: Vec<String> = state.target_words().map(str::to_string).collect();
            let mut sorted = order.clone();
            sorted.sort();
            let mut expected = original.clone();
            expected.sort();
            assert_eq!(sorted, expected);
            saw_new_order |= order != original;
        }
        assert!(saw_new_order);
    }
}
