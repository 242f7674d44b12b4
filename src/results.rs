use std::time::Duration;

use itertools::{Itertools, MinMaxResult};

use crate::session::SessionState;
use crate::wpm::compute_words_per_minute;

/// Completion signal of a round, handed to the results screen
#[derive(Debug, Clone, PartialEq)]
pub struct RaceSummary {
    pub total_words: usize,
    pub correct_words: usize,
    pub elapsed: Option<Duration>,
    pub words_per_minute: Option<f64>,
    pub mean_word_ms: Option<f64>,
    pub word_ms_std_dev: Option<f64>,
    pub fastest_word: Option<(String, Duration)>,
    pub slowest_word: Option<(String, Duration)>,
}

impl RaceSummary {
    pub fn from_state(state: &SessionState) -> Self {
        let submitted = state.submitted();
        let elapsed = state.elapsed();
        let words_per_minute =
            elapsed.and_then(|e| compute_words_per_minute(e.as_secs_f64(), &state.words));

        let timed: Vec<(&str, Duration)> = submitted
            .iter()
            .filter_map(|w| w.elapsed.map(|d| (w.correct_word.as_str(), d)))
            .collect();
        let word_ms: Vec<f64> = timed.iter().map(|(_, d)| d.as_micros() as f64 / 1000.0).collect();

        let (fastest_word, slowest_word) = match timed.iter().minmax_by_key(|(_, d)| *d) {
            MinMaxResult::NoElements => (None, None),
            MinMaxResult::OneElement((w, d)) => {
                (Some((w.to_string(), *d)), Some((w.to_string(), *d)))
            }
            MinMaxResult::MinMax((fw, fd), (sw, sd)) => {
                (Some((fw.to_string(), *fd)), Some((sw.to_string(), *sd)))
            }
        };

        Self {
            total_words: state.words.len(),
            correct_words: submitted.iter().filter(|w| w.is_correct()).count(),
            elapsed,
            words_per_minute,
            mean_word_ms: mean(&word_ms),
            word_ms_std_dev: std_dev(&word_ms),
            fastest_word,
            slowest_word,
        }
    }

    /// WPM the way the results screen shows it
    pub fn wpm_label(&self) -> String {
        match self.words_per_minute {
            Some(wpm) => format!("{wpm:.2}"),
            None => "-".to_string(),
        }
    }

    pub fn elapsed_secs(&self) -> Option<f64> {
        self.elapsed.map(|e| e.as_secs_f64())
    }
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let variance = data.iter().map(|v| (m - v).powi(2)).sum::<f64>() / data.len() as f64;
    Some(variance.sqrt())
}
