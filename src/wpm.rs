use crate::session::WordResult;

/// Characters per "word" in the standard WPM convention
pub const CHARS_PER_WORD: f64 = 5.0;

/// Characters credited for a round: every exactly-typed word, plus one
/// separating space between consecutive correct words.
pub fn correct_chars(results: &[WordResult]) -> usize {
    let (chars, words) = results
        .iter()
        .filter(|w| w.is_correct())
        .fold((0usize, 0usize), |(chars, words), w| {
            (chars + w.correct_word.chars().count(), words + 1)
        });

    chars + words.saturating_sub(1)
}

/// Words per minute over the whole round. `None` unless `elapsed_secs` is
/// strictly positive.
pub fn compute_words_per_minute(elapsed_secs: f64, results: &[WordResult]) -> Option<f64> {
    if elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
        return None;
    }

    Some((correct_chars(results) as f64 * 60.0) / (CHARS_PER_WORD * elapsed_secs))
}
