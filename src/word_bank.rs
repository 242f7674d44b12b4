use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::{Error, Result};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// A named list of words, embedded from `src/lang/<name>.json`
#[derive(Deserialize, Clone, Debug)]
pub struct WordBank {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordBank {
    pub fn load(name: &str) -> Result<Self> {
        let file = LANG_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| Error::UnknownWordBank {
                name: name.to_string(),
            })?;
        let contents = file.contents_utf8().ok_or_else(|| Error::UnknownWordBank {
            name: name.to_string(),
        })?;

        serde_json::from_str(contents).map_err(|e| Error::json("parsing word bank", e))
    }

    /// Names of every embedded bank, sorted
    pub fn available() -> Vec<String> {
        let mut names: Vec<String> = LANG_DIR
            .files()
            .filter_map(|f| {
                let path = f.path();
                match path.extension().and_then(|e| e.to_str()) {
                    Some("json") => path.file_stem()?.to_str().map(str::to_string),
                    _ => None,
                }
            })
            .collect();
        names.sort();
        names
    }

    /// `count` distinct words in random order, or the whole bank shuffled when
    /// `count` is `None` or larger than the bank.
    pub fn pick<R: Rng + ?Sized>(&self, count: Option<usize>, rng: &mut R) -> Vec<String> {
        match count {
            Some(n) if n < self.words.len() => {
                self.words.choose_multiple(rng, n).cloned().collect()
            }
            _ => shuffle(self.words.clone(), rng),
        }
    }
}

/// Uniformly random permutation (Fisher-Yates)
pub fn shuffle<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items
}

/// Splits a custom prompt into words
pub fn words_from_prompt(prompt: &str) -> Vec<String> {
    prompt.split_whitespace().map(str::to_string).collect()
}
