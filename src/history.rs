use chrono::Local;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::results::RaceSummary;

/// One finished race as stored in the history file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: String,
    pub words: usize,
    pub correct_words: usize,
    pub elapsed_secs: f64,
    pub wpm: f64,
}

impl HistoryRecord {
    /// `None` for races that produced no WPM
    pub fn from_summary(summary: &RaceSummary) -> Option<Self> {
        Some(Self {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            words: summary.total_words,
            correct_words: summary.correct_words,
            elapsed_secs: summary.elapsed_secs()?,
            wpm: summary.words_per_minute?,
        })
    }
}

/// Append-only CSV log of finished races
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &HistoryRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io("creating history dir", e))?;
        }

        // header only when the file is new or empty
        let needs_header = fs::metadata(&self.path).map_or(true, |m| m.len() == 0);
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| Error::io("opening history", e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| Error::csv("writing history", e))?;
        writer
            .flush()
            .map_err(|e| Error::io("flushing history", e))?;

        debug!("recorded race in {}", self.path.display());
        Ok(())
    }

    pub fn records(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|e| Error::csv("opening history", e))?;
        reader
            .deserialize()
            .collect::<std::result::Result<Vec<HistoryRecord>, _>>()
            .map_err(|e| Error::csv("reading history", e))
    }

    pub fn best_wpm(&self) -> Result<Option<f64>> {
        Ok(self
            .records()?
            .into_iter()
            .map(|r| r.wpm)
            .fold(None, |best: Option<f64>, wpm| {
                Some(best.map_or(wpm, |b| b.max(wpm)))
            }))
    }
}
