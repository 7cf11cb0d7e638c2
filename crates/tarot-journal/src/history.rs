//! Append-only JSONL reading history.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tarot_core::Reading;

use crate::error::{JournalError, JournalResult};

/// Reading history stored one JSON object per line, oldest first.
#[derive(Debug, Clone)]
pub struct ReadingLog {
    path: PathBuf,
}

impl ReadingLog {
    /// History backed by the file at `path`. Nothing is touched until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `reading`, creating the file and its parent directories.
    pub fn save(&self, reading: &Reading) -> JournalResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| JournalError::io(parent, e))?;
        }
        let line = serde_json::to_string(reading)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| JournalError::io(&self.path, e))?;
        writeln!(file, "{line}").map_err(|e| JournalError::io(&self.path, e))?;
        log::debug!("saved reading to {}", self.path.display());
        Ok(())
    }

    /// Every valid reading, oldest first.
    ///
    /// A missing file is an empty history. Blank lines are ignored and
    /// malformed lines are skipped with a warning.
    pub fn load_all(&self) -> JournalResult<Vec<Reading>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(JournalError::io(&self.path, e)),
        };

        let mut readings = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Reading>(line) {
                Ok(reading) => readings.push(reading),
                Err(e) => log::warn!("skipping invalid reading at line {}: {e}", idx + 1),
            }
        }
        Ok(readings)
    }

    /// The most recent `n` readings, oldest first.
    pub fn load_last(&self, n: usize) -> JournalResult<Vec<Reading>> {
        let mut all = self.load_all()?;
        let skip = all.len().saturating_sub(n);
        Ok(all.split_off(skip))
    }

    /// Remove the most recent `n` readings, keeping older ones.
    ///
    /// Returns how many were removed. Malformed lines are dropped by the
    /// rewrite. The file is removed when nothing remains.
    pub fn delete_last(&self, n: usize) -> JournalResult<usize> {
        if n == 0 {
            return Ok(0);
        }
        let mut readings = self.load_all()?;
        if readings.is_empty() {
            return Ok(0);
        }
        let keep = readings.len().saturating_sub(n);
        let removed = readings.len() - keep;
        readings.truncate(keep);

        if readings.is_empty() {
            self.clear_all()?;
        } else {
            let mut out = String::new();
            for reading in &readings {
                out.push_str(&serde_json::to_string(reading)?);
                out.push('\n');
            }
            fs::write(&self.path, out).map_err(|e| JournalError::io(&self.path, e))?;
        }
        Ok(removed)
    }

    /// Delete the history file. Succeeds if it does not exist.
    pub fn clear_all(&self) -> JournalResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(JournalError::io(&self.path, e)),
        }
    }
}
