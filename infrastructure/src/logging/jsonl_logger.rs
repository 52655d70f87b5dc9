//! Append-only JSONL prediction log.
//!
//! One [`PredictionRecord`] per line. Restarts keep appending to the same file.

use narrative_application::ports::prediction_logger::{PredictionLogger, PredictionRecord};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

pub struct JsonlPredictionLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl JsonlPredictionLogger {
    /// Open the log for appending, creating it and its parent directory.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the record and its newline in one call so concurrent writers
    /// never interleave inside a line.
    fn append_line(&self, record: &PredictionRecord) -> io::Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("prediction log lock poisoned"))?;
        file.write_all(&line)
    }
}

impl PredictionLogger for JsonlPredictionLogger {
    fn record(&self, record: &PredictionRecord) {
        if let Err(e) = self.append_line(record) {
            warn!(path = %self.path.display(), "Could not append prediction: {}", e);
        }
    }
}
