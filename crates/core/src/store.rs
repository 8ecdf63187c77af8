//! Training State Store
//!
//! Persists the resumable training record as a single JSON document at a
//! fixed path. Absence is the valid "no progress yet" state; a record that
//! is unreadable, malformed, or saved under a different tense exclusion is
//! discarded so the session restarts the curriculum from the beginning.

use crate::progress::TrainingProgress;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Owns the progress record on disk. Only the training runner reads or
/// writes through it.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProgressStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored record, or `None` when the curriculum should start
    /// fresh: no record yet, an unreadable or malformed record, or one
    /// saved under a different `exclude_simple_past` setting.
    pub fn load(&self, exclude_simple_past: bool) -> Option<TrainingProgress> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not read progress record; starting fresh");
                return None;
            }
        };
        match serde_json::from_str::<TrainingProgress>(&raw) {
            Ok(progress) if progress.exclude_simple_past == exclude_simple_past => Some(progress),
            Ok(_) => {
                info!(path = %self.path.display(), "stored progress uses a different tense set; starting fresh");
                None
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "progress record is malformed; starting fresh");
                None
            }
        }
    }

    /// Overwrites the record with `progress`.
    pub fn save(&self, progress: &TrainingProgress) -> Result<()> {
        let json = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write progress record to {}", self.path.display()))
    }

    /// Removes the record. Succeeds if it was already gone.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| {
                format!("Failed to remove progress record at {}", self.path.display())
            }),
        }
    }
}
