//! Verb table loading.
//!
//! The data source is a JSON array of rows, each carrying an infinitive, a
//! subject, and all four tense forms. A missing, malformed, or empty table
//! is the one failure that aborts startup.

use anyhow::{Context, Result, ensure};
use konjugator_core::conjugation::VerbRow;
use std::fs;
use std::path::Path;

/// Reads and validates the verb table rows from `path`.
pub fn load_verb_rows(path: &Path) -> Result<Vec<VerbRow>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read verb table at {}", path.display()))?;
    let rows: Vec<VerbRow> = serde_json::from_str(&raw)
        .with_context(|| format!("Verb table at {} is not valid JSON", path.display()))?;
    ensure!(
        !rows.is_empty(),
        "Verb table at {} contains no rows",
        path.display()
    );
    Ok(rows)
}
