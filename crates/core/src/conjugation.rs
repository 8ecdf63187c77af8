//! Conjugation Table
//!
//! This module defines the tense catalogue and the immutable lookup table
//! built once at startup from the verb data source. Runners only ever read
//! from it; a key the table never loaded signals a corrupt or incomplete
//! source and is reported as a typed error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The four verb-form categories covered by the curriculum, in display and
/// traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tense {
    Present,
    SimplePast,
    PresentPerfect,
    Future,
}

impl Tense {
    /// All tenses in catalogue order.
    pub const ALL: [Tense; 4] = [
        Tense::Present,
        Tense::SimplePast,
        Tense::PresentPerfect,
        Tense::Future,
    ];

    /// The German label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Tense::Present => "Präsens",
            Tense::SimplePast => "Präteritum",
            Tense::PresentPerfect => "Perfekt",
            Tense::Future => "Futur I",
        }
    }

    /// The tenses available to a session, honoring the Präteritum exclusion.
    pub fn for_session(exclude_simple_past: bool) -> Vec<Tense> {
        Tense::ALL
            .into_iter()
            .filter(|t| !(exclude_simple_past && *t == Tense::SimplePast))
            .collect()
    }

    fn index(self) -> usize {
        match self {
            Tense::Present => 0,
            Tense::SimplePast => 1,
            Tense::PresentPerfect => 2,
            Tense::Future => 3,
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of the verb data source: an (infinitive, subject) pair with one
/// surface form per tense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbRow {
    pub infinitive: String,
    pub subject: String,
    pub present: String,
    pub simple_past: String,
    pub present_perfect: String,
    pub future: String,
}

/// A question posed to the user in any of the three modes. Ephemeral,
/// selected per round, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub verb: String,
    pub subject: String,
    pub tense: Tense,
}

/// Lookup failure for a key outside the loaded set.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("no conjugation entry for verb '{verb}', subject '{subject}', tense {tense}")]
    KeyNotFound {
        verb: String,
        subject: String,
        tense: Tense,
    },
}

/// Immutable lookup structure keyed by (verb, subject, tense).
///
/// Verbs keep their first-seen order, and so do each verb's subjects; the
/// training curriculum traverses both in exactly that order. A later row
/// for an already-seen (verb, subject) key replaces all four forms at once.
#[derive(Debug, Clone, Default)]
pub struct ConjugationTable {
    verbs: Vec<String>,
    subjects: HashMap<String, Vec<String>>,
    forms: HashMap<String, HashMap<String, [String; 4]>>,
}

impl ConjugationTable {
    /// Builds the table in a single pass over the source rows.
    pub fn build(rows: Vec<VerbRow>) -> Self {
        let mut table = ConjugationTable::default();
        for row in rows {
            if !table.subjects.contains_key(&row.infinitive) {
                table.verbs.push(row.infinitive.clone());
            }
            let subjects = table.subjects.entry(row.infinitive.clone()).or_default();
            if !subjects.contains(&row.subject) {
                subjects.push(row.subject.clone());
            }
            table.forms.entry(row.infinitive).or_default().insert(
                row.subject,
                [
                    row.present,
                    row.simple_past,
                    row.present_perfect,
                    row.future,
                ],
            );
        }
        table
    }

    /// Returns the canonical form for (verb, subject, tense).
    pub fn lookup(&self, verb: &str, subject: &str, tense: Tense) -> Result<&str, TableError> {
        self.forms
            .get(verb)
            .and_then(|by_subject| by_subject.get(subject))
            .map(|forms| forms[tense.index()].as_str())
            .ok_or_else(|| TableError::KeyNotFound {
                verb: verb.to_string(),
                subject: subject.to_string(),
                tense,
            })
    }

    /// All loaded verbs in source order.
    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    /// The subjects loaded for `verb` in source order; empty for an unknown verb.
    pub fn subjects(&self, verb: &str) -> &[String] {
        self.subjects.get(verb).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(infinitive: &str, subject: &str, stem: &str) -> VerbRow {
        VerbRow {
            infinitive: infinitive.to_string(),
            subject: subject.to_string(),
            present: format!("{stem}-präsens"),
            simple_past: format!("{stem}-präteritum"),
            present_perfect: format!("{stem}-perfekt"),
            future: format!("{stem}-futur"),
        }
    }

    #[test]
    fn test_lookup_returns_form_per_tense() {
        let table = ConjugationTable::build(vec![row("gehen", "ich", "geh")]);

        assert_eq!(
            table.lookup("gehen", "ich", Tense::Present).unwrap(),
            "geh-präsens"
        );
        assert_eq!(
            table.lookup("gehen", "ich", Tense::SimplePast).unwrap(),
            "geh-präteritum"
        );
        assert_eq!(
            table.lookup("gehen", "ich", Tense::PresentPerfect).unwrap(),
            "geh-perfekt"
        );
        assert_eq!(
            table.lookup("gehen", "ich", Tense::Future).unwrap(),
            "geh-futur"
        );
    }

    #[test]
    fn test_last_row_wins_for_duplicate_key() {
        let table = ConjugationTable::build(vec![
            row("gehen", "ich", "alt"),
            row("gehen", "ich", "neu"),
        ]);

        // The whole row is replaced, never a hybrid of the two.
        for tense in Tense::ALL {
            assert!(table.lookup("gehen", "ich", tense).unwrap().starts_with("neu-"));
        }
        assert_eq!(table.verbs(), ["gehen"]);
        assert_eq!(table.subjects("gehen"), ["ich"]);
    }

    #[test]
    fn test_verbs_and_subjects_keep_source_order() {
        let table = ConjugationTable::build(vec![
            row("sein", "ich", "sei"),
            row("gehen", "du", "geh"),
            row("sein", "du", "sei"),
            row("gehen", "ich", "geh"),
        ]);

        assert_eq!(table.verbs(), ["sein", "gehen"]);
        assert_eq!(table.subjects("sein"), ["ich", "du"]);
        assert_eq!(table.subjects("gehen"), ["du", "ich"]);
        assert_eq!(table.subjects("haben"), Vec::<String>::new().as_slice());
    }

    #[test]
    fn test_lookup_unknown_key_is_an_error() {
        let table = ConjugationTable::build(vec![row("gehen", "ich", "geh")]);

        let err = table.lookup("gehen", "wir", Tense::Present).unwrap_err();
        let TableError::KeyNotFound { verb, subject, tense } = err;
        assert_eq!(verb, "gehen");
        assert_eq!(subject, "wir");
        assert_eq!(tense, Tense::Present);
    }

    #[test]
    fn test_tense_labels() {
        assert_eq!(Tense::Present.label(), "Präsens");
        assert_eq!(Tense::SimplePast.label(), "Präteritum");
        assert_eq!(Tense::PresentPerfect.label(), "Perfekt");
        assert_eq!(Tense::Future.label(), "Futur I");
        assert_eq!(format!("{}", Tense::SimplePast), "Präteritum");
    }

    #[test]
    fn test_for_session_excludes_simple_past() {
        assert_eq!(Tense::for_session(false), Tense::ALL.to_vec());
        assert_eq!(
            Tense::for_session(true),
            vec![Tense::Present, Tense::PresentPerfect, Tense::Future]
        );
    }
}
