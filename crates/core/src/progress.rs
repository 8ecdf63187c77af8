//! Training Progress
//!
//! The resumable state of a training run: curriculum cursors, the tense
//! exclusion the record was saved under, and the per-combination error
//! tally. The `Curriculum` walker turns the cursors into concrete
//! questions and handles cursor overflow across the three nesting levels.

use crate::conjugation::{ConjugationTable, Question, Tense};
use serde::{Deserialize, Serialize};

/// Composite key identifying one drilled combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboKey {
    pub verb: String,
    pub tense: Tense,
    pub subject: String,
}

impl From<&Question> for ComboKey {
    fn from(question: &Question) -> Self {
        ComboKey {
            verb: question.verb.clone(),
            tense: question.tense,
            subject: question.subject.clone(),
        }
    }
}

/// One tally entry: a combination and how often it was answered wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyEntry {
    #[serde(flatten)]
    pub combo: ComboKey,
    pub count: u32,
}

/// Incorrect-attempt counts per combination, in encounter order.
///
/// Counts only ever increase; the tally is reset only by starting a fresh
/// (or incompatible) training session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorTally {
    entries: Vec<TallyEntry>,
}

impl ErrorTally {
    /// Records one incorrect attempt for `combo`.
    pub fn record(&mut self, combo: ComboKey) {
        match self.entries.iter_mut().find(|e| e.combo == combo) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(TallyEntry { combo, count: 1 }),
        }
    }

    /// The worst combinations, highest count first; ties keep encounter
    /// order (the sort is stable over the insertion-ordered entries).
    pub fn ranked(&self, limit: usize) -> Vec<&TallyEntry> {
        let mut ranked: Vec<&TallyEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The persisted state of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingProgress {
    pub verb_index: usize,
    pub tense_index: usize,
    pub subject_index: usize,
    pub exclude_simple_past: bool,
    #[serde(default)]
    pub error_tally: ErrorTally,
}

impl TrainingProgress {
    /// A fresh record with cursors at the start of the curriculum.
    pub fn new(exclude_simple_past: bool) -> Self {
        TrainingProgress {
            verb_index: 0,
            tense_index: 0,
            subject_index: 0,
            exclude_simple_past,
            error_tally: ErrorTally::default(),
        }
    }

    /// The record to persist while a question is in flight: the subject
    /// cursor already one past the current question, so a crash before the
    /// answer loses at most that one question.
    pub fn resume_point(&self) -> Self {
        let mut next = self.clone();
        next.subject_index += 1;
        next
    }
}

/// Walks the curriculum: every (verb, tense, subject) combination in
/// source load order, filtered to the session's tenses.
pub struct Curriculum<'a> {
    table: &'a ConjugationTable,
    tenses: Vec<Tense>,
}

impl<'a> Curriculum<'a> {
    pub fn new(table: &'a ConjugationTable, exclude_simple_past: bool) -> Self {
        Curriculum {
            table,
            tenses: Tense::for_session(exclude_simple_past),
        }
    }

    /// The question at the cursor, or `None` when the curriculum is
    /// exhausted.
    ///
    /// Overflowed cursors are normalized in place first (subject rolls into
    /// tense, tense into verb), so a persisted raw `subject_index` one past
    /// the end of a subject list resumes at the following combination.
    pub fn current(&self, progress: &mut TrainingProgress) -> Option<Question> {
        loop {
            let verb = self.table.verbs().get(progress.verb_index)?;
            if progress.tense_index >= self.tenses.len() {
                progress.verb_index += 1;
                progress.tense_index = 0;
                progress.subject_index = 0;
                continue;
            }
            let subjects = self.table.subjects(verb);
            if progress.subject_index >= subjects.len() {
                progress.tense_index += 1;
                progress.subject_index = 0;
                continue;
            }
            return Some(Question {
                verb: verb.clone(),
                subject: subjects[progress.subject_index].clone(),
                tense: self.tenses[progress.tense_index],
            });
        }
    }

    /// Advances past the current question. The next `current` call
    /// normalizes any overflow this produces.
    pub fn advance(&self, progress: &mut TrainingProgress) {
        progress.subject_index += 1;
    }
}
