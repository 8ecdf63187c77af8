//! Training runner.
//!
//! Walks the full curriculum (every verb, tense, and subject in source
//! order), persisting a resumable record around every prompt. A correctly
//! answered combination advances the cursor; a wrong answer is tallied and
//! the same combination is asked again. Completing the curriculum deletes
//! the record and prints a ranked error report.

use crate::console::Interaction;
use crate::runner::{CANCEL_TOKEN, RoundOutcome, run_round};
use anyhow::Result;
use konjugator_core::SessionConfig;
use konjugator_core::advisory::GrammarAdvisory;
use konjugator_core::conjugation::ConjugationTable;
use konjugator_core::progress::{ComboKey, Curriculum, ErrorTally, TrainingProgress};
use konjugator_core::store::ProgressStore;
use tracing::{info, warn};

/// How many combinations the final error report lists at most.
const REPORT_LIMIT: usize = 10;

/// Runs a training session until the curriculum is exhausted or the user
/// cancels. Progress is saved before every prompt with the cursor already
/// past the in-flight question, so a crash costs at most that question.
pub async fn run_training(
    io: &mut dyn Interaction,
    table: &ConjugationTable,
    advisory: &dyn GrammarAdvisory,
    session: SessionConfig,
    store: &ProgressStore,
) -> Result<()> {
    let curriculum = Curriculum::new(table, session.exclude_simple_past);

    let mut progress = match store.load(session.exclude_simple_past) {
        Some(saved) => {
            io.say("Resuming your previous training run.");
            info!(
                verb_index = saved.verb_index,
                tense_index = saved.tense_index,
                subject_index = saved.subject_index,
                "training progress restored"
            );
            saved
        }
        None => TrainingProgress::new(session.exclude_simple_past),
    };

    io.say(&format!("Training mode: type '{CANCEL_TOKEN}' to stop."));

    let mut completed = 0u32;
    loop {
        let Some(question) = curriculum.current(&mut progress) else {
            if let Err(err) = store.delete() {
                warn!(error = ?err, "could not remove completed progress record");
                io.say("Warning: the finished progress record could not be removed.");
            }
            io.say(&format!(
                "\nTraining complete! You worked through {completed} combination(s) this session."
            ));
            report_errors(io, &progress.error_tally);
            return Ok(());
        };

        let form = table.lookup(&question.verb, &question.subject, question.tense)?;
        let form = form.to_string();

        if let Err(err) = store.save(&progress.resume_point()) {
            warn!(error = ?err, "could not persist training progress");
            io.say("Warning: progress could not be saved.");
        }

        match run_round(io, advisory, &question, &form, true).await? {
            RoundOutcome::Cancelled => {
                io.say(&format!(
                    "\nTraining paused. You worked through {completed} combination(s) this session."
                ));
                report_errors(io, &progress.error_tally);
                return Ok(());
            }
            RoundOutcome::Correct => {
                completed += 1;
                curriculum.advance(&mut progress);
            }
            RoundOutcome::Incorrect => {
                progress.error_tally.record(ComboKey::from(&question));
            }
        }
    }
}

fn report_errors(io: &mut dyn Interaction, tally: &ErrorTally) {
    if tally.is_empty() {
        io.say("No mistakes recorded. Well done!");
        return;
    }
    io.say("Your most frequent mistakes:");
    for (position, entry) in tally.ranked(REPORT_LIMIT).iter().enumerate() {
        io.say(&format!(
            "{:>2}. {} / {} / {}: {} mistake(s)",
            position + 1,
            entry.combo.verb,
            entry.combo.tense.label(),
            entry.combo.subject,
            entry.count
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedIo;
    use konjugator_core::advisory::DisabledGrammarAdvisory;
    use konjugator_core::conjugation::VerbRow;

    fn row(infinitive: &str, subject: &str, stem: &str) -> VerbRow {
        VerbRow {
            infinitive: infinitive.to_string(),
            subject: subject.to_string(),
            present: format!("{stem}-p"),
            simple_past: format!("{stem}-sp"),
            present_perfect: format!("{stem}-pp"),
            future: format!("{stem}-f"),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> ProgressStore {
        ProgressStore::new(dir.path().join("training_progress.json"))
    }

    fn session(exclude_simple_past: bool) -> SessionConfig {
        SessionConfig {
            exclude_simple_past,
            advisory_enabled: false,
        }
    }

    #[tokio::test]
    async fn test_retry_then_completion_deletes_record_and_reports() {
        // One verb, one subject, Präteritum excluded: a three-question
        // curriculum. First answer is wrong once, then everything correct.
        let table = ConjugationTable::build(vec![row("gehen", "er", "geh")]);
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut io = ScriptedIo::new(&["falsch", "geh-p", "geh-pp", "geh-f"]);
        run_training(&mut io, &table, &DisabledGrammarAdvisory, session(true), &store)
            .await
            .unwrap();

        assert!(io.saw("Training complete!"));
        assert!(io.saw("3 combination(s)"));
        assert!(io.saw("gehen / Präsens / er: 1 mistake(s)"));
        assert!(store.load(true).is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_perfect_run_reports_no_mistakes() {
        let table = ConjugationTable::build(vec![row("gehen", "er", "geh")]);
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut io = ScriptedIo::new(&["geh-p", "geh-pp", "geh-f"]);
        run_training(&mut io, &table, &DisabledGrammarAdvisory, session(true), &store)
            .await
            .unwrap();

        assert!(io.saw("No mistakes recorded"));
    }

    #[tokio::test]
    async fn test_cancel_keeps_record_at_in_flight_question() {
        let table = ConjugationTable::build(vec![row("gehen", "ich", "geh"), row("gehen", "du", "geh")]);
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // Answer the first question, then quit on the second.
        let mut io = ScriptedIo::new(&["geh-p", "quit"]);
        run_training(&mut io, &table, &DisabledGrammarAdvisory, session(false), &store)
            .await
            .unwrap();

        assert!(io.saw("Training paused."));
        assert!(io.saw("1 combination(s)"));

        // The record points past the in-flight second question.
        let saved = store.load(false).unwrap();
        assert_eq!(saved.verb_index, 0);
        assert_eq!(saved.tense_index, 0);
        assert_eq!(saved.subject_index, 2);
    }

    #[tokio::test]
    async fn test_wrong_answer_keeps_cursor_and_counts_once_per_attempt() {
        let table = ConjugationTable::build(vec![row("gehen", "er", "geh")]);
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // Two wrong attempts at the first question, then quit.
        let mut io = ScriptedIo::new(&["falsch", "nochmal-falsch", "quit"]);
        run_training(&mut io, &table, &DisabledGrammarAdvisory, session(true), &store)
            .await
            .unwrap();

        assert!(io.saw("0 combination(s)"));
        assert!(io.saw("gehen / Präsens / er: 2 mistake(s)"));

        // The persisted tally carries both attempts; the cursor never moved
        // past the first question.
        let saved = store.load(true).unwrap();
        assert_eq!(saved.verb_index, 0);
        assert_eq!(saved.tense_index, 0);
        assert_eq!(saved.subject_index, 1);
        assert_eq!(saved.error_tally.ranked(1)[0].count, 2);
    }

    #[tokio::test]
    async fn test_resume_continues_where_the_record_points() {
        let table = ConjugationTable::build(vec![row("gehen", "ich", "geh"), row("gehen", "du", "geh")]);
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut first = ScriptedIo::new(&["geh-p", "quit"]);
        run_training(&mut first, &table, &DisabledGrammarAdvisory, session(false), &store)
            .await
            .unwrap();

        // The resumed session starts at the tense after the in-flight
        // question was skipped past.
        let mut second = ScriptedIo::new(&["quit"]);
        run_training(&mut second, &table, &DisabledGrammarAdvisory, session(false), &store)
            .await
            .unwrap();

        assert!(second.saw("Resuming your previous training run."));
        assert!(second.saw("Präteritum"));
    }

    #[tokio::test]
    async fn test_record_with_other_exclusion_starts_fresh() {
        let table = ConjugationTable::build(vec![row("gehen", "er", "geh")]);
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut first = ScriptedIo::new(&["quit"]);
        run_training(&mut first, &table, &DisabledGrammarAdvisory, session(false), &store)
            .await
            .unwrap();
        assert!(store.load(false).is_some());

        let mut second = ScriptedIo::new(&["quit"]);
        run_training(&mut second, &table, &DisabledGrammarAdvisory, session(true), &store)
            .await
            .unwrap();
        assert!(!second.saw("Resuming your previous training run."));
    }

    #[tokio::test]
    async fn test_full_curriculum_then_fresh_session_restarts() {
        let table = ConjugationTable::build(vec![row("gehen", "er", "geh")]);
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut first = ScriptedIo::new(&["geh-p", "geh-pp", "geh-f"]);
        run_training(&mut first, &table, &DisabledGrammarAdvisory, session(true), &store)
            .await
            .unwrap();

        // The record is gone, so a new session starts at the beginning.
        let mut second = ScriptedIo::new(&["quit"]);
        run_training(&mut second, &table, &DisabledGrammarAdvisory, session(true), &store)
            .await
            .unwrap();
        assert!(!second.saw("Resuming your previous training run."));
        assert!(second.saw("Präsens"));
    }
}
