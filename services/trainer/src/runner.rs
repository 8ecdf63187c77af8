//! Session runners: the shared round procedure, the fixed-length quiz, and
//! open-ended practice.
//!
//! All modes run the same inner loop (present a combination, collect an
//! answer, judge the verb form, offer a grammar suggestion for sentence
//! answers) and differ only in how questions are selected and what happens
//! after judging.

use crate::console::Interaction;
use anyhow::Result;
use konjugator_core::SessionConfig;
use konjugator_core::advisory::GrammarAdvisory;
use konjugator_core::conjugation::{ConjugationTable, Question, Tense};
use konjugator_core::matcher;
use rand::Rng;
use tracing::warn;

/// Case-insensitive token that ends practice and training sessions.
pub const CANCEL_TOKEN: &str = "quit";

/// What a single round ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Correct,
    Incorrect,
    Cancelled,
}

/// Picks a question uniformly at random over the loaded verbs, the chosen
/// verb's subjects, and the session's tenses.
pub fn pick_question<R: Rng + ?Sized>(
    table: &ConjugationTable,
    tenses: &[Tense],
    rng: &mut R,
) -> Question {
    let verbs = table.verbs();
    let verb = &verbs[rng.random_range(0..verbs.len())];
    let subjects = table.subjects(verb);
    let subject = &subjects[rng.random_range(0..subjects.len())];
    let tense = tenses[rng.random_range(0..tenses.len())];
    Question {
        verb: verb.clone(),
        subject: subject.clone(),
        tense,
    }
}

/// Runs one ask-judge-advise round and reports the result to the user.
///
/// With `allow_cancel`, an answer equal to [`CANCEL_TOKEN`] ends the round
/// without judging. Sentence answers (more than one token) are sent to the
/// grammar advisory regardless of verb correctness; an advisory failure is
/// logged and otherwise treated as "no suggestion".
pub async fn run_round(
    io: &mut dyn Interaction,
    advisory: &dyn GrammarAdvisory,
    question: &Question,
    correct_form: &str,
    allow_cancel: bool,
) -> Result<RoundOutcome> {
    io.say(&format!(
        "\n{}  ·  {}  ·  {}",
        question.verb,
        question.subject,
        question.tense.label()
    ));
    let answer = io.ask("> ")?;
    let answer = answer.trim();

    if allow_cancel && answer.eq_ignore_ascii_case(CANCEL_TOKEN) {
        return Ok(RoundOutcome::Cancelled);
    }

    let correct = matcher::matches(answer, correct_form);

    if answer.split_whitespace().count() > 1 {
        match advisory
            .review(
                answer,
                &question.verb,
                &question.subject,
                question.tense,
                correct_form,
            )
            .await
        {
            Ok(correction) if correction.changed => {
                io.say(&format!("Suggestion: {}", correction.suggestion));
            }
            Ok(_) => {}
            Err(err) => {
                warn!(error = ?err, "grammar advisory unavailable for this round");
            }
        }
    }

    if correct {
        io.say("Correct!");
        Ok(RoundOutcome::Correct)
    } else {
        io.say(&format!("Not quite. The expected form is '{correct_form}'."));
        Ok(RoundOutcome::Incorrect)
    }
}

/// Runs exactly `rounds` random questions and reports the final score.
pub async fn run_quiz<R: Rng + ?Sized>(
    io: &mut dyn Interaction,
    table: &ConjugationTable,
    advisory: &dyn GrammarAdvisory,
    session: SessionConfig,
    rng: &mut R,
    rounds: u32,
) -> Result<()> {
    let tenses = session.tenses();
    let mut correct = 0u32;

    for _ in 0..rounds {
        let question = pick_question(table, &tenses, rng);
        let form = table.lookup(&question.verb, &question.subject, question.tense)?;
        let form = form.to_string();
        if run_round(io, advisory, &question, &form, false).await? == RoundOutcome::Correct {
            correct += 1;
        }
    }

    report_score(io, correct, rounds);
    Ok(())
}

/// Runs rounds until the user cancels, then reports the running score if
/// anything was attempted.
pub async fn run_practice<R: Rng + ?Sized>(
    io: &mut dyn Interaction,
    table: &ConjugationTable,
    advisory: &dyn GrammarAdvisory,
    session: SessionConfig,
    rng: &mut R,
) -> Result<()> {
    let tenses = session.tenses();
    let mut correct = 0u32;
    let mut attempted = 0u32;

    io.say(&format!("Practice mode: type '{CANCEL_TOKEN}' to stop."));
    loop {
        let question = pick_question(table, &tenses, rng);
        let form = table.lookup(&question.verb, &question.subject, question.tense)?;
        let form = form.to_string();
        match run_round(io, advisory, &question, &form, true).await? {
            RoundOutcome::Cancelled => break,
            RoundOutcome::Correct => {
                attempted += 1;
                correct += 1;
            }
            RoundOutcome::Incorrect => attempted += 1,
        }
    }

    if attempted > 0 {
        report_score(io, correct, attempted);
    }
    Ok(())
}

fn report_score(io: &mut dyn Interaction, correct: u32, total: u32) {
    let percent = f64::from(correct) * 100.0 / f64::from(total);
    io.say(&format!(
        "\nYou answered {correct} of {total} correctly ({percent:.1}%)."
    ));
    io.say(score_message(correct, total));
}

fn score_message(correct: u32, total: u32) -> &'static str {
    let percent = f64::from(correct) * 100.0 / f64::from(total);
    if correct == total {
        "Perfect score, fantastic work!"
    } else if percent >= 80.0 {
        "Great job, almost flawless!"
    } else if percent >= 60.0 {
        "Good effort, keep practicing!"
    } else {
        "Keep at it, conjugation takes repetition."
    }
}
