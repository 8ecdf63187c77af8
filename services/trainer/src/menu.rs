//! The numbered main menu.
//!
//! Owns the per-session options and hands them to each runner as an
//! explicit `SessionConfig` value. Toggling the grammar advisory rebuilds
//! the advisory collaborator with the new setting.

use crate::config::Config;
use crate::console::Interaction;
use crate::runner::{run_practice, run_quiz};
use crate::training::run_training;
use anyhow::Result;
use konjugator_core::SessionConfig;
use konjugator_core::advisory::{DisabledGrammarAdvisory, GrammarAdvisory, LlmGrammarAdvisory};
use konjugator_core::conjugation::{ConjugationTable, Tense};
use konjugator_core::store::ProgressStore;
use tracing::warn;

const DEFAULT_QUIZ_ROUNDS: u32 = 10;
const MAX_QUIZ_ROUNDS: u32 = 100;

/// Runs the menu loop until the user exits.
pub async fn run(
    io: &mut dyn Interaction,
    table: &ConjugationTable,
    store: &ProgressStore,
    config: &Config,
) -> Result<()> {
    let mut session = SessionConfig {
        exclude_simple_past: false,
        advisory_enabled: config.api_key().is_some(),
    };
    let mut advisory = build_advisory(config, session.advisory_enabled);
    let mut rng = rand::rng();

    io.say("Willkommen! Konjugator drills German verb conjugation.");
    loop {
        show_menu(io, session);
        let choice = io.ask("Choose an option: ")?;
        match choice.trim() {
            "1" => {
                run_quiz(
                    io,
                    table,
                    advisory.as_ref(),
                    session,
                    &mut rng,
                    DEFAULT_QUIZ_ROUNDS,
                )
                .await?
            }
            "2" => {
                let rounds = ask_round_count(io)?;
                run_quiz(io, table, advisory.as_ref(), session, &mut rng, rounds).await?
            }
            "3" => run_practice(io, table, advisory.as_ref(), session, &mut rng).await?,
            "4" => run_training(io, table, advisory.as_ref(), session, store).await?,
            "5" => {
                session.exclude_simple_past = !session.exclude_simple_past;
                io.say(&format!(
                    "{} is now {} the question pool.",
                    Tense::SimplePast.label(),
                    if session.exclude_simple_past {
                        "excluded from"
                    } else {
                        "included in"
                    }
                ));
            }
            "6" => {
                if !session.advisory_enabled && config.api_key().is_none() {
                    io.say("No API key configured; grammar suggestions stay off.");
                } else {
                    session.advisory_enabled = !session.advisory_enabled;
                    advisory = build_advisory(config, session.advisory_enabled);
                    io.say(&format!(
                        "Grammar suggestions are now {}.",
                        if session.advisory_enabled { "on" } else { "off" }
                    ));
                }
            }
            "7" => {
                io.say("Tschüss!");
                return Ok(());
            }
            _ => io.say("Invalid choice, enter a number between 1 and 7."),
        }
    }
}

fn show_menu(io: &mut dyn Interaction, session: SessionConfig) {
    io.say("\n=== Konjugator ===");
    io.say(&format!("1) Quick quiz ({DEFAULT_QUIZ_ROUNDS} questions)"));
    io.say("2) Custom quiz");
    io.say("3) Practice (open-ended)");
    io.say("4) Training (full curriculum)");
    io.say(&format!(
        "5) Toggle {} [currently {}]",
        Tense::SimplePast.label(),
        if session.exclude_simple_past {
            "excluded"
        } else {
            "included"
        }
    ));
    io.say(&format!(
        "6) Toggle grammar suggestions [currently {}]",
        if session.advisory_enabled { "on" } else { "off" }
    ));
    io.say("7) Exit");
}

fn ask_round_count(io: &mut dyn Interaction) -> Result<u32> {
    loop {
        let raw = io.ask(&format!("How many questions (1-{MAX_QUIZ_ROUNDS})? "))?;
        match raw.trim().parse::<u32>() {
            Ok(count) if (1..=MAX_QUIZ_ROUNDS).contains(&count) => return Ok(count),
            _ => io.say(&format!(
                "Please enter a number between 1 and {MAX_QUIZ_ROUNDS}."
            )),
        }
    }
}

fn build_advisory(config: &Config, enabled: bool) -> Box<dyn GrammarAdvisory> {
    if !enabled {
        return Box::new(DisabledGrammarAdvisory);
    }
    match config.advisory_client_config() {
        Some(client_config) => Box::new(LlmGrammarAdvisory::new(
            client_config,
            config.chat_model.clone(),
        )),
        None => {
            warn!("grammar advisory enabled without an API key; disabling it");
            Box::new(DisabledGrammarAdvisory)
        }
    }
}
