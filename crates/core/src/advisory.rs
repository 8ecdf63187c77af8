//! Grammar Advisory
//!
//! Optional wrapper around an external text-generation service that reviews
//! full-sentence answers for grammar problems beyond the verb form itself.
//! The advisory is a non-critical enhancement: every failure mode degrades
//! to "no suggestion" and must never block or fail a round.

use crate::conjugation::Tense;
use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

/// Marker the model is instructed to prefix its correction with.
const CORRECTION_MARKER: &str = "Korrigiert:";

/// Sentinel the model is instructed to answer when nothing needs changing.
const NO_CHANGE_TOKEN: &str = "FEHLERFREI";

/// Outcome of a grammar review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// The sentence to show the user; the original when `changed` is false.
    pub suggestion: String,
    /// Whether the service actually proposed a change.
    pub changed: bool,
}

impl Correction {
    fn unchanged(sentence: &str) -> Self {
        Correction {
            suggestion: sentence.to_string(),
            changed: false,
        }
    }
}

/// Defines the contract for reviewing a full-sentence answer.
///
/// The quiz context (verb, subject, tense, verified form) travels with the
/// sentence so an implementation can avoid re-flagging the verb form the
/// matcher has already judged.
#[async_trait]
pub trait GrammarAdvisory: Send + Sync {
    async fn review(
        &self,
        sentence: &str,
        infinitive: &str,
        subject: &str,
        tense: Tense,
        correct_form: &str,
    ) -> Result<Correction>;
}

/// A `GrammarAdvisory` backed by an OpenAI-compatible chat-completion API.
pub struct LlmGrammarAdvisory {
    client: Client<OpenAIConfig>,
    model: String,
}

impl LlmGrammarAdvisory {
    /// Creates a new advisory against an OpenAI-compatible endpoint.
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl GrammarAdvisory for LlmGrammarAdvisory {
    async fn review(
        &self,
        sentence: &str,
        infinitive: &str,
        subject: &str,
        tense: Tense,
        correct_form: &str,
    ) -> Result<Correction> {
        let prompt = build_prompt(sentence, infinitive, subject, tense, correct_form);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content("Du bist ein Grammatik- und Rechtschreibhilfe-Tool für Deutsch.")
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;

        let answer = response
            .choices
            .first()
            .context("No response choice from grammar service")?
            .message
            .content
            .as_ref()
            .context("No content in grammar service response")?;

        Ok(parse_correction(sentence, answer))
    }
}

/// The toggle-off collaborator: returns the sentence untouched without
/// calling any external service.
pub struct DisabledGrammarAdvisory;

#[async_trait]
impl GrammarAdvisory for DisabledGrammarAdvisory {
    async fn review(
        &self,
        sentence: &str,
        _infinitive: &str,
        _subject: &str,
        _tense: Tense,
        _correct_form: &str,
    ) -> Result<Correction> {
        Ok(Correction::unchanged(sentence))
    }
}

fn build_prompt(
    sentence: &str,
    infinitive: &str,
    subject: &str,
    tense: Tense,
    correct_form: &str,
) -> String {
    format!(
        "Der folgende Satz stammt aus einer Konjugationsübung: Verb „{infinitive}“, \
         Subjekt „{subject}“, Zeitform {tense}. Die Verbform „{correct_form}“ wurde \
         bereits geprüft, markiere sie nicht erneut. Korrigiere nur andere \
         grammatikalische Fehler (Artikel, Kasus, Wortstellung). Wenn der Satz \
         fehlerfrei ist, antworte nur mit {NO_CHANGE_TOKEN}. Andernfalls antworte im \
         Format:\n{CORRECTION_MARKER} <verbesserter Satz>\n\nOriginal: {sentence}",
        tense = tense.label(),
    )
}

/// Parses the raw service output defensively.
///
/// Sentinel present, marker absent, or a suggestion identical to the
/// original all resolve to "no change" rather than an error.
fn parse_correction(original: &str, raw: &str) -> Correction {
    if raw.contains(NO_CHANGE_TOKEN) {
        return Correction::unchanged(original);
    }
    let Some(idx) = raw.find(CORRECTION_MARKER) else {
        return Correction::unchanged(original);
    };
    let suggestion = raw[idx + CORRECTION_MARKER.len()..].trim();
    if suggestion.is_empty() || suggestion == original.trim() {
        return Correction::unchanged(original);
    }
    Correction {
        suggestion: suggestion.to_string(),
        changed: true,
    }
}
