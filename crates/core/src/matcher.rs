//! Answer Matcher
//!
//! Judges whether the canonical verb form is present in a free-form answer.
//! Users may reply with the bare form or with a whole sentence, so the
//! matcher extracts only the verb-form judgment: it never requires an exact
//! sentence match.

/// Punctuation stripped from the end of each token before comparison.
const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Subject pronouns that mark an answer as a full sentence.
const SUBJECT_PRONOUNS: [&str; 7] = ["ich", "du", "er", "sie", "es", "wir", "ihr"];

/// Returns true when `correct_form` appears in `user_input`.
///
/// Each whitespace token is compared case-insensitively after trailing
/// punctuation is stripped; if no token matches, the entire trimmed input is
/// compared to the form as a last resort (which also accepts a multi-word
/// form typed verbatim).
pub fn matches(user_input: &str, correct_form: &str) -> bool {
    let wanted = correct_form.trim().to_lowercase();
    let token_hit = user_input.split_whitespace().any(|token| {
        token
            .trim_end_matches(TRAILING_PUNCTUATION)
            .to_lowercase()
            == wanted
    });
    token_hit || user_input.trim().to_lowercase() == wanted
}

/// Heuristic for "this answer is a candidate full sentence": three or more
/// tokens with sentence-final punctuation, or any token that is a subject
/// pronoun.
///
/// Callers currently gate the grammar check on a simpler more-than-one-token
/// test; this predicate is the richer alternative.
pub fn is_full_sentence(text: &str) -> bool {
    let token_count = text.split_whitespace().count();
    if token_count >= 3 && text.contains(['.', '!', '?']) {
        return true;
    }
    text.split_whitespace().any(|token| {
        SUBJECT_PRONOUNS.contains(
            &token
                .trim_end_matches(TRAILING_PUNCTUATION)
                .to_lowercase()
                .as_str(),
        )
    })
}
