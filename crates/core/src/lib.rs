pub mod advisory;
pub mod conjugation;
pub mod matcher;
pub mod progress;
pub mod store;

/// Per-session options, owned by the menu loop and passed by value into
/// every runner invocation.
///
/// Keeping these in one explicit value (instead of ambient globals) means a
/// toggle only takes effect through the next runner call, and the advisory
/// collaborator can be rebuilt whenever `advisory_enabled` flips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Leave the Präteritum out of random selection and training traversal.
    pub exclude_simple_past: bool,
    /// Whether full-sentence answers get a grammar suggestion.
    pub advisory_enabled: bool,
}

impl SessionConfig {
    /// The tenses this session draws questions from, in catalogue order.
    pub fn tenses(&self) -> Vec<crate::conjugation::Tense> {
        crate::conjugation::Tense::for_session(self.exclude_simple_past)
    }
}
