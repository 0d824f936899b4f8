//! Query Answerer - Matches a question to an intent and renders an answer.
//!
//! Intents are tried in a fixed priority order and the first matching
//! template wins. Questions that match nothing fall back to describing the
//! first known concept they mention, then to a fixed help message.

mod intents;
pub mod render;
mod response;

pub use intents::*;
pub use response::*;

use tracing::debug;

use crate::extractor::tokenize;
use crate::knowledge_base::ConceptStore;

/// The query answerer reads the store and never modifies it.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryAnswerer;

impl QueryAnswerer {
    pub fn new() -> Self {
        Self
    }

    /// Answer a free-text question. Never fails.
    pub fn answer(&self, store: &ConceptStore, question: &str) -> Response {
        let question = question.trim().to_lowercase();

        for rule in INTENT_RULES.iter() {
            if let Some(args) = rule.first_match(&question) {
                debug!(intent = ?rule.intent, ?args, "question matched");
                return (rule.render)(store, &args);
            }
        }

        if let Some(token) = tokenize(&question)
            .into_iter()
            .find(|token| store.contains(token))
        {
            debug!(%token, "falling back to known concept");
            return render::what_is(store, &token);
        }

        render::not_understood()
    }
}
