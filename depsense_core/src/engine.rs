//! The Depsense facade - one store, one extractor, one answerer.

use std::path::Path;

use depsense_vocab::DepsenseConfig;

use crate::answerer::{QueryAnswerer, Response};
use crate::error::Result;
use crate::extractor::{FactExtractor, SentenceOutcome};
use crate::knowledge_base::{ConceptStore, SnapshotRepository, StoreStats};

/// Owns the process-wide concept store and the components that use it.
#[derive(Debug, Clone, Default)]
pub struct Depsense {
    store: ConceptStore,
    extractor: FactExtractor,
    answerer: QueryAnswerer,
}

impl Depsense {
    /// Create an empty knowledge base with default extraction settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty knowledge base using `config`.
    pub fn with_config(config: &DepsenseConfig) -> Self {
        Self {
            store: ConceptStore::new(),
            extractor: FactExtractor::new(config.extraction.clone()),
            answerer: QueryAnswerer::new(),
        }
    }

    pub fn store(&self) -> &ConceptStore {
        &self.store
    }

    /// Learn from one sentence.
    pub fn learn_sentence(&mut self, sentence: &str) -> SentenceOutcome {
        self.extractor.ingest(&mut self.store, sentence)
    }

    /// Learn from raw text. Returns the number of sentences processed.
    pub fn learn_text(&mut self, text: &str) -> usize {
        self.extractor.ingest_source(&mut self.store, text)
    }

    /// Learn from a text file.
    pub fn learn_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        Ok(self.extractor.ingest_file(&mut self.store, path)?)
    }

    /// Answer a question.
    pub fn answer(&self, question: &str) -> Response {
        self.answerer.answer(&self.store, question)
    }

    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    /// Persist the store.
    pub fn save(&self, repository: &dyn SnapshotRepository) -> Result<()> {
        Ok(self.store.save(repository)?)
    }

    /// Replace the store's concepts from a saved snapshot.
    ///
    /// Returns `false` when nothing was stored yet.
    pub fn load(&mut self, repository: &dyn SnapshotRepository) -> Result<bool> {
        Ok(self.store.load(repository)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answerer::Outcome;
    use crate::knowledge_base::FileSnapshotRepository;

    const FACTS: &str = "\
# sample knowledge
numpy is a computation module.
pandas depends on numpy.
tensorflow and pytorch have a conflict.
sklearn crashes if scipy is too old.
";

    #[test]
    fn test_learn_and_answer() {
        let mut depsense = Depsense::new();
        assert_eq!(depsense.learn_text(FACTS), 5);

        let response = depsense.answer("are tensorflow and pytorch compatible?");
        assert!(response.to_plain_string().contains("CONFLICT DETECTED"));

        let response = depsense.answer("who uses numpy");
        assert!(response.to_plain_string().contains("└─ pandas"));
    }

    #[test]
    fn test_custom_window() {
        let mut config = DepsenseConfig::default();
        config.extraction.window = 1;

        let mut depsense = Depsense::with_config(&config);
        depsense.learn_sentence("a b c");
        let a = depsense.store().lookup("a").unwrap();
        assert_eq!(a.link_strength("b"), 1);
        assert_eq!(a.link_strength("c"), 0);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("snapshot.json"));

        let mut depsense = Depsense::new();
        depsense.learn_text(FACTS);
        depsense.save(&repo).unwrap();

        let mut restored = Depsense::new();
        assert!(restored.load(&repo).unwrap());
        assert_eq!(restored.stats().concepts, depsense.stats().concepts);
        assert_eq!(
            restored.answer("what is numpy").to_plain_string(),
            depsense.answer("what is numpy").to_plain_string()
        );
    }

    #[test]
    fn test_load_missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("absent.json"));

        let mut depsense = Depsense::new();
        assert!(!depsense.load(&repo).unwrap());
        assert_eq!(depsense.answer("what is numpy").outcome, Outcome::UnknownConcept);
    }
}
