//! Fact Extractor - Learns concepts, relations, and token statistics from text.
//!
//! Ingesting a sentence runs these steps in order:
//! 1. **Filter**: Skip empty sentences and comment lines
//! 2. **Tokenize**: Lowercase word tokens; skip sentences that are too short
//! 3. **Detect**: Search every detection rule and record the facts found
//! 4. **Co-occurrence**: Link every token with its neighbours inside the window
//! 5. **Sequence**: Count each token's immediate successor

mod patterns;

pub use patterns::*;

use std::path::{Path, PathBuf};

use depsense_vocab::{ConceptName, ExtractionConfig};
use tracing::{debug, info, trace};

use crate::knowledge_base::{ConceptStore, Fact};

/// Errors raised while reading an ingestion source.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a sentence was not learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing left after trimming.
    Empty,
    /// Starts with the comment marker.
    Comment,
    /// Fewer tokens than the configured minimum.
    TooShort,
}

/// Result of ingesting one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceOutcome {
    Skipped(SkipReason),
    Learned { facts: Vec<Fact>, tokens: usize },
}

/// Split raw text into trimmed, non-empty sentences.
///
/// Sentences end at `.`, `!`, `?`, and line breaks.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercase word tokens of a sentence.
pub fn tokenize(sentence: &str) -> Vec<String> {
    let lowered = sentence.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// The fact extractor turns sentences into store mutations.
#[derive(Debug, Clone, Default)]
pub struct FactExtractor {
    config: ExtractionConfig,
}

impl FactExtractor {
    /// Create a new extractor with the given configuration.
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Create an extractor with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ExtractionConfig::default())
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Detect facts in a sentence without touching any store.
    ///
    /// At most one fact per detection rule, in rule order.
    pub fn extract_facts(&self, sentence: &str) -> Vec<Fact> {
        let lowered = sentence.to_lowercase();

        DETECTION_RULES
            .iter()
            .filter_map(|rule| {
                let (subject, object) = rule.first_match(&lowered)?;
                Some(self.build_fact(rule.kind, subject, object))
            })
            .collect()
    }

    fn build_fact(&self, kind: DetectionKind, subject: &str, object: &str) -> Fact {
        let subject = ConceptName::new(subject);
        match kind {
            DetectionKind::Category => Fact::Category {
                subject,
                category: object.into(),
            },
            DetectionKind::Alias => Fact::Alias {
                alias: subject,
                original: object.into(),
            },
            DetectionKind::Dependency => Fact::Dependency {
                dependent: subject,
                dependency: object.into(),
            },
            DetectionKind::Conflict => Fact::Conflict {
                a: subject,
                b: object.into(),
            },
            DetectionKind::StableVersion => Fact::StableVersion {
                module: subject,
                version: object.to_string(),
            },
            DetectionKind::Solution => Fact::Solution {
                problem: subject,
                solution: object.into(),
            },
            DetectionKind::Crash => Fact::CrashNote {
                module: subject,
                reason: truncate_chars(object, self.config.crash_reason_chars),
            },
        }
    }

    /// Learn from a single sentence.
    pub fn ingest(&self, store: &mut ConceptStore, sentence: &str) -> SentenceOutcome {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return SentenceOutcome::Skipped(SkipReason::Empty);
        }
        if sentence.starts_with(self.config.comment_marker) {
            return SentenceOutcome::Skipped(SkipReason::Comment);
        }

        let tokens = tokenize(sentence);
        if tokens.len() < self.config.min_tokens {
            trace!(sentence, "sentence too short");
            return SentenceOutcome::Skipped(SkipReason::TooShort);
        }

        let facts = self.extract_facts(sentence);
        for fact in &facts {
            store.record(fact);
        }

        let context = truncate_chars(sentence, self.config.context_chars);
        let window = self.config.window;
        for (i, token) in tokens.iter().enumerate() {
            store.activate(token, &context);

            let start = i.saturating_sub(window);
            let end = (i + window + 1).min(tokens.len());
            for (j, other) in tokens.iter().enumerate().take(end).skip(start) {
                if i != j {
                    store.link(token, other);
                }
            }
        }

        for pair in tokens.windows(2) {
            store.follow(&pair[0], &pair[1]);
        }

        debug!(tokens = tokens.len(), facts = facts.len(), "sentence learned");
        SentenceOutcome::Learned {
            tokens: tokens.len(),
            facts,
        }
    }

    /// Learn from raw multi-sentence text.
    ///
    /// Returns the number of sentences passed to [`FactExtractor::ingest`],
    /// including ones it skipped.
    pub fn ingest_source(&self, store: &mut ConceptStore, text: &str) -> usize {
        let sentences = split_sentences(text);
        for sentence in &sentences {
            self.ingest(store, sentence);
        }
        sentences.len()
    }

    /// Learn from a text file.
    pub fn ingest_file(
        &self,
        store: &mut ConceptStore,
        path: impl AsRef<Path>,
    ) -> Result<usize, IngestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let count = self.ingest_source(store, &text);
        info!(path = %path.display(), sentences = count, "ingested file");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsense_vocab::RelationKind;
    use std::io::Write;

    fn learn(sentences: &[&str]) -> ConceptStore {
        let extractor = FactExtractor::with_defaults();
        let mut store = ConceptStore::new();
        for sentence in sentences {
            extractor.ingest(&mut store, sentence);
        }
        store
    }

    fn values<'a>(store: &'a ConceptStore, name: &str, kind: RelationKind) -> Vec<&'a str> {
        store.lookup(name).unwrap().relations().values(kind)
    }

    #[test]
    fn test_split_sentences() {
        let text = "numpy is a library. pandas depends on numpy!\n\nIs it fast?  ";
        assert_eq!(
            split_sentences(text),
            vec!["numpy is a library", "pandas depends on numpy", "Is it fast"]
        );
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Pandas depends on NumPy."),
            vec!["pandas", "depends", "on", "numpy"]
        );
    }

    #[test]
    fn test_skip_reasons() {
        let extractor = FactExtractor::with_defaults();
        let mut store = ConceptStore::new();

        assert_eq!(
            extractor.ingest(&mut store, "   "),
            SentenceOutcome::Skipped(SkipReason::Empty)
        );
        assert_eq!(
            extractor.ingest(&mut store, "# numpy is a library"),
            SentenceOutcome::Skipped(SkipReason::Comment)
        );
        assert_eq!(
            extractor.ingest(&mut store, "numpy!"),
            SentenceOutcome::Skipped(SkipReason::TooShort)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_dependency_inverse_pair() {
        let store = learn(&["pandas depends on numpy."]);
        assert_eq!(values(&store, "pandas", RelationKind::DependsOn), vec!["numpy"]);
        assert_eq!(values(&store, "numpy", RelationKind::RequiredBy), vec!["pandas"]);
    }

    #[test]
    fn test_conflict_symmetry() {
        let store = learn(&["tensorflow and pytorch have a conflict."]);
        assert_eq!(values(&store, "tensorflow", RelationKind::ConflictsWith), vec!["pytorch"]);
        assert_eq!(values(&store, "pytorch", RelationKind::ConflictsWith), vec!["tensorflow"]);
    }

    #[test]
    fn test_repeated_sentence_deduplicated() {
        let store = learn(&["pandas depends on numpy.", "pandas depends on numpy."]);
        assert_eq!(values(&store, "pandas", RelationKind::DependsOn).len(), 1);
        assert_eq!(store.lookup("pandas").unwrap().activation_count, 2);
    }

    #[test]
    fn test_version_overwrite() {
        let store = learn(&["numpy stable version 1.0 is", "numpy stable version 2.0 is"]);
        assert_eq!(values(&store, "numpy", RelationKind::StableVersion), vec!["2.0"]);
    }

    #[test]
    fn test_one_sentence_many_kinds() {
        let extractor = FactExtractor::with_defaults();
        let facts = extractor.extract_facts("Keras is a framework and keras requires tensorflow");

        assert_eq!(
            facts,
            vec![
                Fact::Category {
                    subject: "keras".into(),
                    category: "framework".into(),
                },
                Fact::Dependency {
                    dependent: "keras".into(),
                    dependency: "tensorflow".into(),
                },
            ]
        );
    }

    #[test]
    fn test_crash_note_truncated() {
        let reason = "x".repeat(80);
        let store = learn(&[&format!("sklearn crashes when {}", reason)]);

        let sklearn = store.lookup("sklearn").unwrap();
        let note = sklearn
            .contexts
            .iter()
            .find(|c| c.starts_with("crashes: "))
            .unwrap();
        assert_eq!(note.len(), "crashes: ".len() + 50);
    }

    #[test]
    fn test_solution_detected() {
        let store = learn(&["To fix sklearn you need scipy"]);
        assert_eq!(values(&store, "sklearn", RelationKind::SolutionFor), vec!["scipy"]);
    }

    #[test]
    fn test_cooccurrence_window() {
        let store = learn(&["a b c d e"]);
        let a = store.lookup("a").unwrap();

        assert_eq!(a.link_strength("b"), 1);
        assert_eq!(a.link_strength("d"), 1);
        assert_eq!(a.link_strength("e"), 0);
        assert_eq!(a.link_strength("a"), 0);
        assert_eq!(store.cooccurrences().count("e", "b"), 1);
        assert_eq!(store.cooccurrences().count("e", "a"), 0);
    }

    #[test]
    fn test_activation_and_context() {
        let long = format!("numpy is a library {}", "y".repeat(200));
        let store = learn(&[&long]);

        let numpy = store.lookup("numpy").unwrap();
        assert_eq!(numpy.activation_count, 1);
        assert_eq!(numpy.contexts[0].chars().count(), 100);
    }

    #[test]
    fn test_sequences() {
        let store = learn(&["pandas depends on numpy", "pandas depends on pytz"]);
        assert_eq!(store.sequences().count("pandas", "depends"), 2);
        assert_eq!(store.sequences().count("on", "numpy"), 1);
        assert_eq!(store.sequences().count("numpy", "pandas"), 0);
    }

    #[test]
    fn test_ingest_source_counts_attempts() {
        let extractor = FactExtractor::with_defaults();
        let mut store = ConceptStore::new();

        let count = extractor.ingest_source(
            &mut store,
            "# deps\nnumpy is a library.\npandas depends on numpy. ok\n",
        );
        assert_eq!(count, 4);
        assert!(store.contains("pandas"));
        assert!(!store.contains("deps"));
    }

    #[test]
    fn test_ingest_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tensorflow and pytorch have a conflict.").unwrap();
        writeln!(file, "keras needs tensorflow.").unwrap();

        let extractor = FactExtractor::with_defaults();
        let mut store = ConceptStore::new();
        assert_eq!(extractor.ingest_file(&mut store, file.path()).unwrap(), 2);
        assert_eq!(values(&store, "tensorflow", RelationKind::RequiredBy), vec!["keras"]);
    }

    #[test]
    fn test_ingest_missing_file() {
        let extractor = FactExtractor::with_defaults();
        let mut store = ConceptStore::new();
        let err = extractor
            .ingest_file(&mut store, "/definitely/not/here.txt")
            .unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
