//! Concept Store - the single owner of every concept and count table.

use std::collections::HashMap;

use depsense_vocab::{ConceptName, RelationKind};
use tracing::{debug, info, warn};

use super::{
    Concept, CountTable, Fact, SnapshotDocument, SnapshotError, SnapshotRepository, SnapshotStats,
    SNAPSHOT_VERSION,
};

/// Prefix of the context snippet recorded for a crash note.
pub const CRASH_NOTE_PREFIX: &str = "crashes: ";

/// Summary counters for the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of concepts.
    pub concepts: usize,
    /// Per-concept link entries, summed.
    pub links: usize,
    /// Stored relation values, summed over every kind.
    pub relations: usize,
    /// Distinct pairs in the co-occurrence table.
    pub cooccurrence_edges: usize,
    /// Distinct pairs in the sequence table.
    pub sequence_edges: usize,
}

/// The main concept store.
///
/// Concepts are created on demand and never deleted. Relation writes go
/// through the typed mutators below, which keep DEPENDS-ON/REQUIRED-BY paired
/// and CONFLICTS-WITH symmetric.
#[derive(Debug, Clone, Default)]
pub struct ConceptStore {
    /// All concepts by normalized name.
    concepts: HashMap<ConceptName, Concept>,

    /// Token -> nearby token -> count.
    cooccurrences: CountTable,

    /// Token -> next token -> count.
    sequences: CountTable,
}

impl ConceptStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the concept for `name`, creating an empty one if absent.
    pub fn get_or_create(&mut self, name: &str) -> &mut Concept {
        let key = ConceptName::new(name);
        self.concepts
            .entry(key.clone())
            .or_insert_with(|| Concept::new(key))
    }

    /// Look up an existing concept. Never creates.
    pub fn lookup(&self, name: &str) -> Option<&Concept> {
        self.concepts.get(ConceptName::new(name).as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Get the total number of concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Iterate over all concepts.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// Store-wide co-occurrence counts.
    pub fn cooccurrences(&self) -> &CountTable {
        &self.cooccurrences
    }

    /// Store-wide next-token counts.
    pub fn sequences(&self) -> &CountTable {
        &self.sequences
    }

    /// Record `subject` IS-A `category`.
    pub fn add_category(&mut self, subject: &str, category: &str) -> bool {
        self.push(subject, RelationKind::IsA, category)
    }

    /// Record `alias` ALIAS-OF `original`.
    pub fn add_alias(&mut self, alias: &str, original: &str) -> bool {
        self.push(alias, RelationKind::AliasOf, original)
    }

    /// Record `dependent` DEPENDS-ON `dependency` together with the inverse
    /// `dependency` REQUIRED-BY `dependent`.
    pub fn add_dependency(&mut self, dependent: &str, dependency: &str) -> bool {
        self.push(dependent, RelationKind::DependsOn, dependency)
    }

    /// Record a conflict in both directions.
    pub fn add_conflict(&mut self, a: &str, b: &str) -> bool {
        self.push(a, RelationKind::ConflictsWith, b)
    }

    /// Overwrite the stable version of `module`.
    pub fn set_stable_version(&mut self, module: &str, version: &str) -> bool {
        self.get_or_create(module)
            .relations_mut()
            .set_stable_version(version.to_string())
    }

    /// Record `solution` as a remedy for `problem`.
    pub fn add_solution(&mut self, problem: &str, solution: &str) -> bool {
        self.push(problem, RelationKind::SolutionFor, solution)
    }

    /// Append a crash note to the module's contexts.
    pub fn note_crash(&mut self, module: &str, reason: &str) {
        self.get_or_create(module)
            .contexts
            .push(format!("{}{}", CRASH_NOTE_PREFIX, reason));
    }

    /// Apply one extracted fact. Returns `true` if any relation changed.
    pub fn record(&mut self, fact: &Fact) -> bool {
        debug!(%fact, "recording fact");
        match fact {
            Fact::Category { subject, category } => {
                self.add_category(subject.as_str(), category.as_str())
            }
            Fact::Alias { alias, original } => self.add_alias(alias.as_str(), original.as_str()),
            Fact::Dependency {
                dependent,
                dependency,
            } => self.add_dependency(dependent.as_str(), dependency.as_str()),
            Fact::Conflict { a, b } => self.add_conflict(a.as_str(), b.as_str()),
            Fact::StableVersion { module, version } => {
                self.set_stable_version(module.as_str(), version)
            }
            Fact::Solution { problem, solution } => {
                self.add_solution(problem.as_str(), solution.as_str())
            }
            Fact::CrashNote { module, reason } => {
                self.note_crash(module.as_str(), reason);
                false
            }
        }
    }

    /// Count one sentence occurrence of `token` and keep a context snippet.
    pub(crate) fn activate(&mut self, token: &str, context: &str) {
        let concept = self.get_or_create(token);
        concept.activation_count += 1;
        concept.contexts.push(context.to_string());
    }

    /// Strengthen `token -> other` in both the concept links and the global table.
    pub(crate) fn link(&mut self, token: &str, other: &str) {
        self.get_or_create(token).strengthen_link(other);
        self.cooccurrences.increment(token, other);
    }

    /// Count `next` following `token`.
    pub(crate) fn follow(&mut self, token: &str, next: &str) {
        self.sequences.increment(token, next);
    }

    /// Compute summary counters.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            concepts: self.concepts.len(),
            links: self.concepts.values().map(|c| c.links().len()).sum(),
            relations: self.concepts.values().map(|c| c.relations().total()).sum(),
            cooccurrence_edges: self.cooccurrences.edge_count(),
            sequence_edges: self.sequences.edge_count(),
        }
    }

    /// Produce a snapshot of the concept mapping.
    pub fn export_snapshot(&self) -> SnapshotDocument {
        SnapshotDocument {
            version: SNAPSHOT_VERSION.to_string(),
            concepts: self.concepts.clone(),
            stats: SnapshotStats {
                concepts: self.concepts.len(),
                cooccurrences: self.cooccurrences.edge_count(),
            },
        }
    }

    /// Replace the concept mapping with the document's contents.
    ///
    /// The co-occurrence table is rebuilt from the imported links. The
    /// sequence table is not part of a snapshot and is kept.
    pub fn import_snapshot(&mut self, document: SnapshotDocument) {
        if document.version != SNAPSHOT_VERSION {
            warn!(
                found = %document.version,
                expected = SNAPSHOT_VERSION,
                "snapshot version differs, importing anyway"
            );
        }

        self.cooccurrences.clear();
        for concept in document.concepts.values() {
            for (other, strength) in concept.links() {
                self.cooccurrences.add(concept.name().as_str(), other, *strength);
            }
        }
        self.concepts = document.concepts;
    }

    /// Save a snapshot through `repository`.
    pub fn save(&self, repository: &dyn SnapshotRepository) -> Result<(), SnapshotError> {
        let document = self.export_snapshot();
        repository.save(&document)?;
        info!(concepts = document.stats.concepts, "snapshot saved");
        Ok(())
    }

    /// Load a snapshot through `repository`.
    ///
    /// Returns `Ok(false)` and leaves the store untouched when nothing is stored.
    pub fn load(&mut self, repository: &dyn SnapshotRepository) -> Result<bool, SnapshotError> {
        match repository.load()? {
            Some(document) => {
                self.import_snapshot(document);
                info!(concepts = self.concepts.len(), "snapshot loaded");
                Ok(true)
            }
            None => {
                debug!("no snapshot to load");
                Ok(false)
            }
        }
    }

    /// Write `subject -> target` under `kind`, plus the companion edge on
    /// `target` when the kind is symmetric or has an inverse.
    fn push(&mut self, subject: &str, kind: RelationKind, target: &str) -> bool {
        let forward = self.push_one(subject, kind, target);
        let companion = if kind.is_symmetric() {
            Some(kind)
        } else {
            kind.inverse()
        };
        let backward = companion.map_or(false, |reverse| self.push_one(target, reverse, subject));
        forward || backward
    }

    fn push_one(&mut self, subject: &str, kind: RelationKind, target: &str) -> bool {
        self.get_or_create(subject)
            .relations_mut()
            .push_unique(kind, ConceptName::new(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::MemorySnapshotRepository;

    #[test]
    fn test_get_or_create_normalizes() {
        let mut store = ConceptStore::new();
        store.get_or_create("NumPy.").activation_count += 1;
        store.get_or_create("numpy").activation_count += 1;

        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("NUMPY").unwrap().activation_count, 2);
    }

    #[test]
    fn test_lookup_never_creates() {
        let store = ConceptStore::new();
        assert!(store.lookup("numpy").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_dependency_writes_inverse() {
        let mut store = ConceptStore::new();
        assert!(store.add_dependency("pandas", "numpy"));

        let pandas = store.lookup("pandas").unwrap();
        let numpy = store.lookup("numpy").unwrap();
        assert_eq!(pandas.relations().values(RelationKind::DependsOn), vec!["numpy"]);
        assert_eq!(numpy.relations().values(RelationKind::RequiredBy), vec!["pandas"]);
    }

    #[test]
    fn test_dependency_deduplicated() {
        let mut store = ConceptStore::new();
        store.add_dependency("pandas", "numpy");
        assert!(!store.add_dependency("Pandas", "NumPy."));

        let pandas = store.lookup("pandas").unwrap();
        assert_eq!(pandas.relations().targets(RelationKind::DependsOn).len(), 1);
        let numpy = store.lookup("numpy").unwrap();
        assert_eq!(numpy.relations().targets(RelationKind::RequiredBy).len(), 1);
    }

    #[test]
    fn test_conflict_is_symmetric() {
        let mut store = ConceptStore::new();
        store.add_conflict("tensorflow", "pytorch");

        assert!(store
            .lookup("tensorflow")
            .unwrap()
            .relations()
            .contains(RelationKind::ConflictsWith, "pytorch"));
        assert!(store
            .lookup("pytorch")
            .unwrap()
            .relations()
            .contains(RelationKind::ConflictsWith, "tensorflow"));
    }

    #[test]
    fn test_stable_version_overwritten() {
        let mut store = ConceptStore::new();
        store.set_stable_version("numpy", "1.0");
        store.set_stable_version("numpy", "2.0");

        let numpy = store.lookup("numpy").unwrap();
        assert_eq!(numpy.relations().values(RelationKind::StableVersion), vec!["2.0"]);
    }

    #[test]
    fn test_record_crash_note() {
        let mut store = ConceptStore::new();
        let changed = store.record(&Fact::CrashNote {
            module: "sklearn".into(),
            reason: "scipy is too old".into(),
        });

        assert!(!changed);
        assert_eq!(
            store.lookup("sklearn").unwrap().contexts,
            vec!["crashes: scipy is too old".to_string()]
        );
    }

    #[test]
    fn test_link_updates_both_views() {
        let mut store = ConceptStore::new();
        store.link("pandas", "numpy");
        store.link("pandas", "numpy");

        assert_eq!(store.lookup("pandas").unwrap().link_strength("numpy"), 2);
        assert_eq!(store.cooccurrences().count("pandas", "numpy"), 2);
    }

    #[test]
    fn test_stats() {
        let mut store = ConceptStore::new();
        store.add_dependency("pandas", "numpy");
        store.set_stable_version("numpy", "1.26");
        store.link("pandas", "numpy");
        store.follow("pandas", "depends");

        let stats = store.stats();
        assert_eq!(stats.concepts, 2);
        assert_eq!(stats.links, 1);
        assert_eq!(stats.relations, 3);
        assert_eq!(stats.cooccurrence_edges, 1);
        assert_eq!(stats.sequence_edges, 1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut store = ConceptStore::new();
        store.add_dependency("pandas", "numpy");
        store.add_conflict("tensorflow", "pytorch");
        store.activate("pandas", "pandas depends on numpy.");
        store.link("pandas", "numpy");

        let repo = MemorySnapshotRepository::new();
        store.save(&repo).unwrap();

        let mut fresh = ConceptStore::new();
        assert!(fresh.load(&repo).unwrap());
        assert_eq!(fresh.concepts, store.concepts);
        assert_eq!(fresh.cooccurrences().count("pandas", "numpy"), 1);
    }

    #[test]
    fn test_load_missing_keeps_state() {
        let mut store = ConceptStore::new();
        store.add_category("numpy", "library");

        let repo = MemorySnapshotRepository::new();
        assert!(!store.load(&repo).unwrap());
        assert!(store.contains("numpy"));
    }

    #[test]
    fn test_companion_edges_follow_relation_kinds() {
        for kind in RelationKind::ALL {
            if kind == RelationKind::StableVersion {
                continue;
            }
            let mut store = ConceptStore::new();
            assert!(store.push("a", kind, "b"));

            let b = store.lookup("b");
            let companion = if kind.is_symmetric() {
                Some(kind)
            } else {
                kind.inverse()
            };
            match companion {
                Some(reverse) => assert!(
                    b.unwrap().relations().contains(reverse, "a"),
                    "{} companion missing",
                    kind
                ),
                None => assert!(b.is_none(), "{} wrote a companion", kind),
            }
        }
    }

    #[test]
    fn test_import_older_snapshot_version() {
        let json = r#"{
            "version": "1.0.0",
            "beacons": {
                "numpy": {
                    "word": "numpy",
                    "links": {"pandas": 2},
                    "tags": {
                        "IS-A": ["library"],
                        "ALIAS-OF": [],
                        "DEPENDS-ON": [],
                        "CONFLICTS-WITH": [],
                        "STABLE-VERSION": ["1.26"],
                        "SOLUTION-FOR": [],
                        "REQUIRED-BY": ["pandas"]
                    },
                    "activations": 2,
                    "contexts": ["numpy is a library"]
                },
                "pandas": {
                    "word": "pandas",
                    "links": {"numpy": 2},
                    "tags": {
                        "IS-A": [],
                        "ALIAS-OF": [],
                        "DEPENDS-ON": ["numpy"],
                        "CONFLICTS-WITH": [],
                        "STABLE-VERSION": [],
                        "SOLUTION-FOR": [],
                        "REQUIRED-BY": []
                    },
                    "activations": 1,
                    "contexts": ["pandas depends on numpy"]
                }
            },
            "stats": {"beacons": 2, "cooccurrences": 2}
        }"#;

        let mut store = ConceptStore::new();
        store.import_snapshot(SnapshotDocument::from_json(json).unwrap());

        assert_eq!(store.len(), 2);
        let numpy = store.lookup("numpy").unwrap();
        assert_eq!(numpy.relations().stable_version(), Some("1.26"));
        assert!(numpy.relations().contains(RelationKind::RequiredBy, "pandas"));
        assert_eq!(store.cooccurrences().count("numpy", "pandas"), 2);
        assert_eq!(store.cooccurrences().count("pandas", "numpy"), 2);
    }
}
