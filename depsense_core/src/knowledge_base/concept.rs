//! Concept definitions - one record per distinct term.

use depsense_vocab::{ConceptName, RelationKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The ordered relation lists of a concept, one slot per relation kind.
///
/// Lists are append-only and never hold duplicates. The stable version is a
/// single slot that is overwritten. Mutation is crate-private so the store
/// can keep inverse and symmetric pairs in step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relations {
    #[serde(rename = "IS-A", default)]
    is_a: Vec<ConceptName>,

    #[serde(rename = "ALIAS-OF", default)]
    alias_of: Vec<ConceptName>,

    #[serde(rename = "DEPENDS-ON", default)]
    depends_on: Vec<ConceptName>,

    #[serde(rename = "CONFLICTS-WITH", default)]
    conflicts_with: Vec<ConceptName>,

    /// Serialized as a list of zero or one version strings.
    #[serde(rename = "STABLE-VERSION", default, with = "version_slot")]
    stable_version: Option<String>,

    #[serde(rename = "SOLUTION-FOR", default)]
    solution_for: Vec<ConceptName>,

    #[serde(rename = "REQUIRED-BY", default)]
    required_by: Vec<ConceptName>,
}

impl Relations {
    /// Targets recorded under a list kind. Empty for `StableVersion`.
    pub fn targets(&self, kind: RelationKind) -> &[ConceptName] {
        match kind {
            RelationKind::IsA => &self.is_a,
            RelationKind::AliasOf => &self.alias_of,
            RelationKind::DependsOn => &self.depends_on,
            RelationKind::ConflictsWith => &self.conflicts_with,
            RelationKind::SolutionFor => &self.solution_for,
            RelationKind::RequiredBy => &self.required_by,
            RelationKind::StableVersion => &[],
        }
    }

    /// Values of any kind as strings, including the version slot.
    pub fn values(&self, kind: RelationKind) -> Vec<&str> {
        match kind {
            RelationKind::StableVersion => self.stable_version.as_deref().into_iter().collect(),
            _ => self.targets(kind).iter().map(ConceptName::as_str).collect(),
        }
    }

    pub fn stable_version(&self) -> Option<&str> {
        self.stable_version.as_deref()
    }

    /// Check whether `target` is recorded under `kind`.
    pub fn contains(&self, kind: RelationKind, target: &str) -> bool {
        match kind {
            RelationKind::StableVersion => self.stable_version.as_deref() == Some(target),
            _ => self.targets(kind).iter().any(|t| t == target),
        }
    }

    /// Total number of stored values over every kind.
    pub fn total(&self) -> usize {
        RelationKind::ALL
            .iter()
            .map(|kind| match kind {
                RelationKind::StableVersion => usize::from(self.stable_version.is_some()),
                _ => self.targets(*kind).len(),
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Append `target` under a list kind unless already present.
    ///
    /// Returns `true` if the list changed. `StableVersion` overwrites.
    pub(crate) fn push_unique(&mut self, kind: RelationKind, target: ConceptName) -> bool {
        let list = match kind {
            RelationKind::IsA => &mut self.is_a,
            RelationKind::AliasOf => &mut self.alias_of,
            RelationKind::DependsOn => &mut self.depends_on,
            RelationKind::ConflictsWith => &mut self.conflicts_with,
            RelationKind::SolutionFor => &mut self.solution_for,
            RelationKind::RequiredBy => &mut self.required_by,
            RelationKind::StableVersion => return self.set_stable_version(target.into()),
        };
        if list.contains(&target) {
            false
        } else {
            list.push(target);
            true
        }
    }

    /// Replace the stable version. Returns `true` if the value changed.
    pub(crate) fn set_stable_version(&mut self, version: String) -> bool {
        if self.stable_version.as_deref() == Some(version.as_str()) {
            return false;
        }
        self.stable_version = Some(version);
        true
    }
}

mod version_slot {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let slot: Vec<&String> = value.iter().collect();
        slot.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let slot = Vec::<String>::deserialize(deserializer)?;
        Ok(slot.into_iter().next())
    }
}

/// A stored record for one distinct term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    #[serde(rename = "word")]
    name: ConceptName,

    /// Co-occurring token -> strength. Mirrors the store-wide table.
    #[serde(default)]
    links: HashMap<String, u32>,

    #[serde(rename = "tags", default)]
    relations: Relations,

    /// Number of sentences this concept appeared in.
    #[serde(rename = "activations", default)]
    pub activation_count: u32,

    /// Sentence prefixes and crash notes, oldest first.
    #[serde(default)]
    pub contexts: Vec<String>,
}

impl Concept {
    /// Create an empty concept.
    pub fn new(name: ConceptName) -> Self {
        Self {
            name,
            links: HashMap::new(),
            relations: Relations::default(),
            activation_count: 0,
            contexts: Vec::new(),
        }
    }

    pub fn name(&self) -> &ConceptName {
        &self.name
    }

    pub fn relations(&self) -> &Relations {
        &self.relations
    }

    pub fn links(&self) -> &HashMap<String, u32> {
        &self.links
    }

    /// Link strength towards `token`, zero if never seen together.
    pub fn link_strength(&self, token: &str) -> u32 {
        self.links.get(token).copied().unwrap_or(0)
    }

    /// Context snippets that mention a crash.
    pub fn crash_contexts(&self) -> impl Iterator<Item = &str> {
        self.contexts
            .iter()
            .map(String::as_str)
            .filter(|context| context.contains("crash"))
    }

    pub(crate) fn relations_mut(&mut self) -> &mut Relations {
        &mut self.relations
    }

    pub(crate) fn strengthen_link(&mut self, token: &str) {
        *self.links.entry(token.to_string()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_creation() {
        let concept = Concept::new(ConceptName::new("NumPy"));
        assert_eq!(concept.name(), &ConceptName::new("numpy"));
        assert_eq!(concept.activation_count, 0);
        assert!(concept.relations().is_empty());
        assert!(concept.links().is_empty());
    }

    #[test]
    fn test_push_unique_deduplicates() {
        let mut relations = Relations::default();
        assert!(relations.push_unique(RelationKind::DependsOn, "numpy".into()));
        assert!(!relations.push_unique(RelationKind::DependsOn, "NumPy.".into()));
        assert!(relations.push_unique(RelationKind::DependsOn, "scipy".into()));
        assert_eq!(relations.values(RelationKind::DependsOn), vec!["numpy", "scipy"]);
    }

    #[test]
    fn test_stable_version_overwrites() {
        let mut relations = Relations::default();
        relations.set_stable_version("1.0".into());
        relations.set_stable_version("2.0".into());
        assert_eq!(relations.values(RelationKind::StableVersion), vec!["2.0"]);
        assert!(relations.targets(RelationKind::StableVersion).is_empty());
        assert_eq!(relations.total(), 1);
    }

    #[test]
    fn test_relations_wire_layout() {
        let mut relations = Relations::default();
        relations.push_unique(RelationKind::IsA, "library".into());
        relations.set_stable_version("1.26".into());

        let json = serde_json::to_value(&relations).unwrap();
        assert_eq!(json["IS-A"], serde_json::json!(["library"]));
        assert_eq!(json["STABLE-VERSION"], serde_json::json!(["1.26"]));
        assert_eq!(json["REQUIRED-BY"], serde_json::json!([]));

        let back: Relations = serde_json::from_value(json).unwrap();
        assert_eq!(back, relations);
    }

    #[test]
    fn test_crash_contexts() {
        let mut concept = Concept::new("sklearn".into());
        concept.contexts.push("sklearn is a library".into());
        concept.contexts.push("crashes: scipy is too old".into());
        assert_eq!(
            concept.crash_contexts().collect::<Vec<_>>(),
            vec!["crashes: scipy is too old"]
        );
    }
}
