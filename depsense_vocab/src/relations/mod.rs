//! Relation kinds: the fixed categories of fact a concept can carry.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// All relation kinds known to the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationKind {
    /// Category membership ("numpy is a library").
    #[serde(rename = "IS-A")]
    IsA,
    /// Alternative name ("np is an alias of numpy").
    #[serde(rename = "ALIAS-OF")]
    AliasOf,
    /// Directed dependency. Always paired with `RequiredBy` on the target.
    #[serde(rename = "DEPENDS-ON")]
    DependsOn,
    /// Symmetric incompatibility.
    #[serde(rename = "CONFLICTS-WITH")]
    ConflictsWith,
    /// The known-good version. Holds at most one value.
    #[serde(rename = "STABLE-VERSION")]
    StableVersion,
    /// A remedy for a problem with the concept.
    #[serde(rename = "SOLUTION-FOR")]
    SolutionFor,
    /// Reverse of `DependsOn`.
    #[serde(rename = "REQUIRED-BY")]
    RequiredBy,
}

impl RelationKind {
    /// Every relation kind, in canonical order.
    pub const ALL: [RelationKind; 7] = [
        RelationKind::IsA,
        RelationKind::AliasOf,
        RelationKind::DependsOn,
        RelationKind::ConflictsWith,
        RelationKind::StableVersion,
        RelationKind::SolutionFor,
        RelationKind::RequiredBy,
    ];

    /// The wire tag used in snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::IsA => "IS-A",
            RelationKind::AliasOf => "ALIAS-OF",
            RelationKind::DependsOn => "DEPENDS-ON",
            RelationKind::ConflictsWith => "CONFLICTS-WITH",
            RelationKind::StableVersion => "STABLE-VERSION",
            RelationKind::SolutionFor => "SOLUTION-FOR",
            RelationKind::RequiredBy => "REQUIRED-BY",
        }
    }

    /// Whether recording `a -> b` implies `b -> a` of the same kind.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, RelationKind::ConflictsWith)
    }

    /// The kind written on the target when this kind is written on the source.
    pub fn inverse(&self) -> Option<RelationKind> {
        match self {
            RelationKind::DependsOn => Some(RelationKind::RequiredBy),
            RelationKind::RequiredBy => Some(RelationKind::DependsOn),
            _ => None,
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string is not a relation tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation kind: {0}")]
pub struct UnknownRelationKind(pub String);

impl FromStr for RelationKind {
    type Err = UnknownRelationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        RelationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| UnknownRelationKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tags() {
        assert_eq!(RelationKind::IsA.as_str(), "IS-A");
        assert_eq!(RelationKind::RequiredBy.to_string(), "REQUIRED-BY");
        assert_eq!(
            serde_json::to_string(&RelationKind::ConflictsWith).unwrap(),
            "\"CONFLICTS-WITH\""
        );
    }

    #[test]
    fn test_parse_round_trip() {
        for kind in RelationKind::ALL {
            assert_eq!(kind.as_str().parse::<RelationKind>().unwrap(), kind);
        }
        assert_eq!("depends-on".parse::<RelationKind>().unwrap(), RelationKind::DependsOn);
        assert!("FRIEND-OF".parse::<RelationKind>().is_err());
    }

    #[test]
    fn test_pairing_rules() {
        assert_eq!(RelationKind::DependsOn.inverse(), Some(RelationKind::RequiredBy));
        assert_eq!(RelationKind::RequiredBy.inverse(), Some(RelationKind::DependsOn));
        assert_eq!(RelationKind::IsA.inverse(), None);
        assert!(RelationKind::ConflictsWith.is_symmetric());
        assert!(!RelationKind::DependsOn.is_symmetric());
    }
}
