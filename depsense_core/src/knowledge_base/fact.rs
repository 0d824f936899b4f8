//! Fact definitions - typed edges extracted from a sentence.

use depsense_vocab::ConceptName;
use serde::{Deserialize, Serialize};

/// A single piece of knowledge detected in a sentence.
///
/// Each variant maps onto one store mutation. `Dependency` and `Conflict`
/// expand into two relation writes when recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fact {
    /// `subject` IS-A `category`.
    Category {
        subject: ConceptName,
        category: ConceptName,
    },

    /// `alias` ALIAS-OF `original`.
    Alias {
        alias: ConceptName,
        original: ConceptName,
    },

    /// `dependent` DEPENDS-ON `dependency`, and the REQUIRED-BY inverse.
    Dependency {
        dependent: ConceptName,
        dependency: ConceptName,
    },

    /// Symmetric CONFLICTS-WITH between two modules.
    Conflict { a: ConceptName, b: ConceptName },

    /// Overwrites the module's STABLE-VERSION.
    StableVersion { module: ConceptName, version: String },

    /// `solution` is a SOLUTION-FOR `problem`.
    Solution {
        problem: ConceptName,
        solution: ConceptName,
    },

    /// Free-text crash reason kept as a context snippet.
    CrashNote { module: ConceptName, reason: String },
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fact::Category { subject, category } => write!(f, "{} IS-A {}", subject, category),
            Fact::Alias { alias, original } => write!(f, "{} ALIAS-OF {}", alias, original),
            Fact::Dependency {
                dependent,
                dependency,
            } => write!(f, "{} DEPENDS-ON {}", dependent, dependency),
            Fact::Conflict { a, b } => write!(f, "{} CONFLICTS-WITH {}", a, b),
            Fact::StableVersion { module, version } => {
                write!(f, "{} STABLE-VERSION {}", module, version)
            }
            Fact::Solution { problem, solution } => {
                write!(f, "{} SOLUTION-FOR {}", problem, solution)
            }
            Fact::CrashNote { module, reason } => write!(f, "{} crashes: {}", module, reason),
        }
    }
}
