//! Concept names - the identity key of every stored concept.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Characters stripped from the end of a name.
pub const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Normalize a raw word into its concept key.
///
/// Lowercases, trims surrounding whitespace, and strips trailing `.,;:!?`.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .trim()
        .trim_end_matches(TRAILING_PUNCTUATION)
        .to_string()
}

/// A normalized concept name.
///
/// Two spellings that differ only in case or trailing punctuation produce
/// equal names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ConceptName(String);

impl ConceptName {
    /// Create a name from raw text, normalizing it.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize(raw.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ConceptName {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for ConceptName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<ConceptName> for String {
    fn from(name: ConceptName) -> Self {
        name.0
    }
}

impl AsRef<str> for ConceptName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConceptName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConceptName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConceptName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for ConceptName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("NumPy."), "numpy");
        assert_eq!(normalize("  Pandas?! "), "pandas");
        assert_eq!(normalize("scipy,;:"), "scipy");
        assert_eq!(normalize("1.0"), "1.0");
    }

    #[test]
    fn test_spellings_collapse() {
        assert_eq!(ConceptName::new("NumPy."), ConceptName::new("numpy"));
        assert_ne!(ConceptName::new("numpy"), ConceptName::new("pandas"));
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut map = HashMap::new();
        map.insert(ConceptName::new("Keras"), 1);
        assert_eq!(map.get("keras"), Some(&1));
    }

    #[test]
    fn test_serde_normalizes() {
        let name: ConceptName = serde_json::from_str("\"TensorFlow!\"").unwrap();
        assert_eq!(name, "tensorflow");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"tensorflow\"");
    }
}
