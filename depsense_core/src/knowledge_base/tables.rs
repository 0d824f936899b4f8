//! Store-wide count tables for token pairs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Counts how often one token is followed by, or appears near, another.
///
/// Used both for the co-occurrence window and for next-token sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    counts: HashMap<String, HashMap<String, u32>>,
}

impl CountTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count of `from -> to` and return the new value.
    pub fn increment(&mut self, from: &str, to: &str) -> u32 {
        self.add(from, to, 1)
    }

    /// Add `amount` to the count of `from -> to`.
    pub fn add(&mut self, from: &str, to: &str, amount: u32) -> u32 {
        let count = self
            .counts
            .entry(from.to_string())
            .or_default()
            .entry(to.to_string())
            .or_insert(0);
        *count += amount;
        *count
    }

    /// Get the count of `from -> to`.
    pub fn count(&self, from: &str, to: &str) -> u32 {
        self.counts
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct `from -> to` pairs.
    pub fn edge_count(&self) -> usize {
        self.counts.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Remove every count.
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
