//! Snapshots - the flat document the whole store is persisted as.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use depsense_vocab::ConceptName;

use super::Concept;

/// Version tag written into every snapshot.
pub const SNAPSHOT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised while persisting or retrieving a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Summary counters stored next to the concepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotStats {
    #[serde(rename = "beacons", default)]
    pub concepts: usize,
    #[serde(default)]
    pub cooccurrences: usize,
}

/// The serialized form of a concept store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub version: String,

    #[serde(rename = "beacons", default)]
    pub concepts: HashMap<ConceptName, Concept>,

    #[serde(default)]
    pub stats: SnapshotStats,
}

impl SnapshotDocument {
    /// Encode as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String, SnapshotError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Decode from JSON.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Persists and retrieves snapshot documents.
///
/// `load` returns `Ok(None)` when there is nothing stored yet.
pub trait SnapshotRepository {
    fn load(&self) -> Result<Option<SnapshotDocument>, SnapshotError>;
    fn save(&self, document: &SnapshotDocument) -> Result<(), SnapshotError>;
}

/// Stores the snapshot as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshotRepository {
    path: PathBuf,
    pretty: bool,
}

impl FileSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Toggle indented output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn load(&self) -> Result<Option<SnapshotDocument>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        SnapshotDocument::from_json(&text).map(Some)
    }

    fn save(&self, document: &SnapshotDocument) -> Result<(), SnapshotError> {
        let json = document.to_json(self.pretty)?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

/// Keeps the encoded snapshot in memory.
#[derive(Debug, Default)]
pub struct MemorySnapshotRepository {
    slot: RefCell<Option<String>>,
}

impl MemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last saved JSON, if any.
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn load(&self) -> Result<Option<SnapshotDocument>, SnapshotError> {
        self.slot
            .borrow()
            .as_deref()
            .map(SnapshotDocument::from_json)
            .transpose()
    }

    fn save(&self, document: &SnapshotDocument) -> Result<(), SnapshotError> {
        *self.slot.borrow_mut() = Some(document.to_json(false)?);
        Ok(())
    }
}
