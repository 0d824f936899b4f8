//! Crate-wide error type.

use depsense_vocab::ConfigError;

use crate::extractor::IngestError;
use crate::knowledge_base::SnapshotError;

/// Any failure surfaced by the engine. Questions never fail.
#[derive(Debug, thiserror::Error)]
pub enum DepsenseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T, E = DepsenseError> = std::result::Result<T, E>;
