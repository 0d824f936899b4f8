//! Runtime configuration, loaded from a TOML file.
//!
//! Every field has a default, so an empty or partial file is valid:
//!
//! ```toml
//! [snapshot]
//! path = "deps.json"
//!
//! [extraction]
//! window = 3
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the snapshot path.
pub const SNAPSHOT_ENV: &str = "DEPSENSE_SNAPSHOT";

/// Default snapshot file name.
pub const DEFAULT_SNAPSHOT_PATH: &str = "depsense_snapshot.json";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepsenseConfig {
    pub snapshot: SnapshotConfig,
    pub extraction: ExtractionConfig,
    pub display: DisplayConfig,
}

impl DepsenseConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given and present, otherwise use defaults.
    ///
    /// The snapshot path is then overridden by `DEPSENSE_SNAPSHOT` when set.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => Self::load(path)?,
            _ => Self::default(),
        };
        if let Ok(snapshot) = std::env::var(SNAPSHOT_ENV) {
            if !snapshot.trim().is_empty() {
                config.snapshot.path = PathBuf::from(snapshot);
            }
        }
        Ok(config)
    }
}

/// Where and how the knowledge base is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: PathBuf,
    /// Save right after every learn command.
    pub autosave_on_learn: bool,
    /// Write indented JSON.
    pub pretty: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            autosave_on_learn: true,
            pretty: true,
        }
    }
}

/// Tunables for sentence ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Co-occurrence window on each side of a token.
    pub window: usize,
    /// Sentences with fewer tokens are ignored.
    pub min_tokens: usize,
    /// Characters of the raw sentence kept as context.
    pub context_chars: usize,
    /// Characters of a crash reason kept as context.
    pub crash_reason_chars: usize,
    /// Lines starting with this character are comments.
    pub comment_marker: char,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            window: 3,
            min_tokens: 2,
            context_chars: 100,
            crash_reason_chars: 50,
            comment_marker: '#',
        }
    }
}

/// When to emit terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// Presentation settings for the command-line front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: ColorChoice,
    pub banner: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            banner: true,
        }
    }
}
