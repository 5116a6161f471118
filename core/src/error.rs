//! Error taxonomy for table loading, configuration and syllable decoding.

use std::path::PathBuf;

use crate::table::TableRole;

/// A required rule table could not be loaded.
///
/// Load errors are fatal: no partially loaded dialect is ever used.
#[derive(Debug, thiserror::Error)]
pub enum TableLoadError {
    #[error("failed to read {role} table {}: {source}", .path.display())]
    Io {
        role: TableRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {role} table ({origin}): {source}")]
    Parse {
        role: TableRole,
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{role} table ({origin}) has no entries")]
    EmptyTable { role: TableRole, origin: String },
    #[error("punctuation key {key:?} in {origin} must be a single character")]
    InvalidPunctuationKey { key: String, origin: String },
    #[error("cannot compile token pattern from tables: {0}")]
    Pattern(#[from] regex::Error),
}

/// Why a single syllable could not be decomposed.
///
/// This never escapes a conversion call: the renderer substitutes the error
/// cell and the rest of the line continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeFailure {
    #[error("no rime matches after onset in {0:?}")]
    NoRime(String),
    #[error("coda remainder {remainder:?} in {syllable:?} is neither a checked final nor a consonant run")]
    UnparsableCoda { syllable: String, remainder: String },
    #[error("{0:?} is not a valid onset")]
    InvalidOnset(String),
}

/// Configuration file errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
