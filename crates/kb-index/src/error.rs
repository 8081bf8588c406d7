//! Error types for the kb-index crate.

use std::{io, path::PathBuf};

use kb_config::ConfigError;
use kb_document::{DocId, DocumentError, IdError};
use thiserror::Error;

/// Errors that can occur while scanning content or building and loading bundles.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A source file could not be opened or is not valid UTF-8.
    #[error("cannot read {path}: {source}")]
    UnreadableSource {
        /// Path to the source file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Two source files resolve to the same document id.
    #[error("duplicate document id '{id}': {first} and {second}")]
    DuplicateId {
        /// The colliding id.
        id: DocId,
        /// Source file that claimed the id first.
        first: PathBuf,
        /// Source file that collided with it.
        second: PathBuf,
    },

    /// A source file could not be turned into a document.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A navigation group id could not be formed.
    #[error("invalid group id: {0}")]
    Id(#[from] IdError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No content root is configured.
    #[error("no content root configured (set [content] path in .kb.toml)")]
    NoContentRoot,

    /// The configured content root does not exist.
    #[error("content root does not exist: {path}")]
    ContentRootMissing {
        /// The configured path.
        path: PathBuf,
    },

    /// No configuration file was found, so there is nowhere to write the bundle.
    #[error("no configuration root found (run 'kb init')")]
    NoConfigRoot,

    /// A bundle failed its consistency check.
    #[error("invalid bundle: {0}")]
    InvalidBundle(String),

    /// JSON encoding or decoding error.
    #[error("bundle JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
