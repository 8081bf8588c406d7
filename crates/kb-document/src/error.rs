//! Error types for document parsing.

use std::path::PathBuf;

use thiserror::Error;

use crate::IdError;

/// Errors that can occur when turning a source file into a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The relative path has no usable segments (empty, or contains `..`/root components).
    #[error("cannot derive a document path from {path}")]
    InvalidPath {
        /// The offending relative path.
        path: PathBuf,
    },

    /// The derived segments do not form a valid id.
    #[error("invalid document id for {path}: {source}")]
    Id {
        /// Source file the id was derived from.
        path: PathBuf,
        /// Underlying id error.
        source: IdError,
    },
}
