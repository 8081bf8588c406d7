//! Error types for the kb-runtime crate.

use thiserror::Error;

/// Errors returned by the search engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The trimmed query is shorter than the configured minimum.
    #[error("query must be at least {min} characters (got {len})")]
    QueryTooShort {
        /// Minimum length in characters.
        min: usize,
        /// Length of the trimmed query in characters.
        len: usize,
    },
}
