//! Document model for kb.
//!
//! This crate turns a single source file into a [`Document`]:
//! - Path segments derived from the file's location, slug-normalized
//! - A stable [`DocId`] that doubles as the addressable fragment
//! - A title taken from the first heading, or derived from the path

#![warn(missing_docs)]

mod error;
mod id;
mod parse;
mod slug;
mod title;

pub use error::DocumentError;
pub use id::{DocId, IdError, SEGMENT_SEPARATOR};
pub use parse::{ParsedDocument, TitleSource, derive_title, document_path, parse_document};
use serde::{Deserialize, Serialize};
pub use slug::{FALLBACK_SEGMENT, slugify_segment, title_case};
pub use title::{DocumentKind, extract_title};

/// A single document in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier, the `/`-joined `path`.
    pub id: DocId,
    /// First heading in the body, or the title-cased final path segment.
    pub title: String,
    /// Segment names from the content root to this document.
    pub path: Vec<String>,
    /// Raw text of the source file.
    pub body: String,
    /// Source file path relative to the content root, `/`-separated.
    pub source: String,
}
