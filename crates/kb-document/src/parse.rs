//! Turning source files into documents.
//!
//! The document path is derived from the file's location relative to the content root,
//! and the title from the body's first heading.

use std::path::{Component, Path};

use crate::{
    DocId, Document, DocumentError,
    slug::{slugify_segment, title_case},
    title::{DocumentKind, extract_title},
};

/// Where a document's title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// The first heading in the body.
    Heading,
    /// The title-cased final path segment, because the body has no heading.
    Derived,
}

/// Result of parsing a source file.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// The parsed document.
    pub document: Document,
    /// How the title was determined.
    pub title_source: TitleSource,
}

/// Derives the normalized segment path of a source file.
///
/// Directory names and the file stem are slug-normalized and the extension is dropped.
/// A file whose stem is one of `index_files` (compared case-insensitively) stands for its
/// directory, unless it sits at the content root.
pub fn document_path(rel_path: &Path, index_files: &[String]) -> Result<Vec<String>, DocumentError> {
    let invalid = || DocumentError::InvalidPath {
        path: rel_path.to_path_buf(),
    };

    let mut names = Vec::new();
    for component in rel_path.components() {
        match component {
            Component::Normal(name) => names.push(name.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return Err(invalid()),
        }
    }

    let file_name = names.pop().ok_or_else(invalid)?;
    let stem = Path::new(&file_name)
        .file_stem()
        .map_or_else(|| file_name.clone(), |s| s.to_string_lossy().into_owned());

    let mut segments: Vec<String> = names.iter().map(|name| slugify_segment(name)).collect();

    let is_index = index_files
        .iter()
        .any(|index| index.eq_ignore_ascii_case(&stem));
    if !(is_index && !segments.is_empty()) {
        segments.push(slugify_segment(&stem));
    }

    Ok(segments)
}

/// Returns the fallback title for a path: its final segment, title-cased.
pub fn derive_title(path: &[String]) -> String {
    path.last()
        .map(|segment| title_case(segment))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Parses a source file's contents into a document.
///
/// `rel_path` is the file's path relative to the content root. Its extension decides
/// whether the body is treated as markdown or plain text for title extraction.
pub fn parse_document(
    rel_path: &Path,
    body: String,
    index_files: &[String],
) -> Result<ParsedDocument, DocumentError> {
    let path = document_path(rel_path, index_files)?;
    let id = DocId::from_segments(&path).map_err(|source| DocumentError::Id {
        path: rel_path.to_path_buf(),
        source,
    })?;

    let kind = DocumentKind::from_extension(rel_path.extension().and_then(|e| e.to_str()));
    let (title, title_source) = match extract_title(&body, kind) {
        Some(title) => (title, TitleSource::Heading),
        None => (derive_title(&path), TitleSource::Derived),
    };

    let source = rel_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    Ok(ParsedDocument {
        document: Document {
            id,
            title,
            path,
            body,
            source,
        },
        title_source,
    })
}
