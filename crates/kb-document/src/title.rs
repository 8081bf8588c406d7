//! Title extraction.
//!
//! A document's title is its first heading of any level. Markdown is parsed with
//! `pulldown-cmark`, so `#` lines inside code fences are not mistaken for headings.
//! Plain text uses the first line that starts with `#`.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// The flavour of a source file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Markdown (`.md`, `.markdown`).
    Markdown,
    /// Anything else that passed the include patterns.
    Text,
}

impl DocumentKind {
    /// Picks the kind from a file extension.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("md" | "markdown") => Self::Markdown,
            _ => Self::Text,
        }
    }
}

/// Extracts the first heading of a document, if it has one.
pub fn extract_title(content: &str, kind: DocumentKind) -> Option<String> {
    let title = match kind {
        DocumentKind::Markdown => first_markdown_heading(content),
        DocumentKind::Text => first_marker_line(content),
    }?;
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Returns the text of the first markdown heading.
fn first_markdown_heading(content: &str) -> Option<String> {
    let mut heading: Option<String> = None;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { .. }) => heading = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(ref mut h) = heading {
                    h.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(h) = heading.take()
                    && !h.trim().is_empty()
                {
                    return Some(h);
                }
            }
            _ => {}
        }
    }

    None
}

/// Returns the first line that starts with a `#` marker, without the marker.
fn first_marker_line(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with('#'))
        .map(|line| line.trim_start_matches('#').trim())
        .find(|title| !title.is_empty())
        .map(str::to_string)
}
