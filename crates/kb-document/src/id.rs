//! Document identifiers.
//!
//! A document id is the `/`-joined list of its path segments, e.g.
//! `swe/backend/sql-basics`. The id doubles as the addressable fragment used for
//! deep-linking, so it is kept as a plain string on the wire.

use std::{borrow::Borrow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between id segments.
pub const SEGMENT_SEPARATOR: char = '/';

/// Errors that can occur when parsing document ids.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The id has no segments.
    #[error("empty id")]
    Empty,
    /// The id contains an empty segment (leading, trailing or doubled separator).
    #[error("empty segment in id '{0}'")]
    EmptySegment(String),
}

/// A document identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocId(String);

impl DocId {
    /// Builds an id by joining path segments.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self, IdError> {
        let joined = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("/");
        Self::parse(&joined)
    }

    /// Parses an id, rejecting empty ids and empty segments.
    pub fn parse(id: &str) -> Result<Self, IdError> {
        if id.is_empty() {
            return Err(IdError::Empty);
        }
        if id.split(SEGMENT_SEPARATOR).any(str::is_empty) {
            return Err(IdError::EmptySegment(id.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the id's segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEGMENT_SEPARATOR)
    }

    /// Returns the last segment.
    pub fn name(&self) -> &str {
        self.0
            .rsplit_once(SEGMENT_SEPARATOR)
            .map_or(self.0.as_str(), |(_, name)| name)
    }

    /// Returns the ids of every proper prefix, outermost first.
    ///
    /// For `swe/backend/sql-basics` this is `["swe", "swe/backend"]`.
    pub fn prefixes(&self) -> Vec<&str> {
        self.0
            .match_indices(SEGMENT_SEPARATOR)
            .map(|(idx, _)| &self.0[..idx])
            .collect()
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocId> for String {
    fn from(id: DocId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DocId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn joins_segments() {
        let id = DocId::from_segments(&["swe", "backend", "sql-basics"]).unwrap();
        assert_eq!(id.as_str(), "swe/backend/sql-basics");
        assert_eq!(id.name(), "sql-basics");
        assert_eq!(id.segments().count(), 3);
    }

    #[test]
    fn prefixes_outermost_first() {
        let id: DocId = "swe/backend/sql-basics".parse().unwrap();
        assert_eq!(id.prefixes(), vec!["swe", "swe/backend"]);

        let top: DocId = "readme".parse().unwrap();
        assert!(top.prefixes().is_empty());
        assert_eq!(top.name(), "readme");
    }

    #[test]
    fn invalid_ids_error() {
        assert_eq!(DocId::parse(""), Err(IdError::Empty));
        assert!(matches!(DocId::parse("/swe"), Err(IdError::EmptySegment(_))));
        assert!(matches!(DocId::parse("swe/"), Err(IdError::EmptySegment(_))));
        assert!(matches!(DocId::parse("swe//foo"), Err(IdError::EmptySegment(_))));
        assert!(DocId::from_segments::<&str>(&[]).is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id: DocId = "ai/bar".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ai/bar\"");

        let back: DocId = serde_json::from_str("\"ai/bar\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<DocId>("\"\"").is_err());
    }
}
