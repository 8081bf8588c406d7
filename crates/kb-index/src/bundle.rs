//! The serialized bundle.
//!
//! A bundle is one JSON object with exactly two keys: `documents`, a map from id to
//! document, and `navTree`, the navigation forest. It is produced once per build and
//! never mutated afterwards.

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    hash::Hasher,
    path::Path,
};

use kb_document::{DocId, Document};
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher24;

use crate::{IndexError, NavNode, tree::walk};

/// Documents and their navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Bundle {
    /// Documents keyed by id, in id order.
    documents: BTreeMap<DocId, Document>,
    /// Top-level navigation nodes.
    nav_tree: Vec<NavNode>,
}

impl Bundle {
    /// Creates a bundle from its parts.
    pub fn new(documents: BTreeMap<DocId, Document>, nav_tree: Vec<NavNode>) -> Self {
        Self {
            documents,
            nav_tree,
        }
    }

    /// Returns the document map.
    pub fn documents(&self) -> &BTreeMap<DocId, Document> {
        &self.documents
    }

    /// Returns the top-level navigation nodes.
    pub fn nav_tree(&self) -> &[NavNode] {
        &self.nav_tree
    }

    /// Looks up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Returns true if a document with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the bundle has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Serializes the bundle as pretty-printed JSON.
    ///
    /// Output is deterministic: documents are emitted in id order and the tree in
    /// insertion order.
    pub fn to_json(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns a 64-bit SipHash of the serialized bundle as 16 hex digits.
    pub fn fingerprint(&self) -> Result<String, IndexError> {
        let json = self.to_json()?;
        let mut hasher = SipHasher24::new();
        hasher.write(json.as_bytes());
        Ok(format!("{:016x}", hasher.finish()))
    }

    /// Parses a bundle and checks its consistency.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        let bundle: Self = serde_json::from_str(json)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Reads and parses a bundle file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that leaves and documents correspond one to one, that every document's id
    /// matches its key and path, and that group counts are correct.
    pub fn validate(&self) -> Result<(), IndexError> {
        for (key, doc) in &self.documents {
            if *key != doc.id {
                return Err(IndexError::InvalidBundle(format!(
                    "document stored under '{key}' has id '{}'",
                    doc.id
                )));
            }
            if doc.path.join("/") != doc.id.as_str() {
                return Err(IndexError::InvalidBundle(format!(
                    "document '{}' does not match its path",
                    doc.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for node in walk(&self.nav_tree) {
            match node {
                NavNode::Leaf { id, .. } => {
                    if !self.documents.contains_key(id) {
                        return Err(IndexError::InvalidBundle(format!(
                            "leaf '{id}' has no document"
                        )));
                    }
                    if !seen.insert(id) {
                        return Err(IndexError::InvalidBundle(format!(
                            "leaf '{id}' appears more than once"
                        )));
                    }
                }
                NavNode::Group { id, count, .. } => {
                    if *count != node.leaf_count() {
                        return Err(IndexError::InvalidBundle(format!(
                            "group '{id}' count {count} does not match its leaves"
                        )));
                    }
                }
            }
        }

        if seen.len() != self.documents.len() {
            return Err(IndexError::InvalidBundle(format!(
                "{} documents but {} leaves",
                self.documents.len(),
                seen.len()
            )));
        }

        Ok(())
    }
}
