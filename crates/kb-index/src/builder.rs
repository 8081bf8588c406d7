//! One-pass construction of the document map and navigation tree.

use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
};

use kb_document::{DocId, Document, TitleSource, parse_document, title_case};

use crate::{Bundle, IndexError, NavNode, RawDocument, tree::update_counts};

/// Incrementally builds a [`Bundle`] from scanned records.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// File stems that stand for their enclosing directory.
    index_files: Vec<String>,
    /// Documents keyed by id.
    documents: BTreeMap<DocId, Document>,
    /// Source file that produced each id, for collision reports.
    sources: HashMap<DocId, PathBuf>,
    /// Top-level navigation nodes in insertion order.
    roots: Vec<NavNode>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    pub fn new(index_files: &[String]) -> Self {
        Self {
            index_files: index_files.to_vec(),
            ..Default::default()
        }
    }

    /// Adds one scanned record.
    ///
    /// The document's leaf is placed under the group chain for its path, creating groups
    /// as needed. A record whose id is already taken fails with
    /// [`IndexError::DuplicateId`] and leaves the builder unchanged.
    pub fn insert(&mut self, raw: RawDocument) -> Result<TitleSource, IndexError> {
        let parsed = parse_document(&raw.rel_path, raw.raw_text, &self.index_files)?;
        let document = parsed.document;

        if let Some(first) = self.sources.get(&document.id) {
            return Err(IndexError::DuplicateId {
                id: document.id,
                first: first.clone(),
                second: raw.rel_path,
            });
        }

        let leaf = NavNode::Leaf {
            id: document.id.clone(),
            title: document.title.clone(),
        };
        insert_leaf(&mut self.roots, &document.path, 0, leaf)?;

        self.sources.insert(document.id.clone(), raw.rel_path);
        self.documents.insert(document.id.clone(), document);
        Ok(parsed.title_source)
    }

    /// Returns the number of documents inserted so far.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Finalizes group counts and returns the bundle.
    pub fn finish(mut self) -> Bundle {
        update_counts(&mut self.roots);
        Bundle::new(self.documents, self.roots)
    }
}

/// Inserts `leaf` below the groups named by `path[depth..path.len() - 1]`.
fn insert_leaf(
    nodes: &mut Vec<NavNode>,
    path: &[String],
    depth: usize,
    leaf: NavNode,
) -> Result<(), IndexError> {
    if depth + 1 >= path.len() {
        nodes.push(leaf);
        return Ok(());
    }

    let group_id = DocId::from_segments(&path[..=depth])?;
    let existing = nodes
        .iter()
        .position(|node| matches!(node, NavNode::Group { id, .. } if *id == group_id));
    let idx = match existing {
        Some(idx) => idx,
        None => {
            nodes.push(NavNode::Group {
                id: group_id,
                title: title_case(&path[depth]),
                count: 0,
                children: Vec::new(),
            });
            nodes.len() - 1
        }
    };

    match &mut nodes[idx] {
        NavNode::Group { children, .. } => insert_leaf(children, path, depth + 1, leaf),
        NavNode::Leaf { .. } => Ok(()),
    }
}
