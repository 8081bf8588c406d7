//! Navigator controller.
//!
//! Tracks which groups of the navigation tree are expanded and flattens the tree into the
//! rows a front end displays. Expansion state is a set of group ids. Every operation here
//! touches only the groups it names.

use std::collections::BTreeSet;

use kb_document::DocId;
use kb_index::{NavNode, find_group, leaf_ancestors};

use crate::SessionState;

/// Kind-specific part of a navigator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A group row.
    Group {
        /// Number of leaves below the group.
        count: usize,
        /// Whether the group's children are shown.
        expanded: bool,
    },
    /// A leaf row.
    Leaf {
        /// Whether this leaf is the active one.
        active: bool,
    },
}

/// One visible row of the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRow {
    /// Nesting depth, 0 for top-level nodes.
    pub depth: usize,
    /// Node id.
    pub id: DocId,
    /// Node title.
    pub title: String,
    /// Group or leaf details.
    pub kind: RowKind,
}

impl NavRow {
    /// Returns true for the active leaf.
    pub fn is_active(&self) -> bool {
        matches!(self.kind, RowKind::Leaf { active: true })
    }
}

/// Returns the expansion state at first render: top-level groups expanded, all deeper
/// groups collapsed.
pub fn default_expanded(tree: &[NavNode]) -> BTreeSet<String> {
    tree.iter()
        .filter(|node| !node.is_leaf())
        .map(|node| node.id().to_string())
        .collect()
}

/// Flips a single group between expanded and collapsed.
///
/// Returns false and changes nothing if no group has that id.
pub fn toggle(tree: &[NavNode], expanded: &mut BTreeSet<String>, group_id: &str) -> bool {
    if find_group(tree, group_id).is_none() {
        return false;
    }
    if !expanded.remove(group_id) {
        expanded.insert(group_id.to_string());
    }
    true
}

/// Returns the ids of the groups from the top level down to the leaf's parent.
pub fn ancestors(tree: &[NavNode], leaf_id: &DocId) -> Option<Vec<DocId>> {
    leaf_ancestors(tree, leaf_id).map(|ids| ids.into_iter().cloned().collect())
}

/// Expands every group on the path to a leaf. Never collapses anything.
///
/// Returns false and changes nothing if the leaf is unknown.
pub fn reveal(tree: &[NavNode], expanded: &mut BTreeSet<String>, leaf_id: &DocId) -> bool {
    let Some(path) = leaf_ancestors(tree, leaf_id) else {
        return false;
    };
    expanded.extend(path.into_iter().map(DocId::to_string));
    true
}

/// Flattens the tree into visible rows, in display order.
///
/// Children of collapsed groups are omitted. At most one row is active.
pub fn render(tree: &[NavNode], state: &SessionState) -> Vec<NavRow> {
    let mut rows = Vec::new();
    push_rows(&mut rows, tree, state, 0);
    rows
}

/// Appends the rows for `nodes` at `depth`.
fn push_rows(rows: &mut Vec<NavRow>, nodes: &[NavNode], state: &SessionState, depth: usize) {
    for node in nodes {
        match node {
            NavNode::Leaf { id, title } => rows.push(NavRow {
                depth,
                id: id.clone(),
                title: title.clone(),
                kind: RowKind::Leaf {
                    active: state.active_leaf.as_ref() == Some(id),
                },
            }),
            NavNode::Group {
                id,
                title,
                count,
                children,
            } => {
                let expanded = state.expanded_groups.contains(id.as_str());
                rows.push(NavRow {
                    depth,
                    id: id.clone(),
                    title: title.clone(),
                    kind: RowKind::Group {
                        count: *count,
                        expanded,
                    },
                });
                if expanded {
                    push_rows(rows, children, state, depth + 1);
                }
            }
        }
    }
}
