//! Navigation tree.
//!
//! The navigation tree mirrors the directory hierarchy of the content root. Each
//! [`NavNode`] is either a leaf pointing at exactly one document, or a group of children
//! carrying the number of leaves below it.

use std::iter;

use kb_document::DocId;
use serde::{Deserialize, Serialize};

/// A node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavNode {
    /// A single document.
    Leaf {
        /// Id of the document this leaf points at.
        id: DocId,
        /// Document title.
        title: String,
    },
    /// A directory of documents.
    Group {
        /// The joined path of the directory.
        id: DocId,
        /// Title-cased directory name.
        title: String,
        /// Number of leaves anywhere below this group.
        count: usize,
        /// Child nodes in insertion order.
        children: Vec<NavNode>,
    },
}

impl NavNode {
    /// Returns the node's id.
    pub fn id(&self) -> &DocId {
        match self {
            Self::Leaf { id, .. } | Self::Group { id, .. } => id,
        }
    }

    /// Returns the node's title.
    pub fn title(&self) -> &str {
        match self {
            Self::Leaf { title, .. } | Self::Group { title, .. } => title,
        }
    }

    /// Returns true for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Returns the children of a group, or an empty slice for a leaf.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Group { children, .. } => children,
        }
    }

    /// Counts the leaves at or below this node by walking the subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Group { children, .. } => children.iter().map(Self::leaf_count).sum(),
        }
    }
}

/// Iterates over every node of a forest, depth-first, parents before children.
pub fn walk(nodes: &[NavNode]) -> impl Iterator<Item = &NavNode> {
    let mut stack: Vec<&NavNode> = nodes.iter().rev().collect();
    iter::from_fn(move || {
        let node = stack.pop()?;
        stack.extend(node.children().iter().rev());
        Some(node)
    })
}

/// Returns the ids of every leaf in a forest, in display order.
pub fn leaf_ids(nodes: &[NavNode]) -> Vec<&DocId> {
    walk(nodes)
        .filter(|node| node.is_leaf())
        .map(NavNode::id)
        .collect()
}

/// Returns the group ids from the top level down to the parent of the leaf `id`.
///
/// Returns `None` if no leaf with that id exists.
pub fn leaf_ancestors<'a>(nodes: &'a [NavNode], id: &DocId) -> Option<Vec<&'a DocId>> {
    for node in nodes {
        match node {
            NavNode::Leaf { id: leaf, .. } if leaf == id => return Some(Vec::new()),
            NavNode::Leaf { .. } => {}
            NavNode::Group {
                id: group,
                children,
                ..
            } => {
                if let Some(mut path) = leaf_ancestors(children, id) {
                    path.insert(0, group);
                    return Some(path);
                }
            }
        }
    }
    None
}

/// Finds the group with the given id.
pub fn find_group<'a>(nodes: &'a [NavNode], id: &str) -> Option<&'a NavNode> {
    walk(nodes).find(|node| !node.is_leaf() && node.id().as_str() == id)
}

/// Recomputes every group's leaf count bottom-up and returns the total for the forest.
pub fn update_counts(nodes: &mut [NavNode]) -> usize {
    nodes
        .iter_mut()
        .map(|node| match node {
            NavNode::Leaf { .. } => 1,
            NavNode::Group {
                count, children, ..
            } => {
                *count = update_counts(children);
                *count
            }
        })
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf(id: &str) -> NavNode {
        NavNode::Leaf {
            id: id.parse().unwrap(),
            title: id.to_string(),
        }
    }

    fn group(id: &str, children: Vec<NavNode>) -> NavNode {
        NavNode::Group {
            id: id.parse().unwrap(),
            title: id.to_string(),
            count: 0,
            children,
        }
    }

    fn sample() -> Vec<NavNode> {
        vec![
            group(
                "swe",
                vec![
                    group("swe/backend", vec![leaf("swe/backend/sql")]),
                    leaf("swe/foo"),
                ],
            ),
            leaf("readme"),
        ]
    }

    #[test]
    fn update_counts_bottom_up() {
        let mut tree = sample();
        assert_eq!(update_counts(&mut tree), 3);

        let NavNode::Group {
            count, children, ..
        } = &tree[0]
        else {
            panic!("expected group");
        };
        assert_eq!(*count, 2);
        assert!(matches!(children[0], NavNode::Group { count: 1, .. }));
    }

    #[test]
    fn walk_is_depth_first() {
        let tree = sample();
        let ids: Vec<_> = walk(&tree).map(|n| n.id().as_str()).collect();
        assert_eq!(
            ids,
            vec!["swe", "swe/backend", "swe/backend/sql", "swe/foo", "readme"]
        );
        assert_eq!(leaf_ids(&tree).len(), 3);
    }

    #[test]
    fn ancestors_of_leaf() {
        let tree = sample();
        let sql: DocId = "swe/backend/sql".parse().unwrap();
        let ancestors: Vec<_> = leaf_ancestors(&tree, &sql)
            .unwrap()
            .into_iter()
            .map(DocId::as_str)
            .collect();
        assert_eq!(ancestors, vec!["swe", "swe/backend"]);

        let top: DocId = "readme".parse().unwrap();
        assert_eq!(leaf_ancestors(&tree, &top), Some(vec![]));

        let missing: DocId = "swe".parse().unwrap();
        assert_eq!(leaf_ancestors(&tree, &missing), None);
    }

    #[test]
    fn find_group_ignores_leaves() {
        let tree = sample();
        assert!(find_group(&tree, "swe/backend").is_some());
        assert!(find_group(&tree, "swe/foo").is_none());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(leaf("ai/bar")).unwrap();
        assert_eq!(json["kind"], "leaf");
        assert_eq!(json["id"], "ai/bar");

        let json = serde_json::to_value(group("ai", vec![])).unwrap();
        assert_eq!(json["kind"], "group");
        assert_eq!(json["count"], 0);
    }
}
