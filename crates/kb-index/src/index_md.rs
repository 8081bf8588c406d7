//! Markdown overview of the corpus.
//!
//! Renders the navigation tree as an `INDEX.md` file that can be browsed without kb: one
//! section per top-level area, nested lists for subgroups and links to the source files.

use crate::{Bundle, NavNode};

/// Heading of the generated index.
pub const INDEX_HEADING: &str = "# Knowledge Index";

/// Renders the markdown index for a bundle.
pub fn render_markdown_index(bundle: &Bundle) -> String {
    let mut lines = vec![INDEX_HEADING.to_string(), String::new()];

    let (groups, leaves): (Vec<&NavNode>, Vec<&NavNode>) =
        bundle.nav_tree().iter().partition(|node| !node.is_leaf());

    if !leaves.is_empty() {
        for leaf in leaves {
            push_node(&mut lines, bundle, leaf, 0);
        }
        lines.push(String::new());
    }

    for group in groups {
        lines.push(format!("## {}", group.id().name().to_uppercase()));
        for child in group.children() {
            push_node(&mut lines, bundle, child, 0);
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Appends the list item for `node`, and for groups their children one level deeper.
fn push_node(lines: &mut Vec<String>, bundle: &Bundle, node: &NavNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        NavNode::Leaf { id, title } => {
            let target = bundle
                .get(id.as_str())
                .map_or_else(|| id.to_string(), |doc| doc.source.clone());
            lines.push(format!("{indent}- [{title}]({})", link_target(&target)));
        }
        NavNode::Group {
            title, children, ..
        } => {
            lines.push(format!("{indent}- {title}"));
            for child in children {
                push_node(lines, bundle, child, depth + 1);
            }
        }
    }
}

/// Escapes spaces and parentheses so the path survives as a markdown link target.
fn link_target(path: &str) -> String {
    path.replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
}
