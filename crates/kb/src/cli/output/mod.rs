//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

pub use kb_highlight::{dim, header, subheader, success, warning};
use kb_highlight::{Highlighter, active, disclosure, emphasize, rule};
use kb_index::Bundle;
use kb_runtime::{NavRow, Renderer, RowKind, Screen, SearchHit, highlight};
use serde::Serialize;

/// Width of horizontal rules.
const RULE_WIDTH: usize = 60;

/// Renders document bodies for the terminal.
pub struct TerminalRenderer {
    /// Syntax highlighter for markdown bodies.
    highlighter: Highlighter,
    /// Print bodies verbatim.
    raw: bool,
}

impl TerminalRenderer {
    /// Creates a renderer. With `raw`, bodies are printed without escape codes.
    pub fn new(raw: bool) -> Self {
        Self {
            highlighter: Highlighter::new(),
            raw,
        }
    }
}

impl Renderer for TerminalRenderer {
    type Output = String;

    fn render(&self, body: &str) -> String {
        if self.raw {
            body.to_string()
        } else {
            self.highlighter.highlight_markdown(body)
        }
    }
}

/// JSON output for `kb search --json`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The trimmed query.
    query: &'a str,
    /// Total hits returned.
    total_matches: usize,
    /// Hits, best first.
    results: &'a [SearchHit],
}

/// Prints values as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints search hits as JSON.
pub fn print_hits_json(query: &str, hits: &[SearchHit]) -> ExitCode {
    print_json(&JsonSearchOutput {
        query,
        total_matches: hits.len(),
        results: hits,
    })
}

/// Prints search hits with the query emphasised in titles and excerpts.
pub fn print_hits(query: &str, hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("{}", dim("No results found."));
        return;
    }

    for hit in hits {
        println!(
            "{} {} {}",
            header(&emphasize(&hit.title, &highlight(&hit.title, query))),
            dim("—"),
            dim(hit.id.as_str())
        );
        if let Some(excerpt) = &hit.excerpt {
            println!("   {}", emphasize(excerpt, &highlight(excerpt, query)));
        }
        println!();
    }
    println!("{}", dim(&format!("─── {} results ───", hits.len())));
}

/// Prints navigator rows as an indented tree.
pub fn print_nav_rows(rows: &[NavRow]) {
    for row in rows {
        let indent = "  ".repeat(row.depth);
        match row.kind {
            RowKind::Group { count, expanded } => println!(
                "{indent}{} {} {}",
                disclosure(expanded),
                subheader(&row.title),
                dim(&format!("({count})"))
            ),
            RowKind::Leaf { active: true } => {
                println!("{indent}  {} {}", active(&row.title), dim(row.id.as_str()));
            }
            RowKind::Leaf { active: false } => {
                println!("{indent}  {} {}", row.title, dim(row.id.as_str()));
            }
        }
    }
}

/// Prints the landing view: corpus size and the top-level areas.
pub fn print_home(bundle: &Bundle) {
    println!("{}", header("Knowledge base"));
    println!(
        "{}",
        dim(&format!("{} documents", bundle.documents().len()))
    );
    println!();
    for node in bundle.nav_tree() {
        if node.is_leaf() {
            println!("  {} {}", node.title(), dim(node.id().as_str()));
        } else {
            println!(
                "  {} {}",
                subheader(node.title()),
                dim(&format!("({})", node.leaf_count()))
            );
        }
    }
}

/// Prints a content-area screen.
pub fn print_screen(bundle: &Bundle, screen: &Screen<'_, String>) {
    match screen {
        Screen::Home => print_home(bundle),
        Screen::Article { document, content } => {
            println!("{}", header(&document.title));
            println!("{}", dim(&document.path.join(" › ")));
            println!("{}", rule(RULE_WIDTH));
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
            println!("{}", rule(RULE_WIDTH));
        }
        Screen::Search { query, hits } => {
            println!("{}", subheader(&format!("Search: {query}")));
            println!();
            print_hits(query, hits);
        }
    }
}
