//! Terminal rendering for kb.
//!
//! Syntax highlighting of document bodies and configuration, plus ANSI styling for
//! headers, navigator rows and search matches.

#![warn(missing_docs)]

use std::ops::Range;

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Highlights text for a 24-bit color terminal.
pub struct Highlighter {
    /// Language definitions, including the two-face extras for TOML.
    syntax_set: SyntaxSet,
    /// Lazily loaded color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Active theme.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self::with_theme(EmbeddedThemeName::Dracula)
    }

    /// Creates a highlighter using a specific embedded theme.
    pub fn with_theme(theme: EmbeddedThemeName) -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme,
        }
    }

    /// Highlights a document body.
    ///
    /// Plain-text documents are recognised by their `.txt` source extension and are passed
    /// through the plain-text syntax.
    pub fn highlight_document(&self, body: &str, source: &str) -> String {
        let extension = source.rsplit_once('.').map_or("md", |(_, ext)| ext);
        self.highlight(body, extension)
    }

    /// Highlights Markdown.
    pub fn highlight_markdown(&self, content: &str) -> String {
        self.highlight(content, "md")
    }

    /// Highlights TOML.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights `content` as `syntax`, given as an extension or a syntax name.
    ///
    /// Unknown syntaxes fall back to plain text.
    pub fn highlight(&self, content: &str, syntax: &str) -> String {
        let syntax = self.find_syntax(syntax);
        let mut lines = HighlightLines::new(syntax, self.theme_set.get(self.theme));

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let regions: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&regions, false));
        }
        output.push_str(colors::RESET);
        output
    }

    /// Looks a syntax up by extension, then by name.
    fn find_syntax(&self, syntax: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_extension(syntax)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

/// ANSI escape codes.
pub mod colors {
    /// Bold.
    pub const BOLD: &str = "\x1b[1m";
    /// Underline.
    pub const UNDERLINE: &str = "\x1b[4m";
    /// Cyan, for headers.
    pub const CYAN: &str = "\x1b[36m";
    /// Green, for success and the active row.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow, for warnings and search matches.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red, for errors.
    pub const RED: &str = "\x1b[31m";
    /// Dim.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in the given escape codes and a reset.
fn paint(codes: &[&str], text: &str) -> String {
    let mut out = codes.concat();
    out.push_str(text);
    out.push_str(colors::RESET);
    out
}

/// Bold cyan header.
pub fn header(text: &str) -> String {
    paint(&[colors::BOLD, colors::CYAN], text)
}

/// Bold subheader.
pub fn subheader(text: &str) -> String {
    paint(&[colors::BOLD], text)
}

/// Dimmed text.
pub fn dim(text: &str) -> String {
    paint(&[colors::DIM], text)
}

/// Green text.
pub fn success(text: &str) -> String {
    paint(&[colors::GREEN], text)
}

/// Yellow text.
pub fn warning(text: &str) -> String {
    paint(&[colors::YELLOW], text)
}

/// Red text.
pub fn error(text: &str) -> String {
    paint(&[colors::RED], text)
}

/// Bold green text, marking the active navigator row.
pub fn active(text: &str) -> String {
    paint(&[colors::BOLD, colors::GREEN], text)
}

/// Dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Emphasises the given byte ranges of `text` in bold yellow underline.
///
/// Ranges must be sorted, non-overlapping and on character boundaries, as produced by
/// `kb_runtime::highlight`. Ranges that are out of bounds or not on character boundaries
/// are skipped.
pub fn emphasize(text: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for range in ranges {
        if range.start < pos || text.get(range.clone()).is_none() {
            continue;
        }
        out.push_str(&text[pos..range.start]);
        out.push_str(&paint(
            &[colors::BOLD, colors::UNDERLINE, colors::YELLOW],
            &text[range.clone()],
        ));
        pos = range.end;
    }
    out.push_str(&text[pos..]);
    out
}

/// Disclosure marker for a navigator group.
pub fn disclosure(expanded: bool) -> &'static str {
    if expanded { "▾" } else { "▸" }
}
