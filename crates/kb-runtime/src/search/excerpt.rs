//! Excerpt extraction around the first body match.

use std::ops::Range;

/// Ellipsis used to mark a truncated excerpt.
pub const ELLIPSIS: char = '…';

/// Returns the byte range of the window around `hit`: up to `before` characters before
/// its start and up to `after` characters after its end.
pub fn excerpt_window(body: &str, hit: Range<usize>, before: usize, after: usize) -> Range<usize> {
    let start = if before == 0 {
        hit.start
    } else {
        body[..hit.start]
            .char_indices()
            .rev()
            .nth(before - 1)
            .map_or(0, |(idx, _)| idx)
    };
    let end = body[hit.end..]
        .char_indices()
        .nth(after)
        .map_or(body.len(), |(idx, _)| hit.end + idx);
    start..end
}

/// Builds the display excerpt for a body match.
///
/// The window is stripped of markup decoration except inside the match itself, its line
/// breaks collapse to single spaces, and an ellipsis marks each side that was cut from the
/// full body.
pub fn build_excerpt(body: &str, hit: Range<usize>, before: usize, after: usize) -> String {
    let window = excerpt_window(body, hit.clone(), before, after);
    let mut excerpt = String::new();
    if window.start > 0 {
        excerpt.push(ELLIPSIS);
    }
    let keep = hit.start - window.start..hit.end - window.start;
    excerpt.push_str(&strip_markup_around(&body[window.clone()], keep));
    if window.end < body.len() {
        excerpt.push(ELLIPSIS);
    }
    excerpt
}

/// Removes heading markers, emphasis markers, inline-code backticks and code fence lines,
/// then collapses all whitespace runs to single spaces.
pub fn strip_markup(text: &str) -> String {
    strip_markup_around(text, 0..0)
}

/// Like [`strip_markup`], but the bytes of `text` in `keep` are copied through untouched.
///
/// A match made of markup characters, such as `__init__`, stays intact.
fn strip_markup_around(text: &str, keep: Range<usize>) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        let line_start = offset;
        offset += raw.len();
        let line = raw.trim_end_matches(['\n', '\r']);
        let line_end = line_start + line.len();

        let kept = keep.start.clamp(line_start, line_end) - line_start
            ..keep.end.clamp(line_start, line_end) - line_start;
        let cleaned = if kept.is_empty() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                continue;
            }
            strip_emphasis(trimmed.trim_start_matches('#'))
        } else {
            let head = line[..kept.start].trim_start().trim_start_matches('#');
            format!(
                "{}{}{}",
                strip_emphasis(head),
                &line[kept.clone()],
                strip_emphasis(&line[kept.end..])
            )
        };
        words.extend(cleaned.split_whitespace().map(str::to_string));
    }
    words.join(" ")
}

/// Removes emphasis markers and inline-code backticks.
fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
        .replace("__", "")
        .replace("~~", "")
        .replace(['*', '`'], "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::highlight;

    #[test]
    fn window_is_clamped_to_body() {
        let body = "abc foo xyz";
        assert_eq!(excerpt_window(body, 4..7, 70, 120), 0..body.len());
        assert_eq!(excerpt_window(body, 4..7, 2, 2), 2..9);
        assert_eq!(excerpt_window(body, 4..7, 0, 0), 4..7);
    }

    #[test]
    fn window_counts_characters_not_bytes() {
        let body = "ééé foo ééé";
        let hit = 7..10;
        assert_eq!(&body[hit.clone()], "foo");
        let window = excerpt_window(body, hit, 2, 2);
        assert_eq!(&body[window], "é foo é");
    }

    #[test]
    fn short_body_has_no_ellipsis() {
        let body = "Short body mentioning foo.";
        let hit = body.find("foo").unwrap();
        assert_eq!(
            build_excerpt(body, hit..hit + 3, 70, 120),
            "Short body mentioning foo."
        );
    }

    #[test]
    fn truncated_sides_get_ellipses() {
        let body = format!("{}needle{}", "a ".repeat(100), "b ".repeat(100));
        let hit = body.find("needle").unwrap();
        let excerpt = build_excerpt(&body, hit..hit + 6, 70, 120);

        assert!(excerpt.starts_with(ELLIPSIS));
        assert!(excerpt.ends_with(ELLIPSIS));
        assert!(excerpt.contains("needle"));
    }

    #[test]
    fn strips_markup_and_collapses_lines() {
        let text = "## Setup\n\nUse **bold** and `code` and ~~old~~ and __strong__.\n```rust\nfn main() {}\n```\n* item";
        assert_eq!(
            strip_markup(text),
            "Setup Use bold and code and old and strong. fn main() {} item"
        );
    }

    #[test]
    fn match_on_markup_characters_is_kept() {
        let body = "# Classes\n\nDefine __init__ to set **fields**.";
        let hit = body.find("__init__").unwrap();
        let excerpt = build_excerpt(body, hit..hit + 8, 70, 120);

        assert_eq!(excerpt, "Classes Define __init__ to set fields.");
        assert_eq!(highlight(&excerpt, "__init__").len(), 1);
    }

    #[test]
    fn match_inside_fence_line_is_kept() {
        let body = "intro\n```python\nbody";
        let hit = body.find("```").unwrap();
        assert_eq!(build_excerpt(body, hit..hit + 3, 70, 120), "intro ```python body");
    }

    #[test]
    fn snake_case_survives() {
        assert_eq!(strip_markup("call my_func now"), "call my_func now");
    }
}
