//! Case-insensitive literal matching.
//!
//! Queries are plain substrings, never patterns. Matching folds both sides to lowercase one
//! character at a time and maps match positions back to byte ranges of the original text,
//! so ranges are always valid char boundaries even when lowercasing changes byte lengths.

use std::{iter, ops::Range};

/// Lowercases text one character at a time.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Returns true if `needle` occurs in `haystack`, ignoring case.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    fold_case(haystack).contains(&fold_case(needle))
}

/// Returns the byte range of the first case-insensitive occurrence of `needle`.
pub fn find_ci(haystack: &str, needle: &str) -> Option<Range<usize>> {
    highlight(haystack, needle).into_iter().next()
}

/// Returns the byte ranges of every non-overlapping case-insensitive occurrence of the
/// literal `query` in `text`, in order.
///
/// An empty query matches nothing.
pub fn highlight(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle = fold_case(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let folded = Folded::new(text);
    folded
        .text
        .match_indices(&needle)
        .map(|(start, m)| folded.original_range(text, start, start + m.len()))
        .collect()
}

/// Lowercased text with a map from each folded byte back to the original char's offset.
struct Folded {
    /// Lowercased text.
    text: String,
    /// For each byte of `text`, the byte offset of the original char that produced it.
    origin: Vec<usize>,
}

impl Folded {
    /// Folds `original`.
    fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut origin = Vec::with_capacity(original.len());
        for (offset, c) in original.char_indices() {
            for lower in c.to_lowercase() {
                text.push(lower);
                origin.extend(iter::repeat_n(offset, lower.len_utf8()));
            }
        }
        Self { text, origin }
    }

    /// Maps a folded byte range to the smallest original range covering it.
    fn original_range(&self, original: &str, start: usize, end: usize) -> Range<usize> {
        let orig_start = self.origin[start];
        let last = self.origin[end - 1];
        let last_len = original[last..].chars().next().map_or(0, char::len_utf8);
        orig_start..last + last_len
    }
}
