//! Path segment normalization.
//!
//! Every directory name and file stem is normalized before it becomes part of a
//! document id, so that ids are URL-safe and stable fragments:
//! - Lowercase the text
//! - Replace every run of characters outside `[a-z0-9]` with a single hyphen
//! - Trim leading/trailing hyphens
//!
//! Normalization is not injective: `Foo Bar` and `foo-bar` share a slug. Collisions are
//! detected when the tree is built, never resolved here.

/// Slug used when a segment has no alphanumeric characters at all.
pub const FALLBACK_SEGMENT: &str = "untitled";

/// Normalizes a single path segment.
pub fn slugify_segment(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len());
    let mut pending_hyphen = false;

    for c in segment.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !result.is_empty() {
                result.push('-');
            }
            pending_hyphen = false;
            result.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if result.is_empty() {
        FALLBACK_SEGMENT.to_string()
    } else {
        result
    }
}

/// Turns a slug into a display title: separators become spaces and each word is capitalized.
///
/// `sql-basics` becomes `Sql Basics`.
pub fn title_case(segment: &str) -> String {
    segment
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercases the first character of a word.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify_segment("SQL Basics"), "sql-basics");
        assert_eq!(slugify_segment("css-tailwind"), "css-tailwind");
        assert_eq!(slugify_segment("Retrieval Augmented Gen"), "retrieval-augmented-gen");
    }

    #[test]
    fn collapses_and_trims_separators() {
        assert_eq!(slugify_segment("  Hello  --  World  "), "hello-world");
        assert_eq!(slugify_segment("__init__"), "init");
        assert_eq!(slugify_segment("CI/CD"), "ci-cd");
    }

    #[test]
    fn non_ascii_becomes_separator() {
        assert_eq!(slugify_segment("Héllo Wörld"), "h-llo-w-rld");
    }

    #[test]
    fn case_and_punctuation_variants_collide() {
        assert_eq!(slugify_segment("Foo Bar"), slugify_segment("foo_bar"));
        assert_eq!(slugify_segment("Foo Bar"), slugify_segment("FOO-BAR!"));
    }

    #[test]
    fn empty_falls_back() {
        assert_eq!(slugify_segment(""), "untitled");
        assert_eq!(slugify_segment("!!!"), "untitled");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("sql-basics"), "Sql Basics");
        assert_eq!(title_case("llms"), "Llms");
        assert_eq!(title_case("data_engineering notes"), "Data Engineering Notes");
        assert_eq!(title_case(""), "");
    }
}
