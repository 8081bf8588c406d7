//! Full-text search over a bundle.
//!
//! Every document is tested for a case-insensitive literal match of the query in three
//! fields. Matches are scored additively:
//! - title: [`TITLE_SCORE`]
//! - path (the id string): [`PATH_SCORE`]
//! - body: [`BODY_SCORE`]
//!
//! Results are sorted by descending score, keeping document order among equal scores, and
//! capped at the configured limit. Body matches carry an excerpt around the first
//! occurrence.

mod excerpt;
mod highlight;

use kb_config::SearchSettings;
use kb_document::{DocId, Document};
use kb_index::Bundle;
use serde::Serialize;

pub use self::{
    excerpt::{ELLIPSIS, build_excerpt, excerpt_window, strip_markup},
    highlight::{contains_ci, find_ci, fold_case, highlight},
};
use crate::SearchError;

/// Score contributed by a title match.
pub const TITLE_SCORE: u32 = 10;
/// Score contributed by a path match.
pub const PATH_SCORE: u32 = 4;
/// Score contributed by a body match.
pub const BODY_SCORE: u32 = 1;

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Id of the matching document.
    pub id: DocId,
    /// Title of the matching document.
    pub title: String,
    /// Additive relevance score.
    pub score: u32,
    /// Cleaned text around the first body match, if the body matched.
    pub excerpt: Option<String>,
}

/// Searches the documents of a bundle.
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<'a> {
    /// The bundle being searched.
    bundle: &'a Bundle,
    /// Limits and excerpt windows.
    settings: SearchSettings,
}

impl<'a> SearchEngine<'a> {
    /// Creates a search engine with default settings.
    pub fn new(bundle: &'a Bundle) -> Self {
        Self::with_settings(bundle, SearchSettings::default())
    }

    /// Creates a search engine with explicit settings.
    pub fn with_settings(bundle: &'a Bundle, settings: SearchSettings) -> Self {
        Self { bundle, settings }
    }

    /// Returns the settings in use.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Runs a query and returns at most `limit` hits, best first.
    ///
    /// The query is trimmed. Queries shorter than `min_query_len` characters are rejected;
    /// an empty result list is a normal outcome.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let query = query.trim();
        let len = query.chars().count();
        if len < self.settings.min_query_len {
            return Err(SearchError::QueryTooShort {
                min: self.settings.min_query_len,
                len,
            });
        }

        let mut hits: Vec<SearchHit> = self
            .bundle
            .documents()
            .values()
            .filter_map(|doc| self.score_document(doc, query))
            .collect();

        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(self.settings.limit);
        Ok(hits)
    }

    /// Scores one document, returning `None` if no field matches.
    fn score_document(&self, doc: &Document, query: &str) -> Option<SearchHit> {
        let mut score = 0;
        if contains_ci(&doc.title, query) {
            score += TITLE_SCORE;
        }
        if contains_ci(doc.id.as_str(), query) {
            score += PATH_SCORE;
        }

        let excerpt = find_ci(&doc.body, query).map(|hit| {
            score += BODY_SCORE;
            build_excerpt(
                &doc.body,
                hit,
                self.settings.excerpt_before,
                self.settings.excerpt_after,
            )
        });

        (score > 0).then(|| SearchHit {
            id: doc.id.clone(),
            title: doc.title.clone(),
            score,
            excerpt,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use kb_index::{RawDocument, TreeBuilder};

    use super::*;

    fn bundle(files: &[(&str, &str)]) -> Bundle {
        let mut builder = TreeBuilder::new(&[]);
        for (rel, text) in files {
            builder
                .insert(RawDocument {
                    rel_path: PathBuf::from(rel),
                    abs_path: PathBuf::from("/c").join(rel),
                    raw_text: (*text).to_string(),
                })
                .unwrap();
        }
        builder.finish()
    }

    fn topics() -> Bundle {
        bundle(&[
            ("swe/foo.md", "# Foo Topic\n\nSome text."),
            ("ai/bar.md", "# Bar Topic\n\nOther text."),
        ])
    }

    #[test]
    fn matching_fields_add_up() {
        let bundle = topics();
        let hits = SearchEngine::new(&bundle).search("foo").unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "swe/foo");
        // "foo" is in the title, the id and the heading line of the body.
        assert_eq!(hits[0].score, TITLE_SCORE + PATH_SCORE + BODY_SCORE);
    }

    #[test]
    fn title_only_match_scores_ten() {
        let bundle = bundle(&[("swe/x.md", "no heading"), ("ai/y.txt", "#Foo Topic\nbody")]);
        let hits = SearchEngine::new(&bundle).search("topic").unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "ai/y");
        assert_eq!(hits[0].score, TITLE_SCORE + BODY_SCORE);

        let bundle = bundle_with_title("Foo Topic", "body without it");
        let hits = SearchEngine::new(&bundle).search("foo").unwrap();
        assert_eq!(hits[0].score, TITLE_SCORE);
        assert_eq!(hits[0].excerpt, None);
    }

    /// Builds a bundle with one document whose title is not in its body or path.
    fn bundle_with_title(title: &str, body: &str) -> Bundle {
        use std::collections::BTreeMap;

        use kb_index::NavNode;

        let id: DocId = "notes/n1".parse().unwrap();
        let doc = Document {
            id: id.clone(),
            title: title.to_string(),
            path: vec!["notes".into(), "n1".into()],
            body: body.to_string(),
            source: "notes/n1.md".into(),
        };
        let tree = vec![NavNode::Group {
            id: "notes".parse().unwrap(),
            title: "Notes".into(),
            count: 1,
            children: vec![NavNode::Leaf {
                id: id.clone(),
                title: title.to_string(),
            }],
        }];
        Bundle::new(BTreeMap::from([(id, doc)]), tree)
    }

    #[test]
    fn non_matching_documents_are_excluded() {
        let bundle = topics();
        let hits = SearchEngine::new(&bundle).search("foo").unwrap();
        assert!(hits.iter().all(|h| h.id.as_str() != "ai/bar"));
    }

    #[test]
    fn path_and_body_scores_add_up() {
        let bundle = bundle(&[
            ("rust/ownership.md", "# Borrowing\n\nrust rules"),
            ("go/notes.md", "# Go\n\nmentions rust once"),
        ]);
        let hits = SearchEngine::new(&bundle).search("RUST").unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id.as_str(), "rust/ownership");
        assert_eq!(hits[0].score, PATH_SCORE + BODY_SCORE);
        assert_eq!(hits[1].score, BODY_SCORE);
    }

    #[test]
    fn title_beats_body_only() {
        let bundle = bundle(&[
            ("a/one.md", "# Zebra\n\nnothing"),
            ("a/two.md", "# Other\n\nzebra crossing"),
        ]);
        let hits = SearchEngine::new(&bundle).search("zebra").unwrap();

        assert_eq!(hits[0].id.as_str(), "a/one");
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn ties_keep_document_order() {
        let bundle = bundle(&[
            ("c.md", "alpha"),
            ("a.md", "alpha"),
            ("b.md", "alpha"),
        ]);
        let hits = SearchEngine::new(&bundle).search("alpha").unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn results_are_capped() {
        let files: Vec<(String, String)> = (0..50)
            .map(|i| (format!("n/doc{i:02}.md"), "common term".to_string()))
            .collect();
        let refs: Vec<(&str, &str)> = files
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        let bundle = bundle(&refs);

        let hits = SearchEngine::new(&bundle).search("common").unwrap();
        assert_eq!(hits.len(), 40);

        let settings = SearchSettings {
            limit: 5,
            ..Default::default()
        };
        let hits = SearchEngine::with_settings(&bundle, settings)
            .search("common")
            .unwrap();
        assert_eq!(hits.len(), 5);
    }

    #[test]
    fn short_queries_are_rejected() {
        let bundle = topics();
        let engine = SearchEngine::new(&bundle);
        assert_eq!(
            engine.search(" f "),
            Err(SearchError::QueryTooShort { min: 2, len: 1 })
        );
        assert!(engine.search("fo").is_ok());
    }

    #[test]
    fn empty_results_are_ok() {
        let bundle = topics();
        assert!(SearchEngine::new(&bundle).search("zzz").unwrap().is_empty());
    }

    #[test]
    fn excerpt_contains_query_window() {
        let body = format!(
            "# Title\n\n{}The **Needle** is here.\n{}",
            "lorem ipsum ".repeat(20),
            "dolor sit ".repeat(30)
        );
        let bundle = bundle(&[("x/doc.md", body.as_str())]);
        let hits = SearchEngine::new(&bundle).search("needle").unwrap();

        let excerpt = hits[0].excerpt.as_deref().unwrap();
        assert!(excerpt.starts_with(ELLIPSIS));
        assert!(excerpt.ends_with(ELLIPSIS));
        assert!(fold_case(excerpt).contains("needle"));
        assert!(!excerpt.contains('\n'));
        assert!(!excerpt.contains("**"));

        let hit = find_ci(&body, "needle").unwrap();
        let window = excerpt_window(&body, hit, 70, 120);
        assert!(fold_case(&body[window]).contains("needle"));
    }

    #[test]
    fn hits_serialize_for_json_output() {
        let bundle = topics();
        let hits = SearchEngine::new(&bundle).search("bar").unwrap();
        let json = serde_json::to_value(&hits).unwrap();
        assert_eq!(json[0]["id"], "ai/bar");
        assert_eq!(json[0]["score"], 15);
    }
}
