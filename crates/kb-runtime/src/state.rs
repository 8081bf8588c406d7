//! Transient UI session state.

use std::collections::BTreeSet;

use kb_document::DocId;
use kb_index::Bundle;

use crate::{History, navigator};

/// What the content area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The landing view.
    Home,
    /// A single document.
    Article(DocId),
    /// Search results for a trimmed query.
    Search(String),
}

impl View {
    /// Returns the fragment that addresses this view, if it is addressable.
    ///
    /// Search results are not addressable.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Self::Home => Some(""),
            Self::Article(id) => Some(id.as_str()),
            Self::Search(_) => None,
        }
    }
}

/// Everything the runtime tracks between events.
///
/// `active_leaf` is `Some(id)` exactly when `view` is `Article(id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Current view.
    pub view: View,
    /// Ids of expanded navigation groups.
    pub expanded_groups: BTreeSet<String>,
    /// The highlighted leaf.
    pub active_leaf: Option<DocId>,
    /// Raw text of the search input.
    pub search_query: String,
    /// Addressable history.
    pub history: History,
    /// View to return to when search input drops below the threshold.
    pub resume: Option<View>,
}

impl SessionState {
    /// Creates the initial state for a bundle: Home, with top-level groups expanded.
    pub fn new(bundle: &Bundle) -> Self {
        Self {
            view: View::Home,
            expanded_groups: navigator::default_expanded(bundle.nav_tree()),
            active_leaf: None,
            search_query: String::new(),
            history: History::new(),
            resume: None,
        }
    }

    /// Returns true if `active_leaf` agrees with `view`.
    pub fn is_consistent(&self) -> bool {
        match &self.view {
            View::Article(id) => self.active_leaf.as_ref() == Some(id),
            View::Home | View::Search(_) => self.active_leaf.is_none(),
        }
    }
}
