//! The session owner.
//!
//! A [`Session`] holds the only [`SessionState`] for a bundle and applies events to it one
//! at a time through [`router::transition`].

use kb_config::SearchSettings;
use kb_document::Document;
use kb_index::Bundle;

use crate::{
    SearchEngine, SearchHit, SessionState, View,
    navigator::{self, NavRow},
    router::{self, Event, RouterOptions},
};

/// Turns a document body into something a front end can display.
pub trait Renderer {
    /// Rendered form of a body.
    type Output;

    /// Renders a document body.
    fn render(&self, body: &str) -> Self::Output;
}

/// Renders bodies as their raw text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    type Output = String;

    fn render(&self, body: &str) -> String {
        body.to_string()
    }
}

/// What the content area shows, ready for display.
#[derive(Debug)]
pub enum Screen<'b, O> {
    /// The landing view.
    Home,
    /// A rendered document.
    Article {
        /// The document shown.
        document: &'b Document,
        /// Rendered body.
        content: O,
    },
    /// Search results.
    Search {
        /// Trimmed query.
        query: String,
        /// Hits, best first. Empty when nothing matched.
        hits: Vec<SearchHit>,
    },
}

/// A single-owner interactive session over a bundle.
#[derive(Debug)]
pub struct Session<'b> {
    /// The bundle being browsed.
    bundle: &'b Bundle,
    /// Current state.
    state: SessionState,
    /// Search limits and excerpt windows.
    settings: SearchSettings,
}

impl<'b> Session<'b> {
    /// Starts a session at Home.
    pub fn new(bundle: &'b Bundle, settings: SearchSettings) -> Self {
        Self {
            bundle,
            state: SessionState::new(bundle),
            settings,
        }
    }

    /// Returns the bundle.
    pub fn bundle(&self) -> &'b Bundle {
        self.bundle
    }

    /// Returns the current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Applies an event. Returns true if the content area should scroll to the top.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let options = RouterOptions {
            min_query_len: self.settings.min_query_len,
        };
        let transition = router::transition(self.bundle, &self.state, event, &options);
        self.state = transition.state;
        transition.scroll_to_top
    }

    /// Flips one navigator group. Returns false if no group has that id.
    pub fn toggle(&mut self, group_id: &str) -> bool {
        navigator::toggle(
            self.bundle.nav_tree(),
            &mut self.state.expanded_groups,
            group_id,
        )
    }

    /// Returns the visible navigator rows.
    pub fn nav_rows(&self) -> Vec<NavRow> {
        navigator::render(self.bundle.nav_tree(), &self.state)
    }

    /// Returns the hits for the current search, or `None` when not searching.
    pub fn results(&self) -> Option<Vec<SearchHit>> {
        let View::Search(query) = &self.state.view else {
            return None;
        };
        // The router only enters Search with a query long enough to run.
        let engine = SearchEngine::with_settings(self.bundle, self.settings);
        Some(engine.search(query).unwrap_or_default())
    }

    /// Builds the content-area screen for the current view.
    pub fn screen<R: Renderer>(&self, renderer: &R) -> Screen<'b, R::Output> {
        match &self.state.view {
            View::Home => Screen::Home,
            View::Article(id) => match self.bundle.get(id.as_str()) {
                Some(document) => Screen::Article {
                    document,
                    content: renderer.render(&document.body),
                },
                None => Screen::Home,
            },
            View::Search(query) => Screen::Search {
                query: query.clone(),
                hits: self.results().unwrap_or_default(),
            },
        }
    }
}
