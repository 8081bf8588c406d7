//! Router state machine.
//!
//! [`transition`] is a pure function from a state and an [`Event`] to the next state.
//! Each event variant is one row of the transition table:
//!
//! | Event            | History          | View                                       |
//! |------------------|------------------|--------------------------------------------|
//! | `Fragment(f)`    | push `f`         | `""` → Home, known id → Article, else Home |
//! | `OpenDocument`   | push id          | Article, or Home (replace) if unknown      |
//! | `OpenHome`       | replace with `""`| Home                                       |
//! | `Back`/`Forward` | move cursor      | routed from the new current entry          |
//! | `SearchInput(q)` | unchanged        | Search, or back to the view before search  |

use kb_document::DocId;
use kb_index::Bundle;
use tracing::debug;

use crate::{SessionState, View, navigator};

/// An input to the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// External navigation to an addressable fragment, with or without a leading `#`.
    Fragment(String),
    /// Programmatic request to open a document.
    OpenDocument(String),
    /// Programmatic request to show Home.
    OpenHome,
    /// Step back in history.
    Back,
    /// Step forward in history.
    Forward,
    /// The search input changed.
    SearchInput(String),
}

/// Router tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterOptions {
    /// Minimum trimmed query length, in characters, that enters search.
    pub min_query_len: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self { min_query_len: 2 }
    }
}

/// The outcome of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The next state.
    pub state: SessionState,
    /// Whether the content area should scroll back to the top.
    pub scroll_to_top: bool,
}

/// Resolves a fragment to a view. Unknown and empty fragments resolve to Home.
pub fn route_fragment(bundle: &Bundle, fragment: &str) -> View {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if fragment.is_empty() {
        return View::Home;
    }
    match DocId::parse(fragment) {
        Ok(id) if bundle.contains(id.as_str()) => View::Article(id),
        _ => {
            debug!(fragment, "unknown fragment, showing home");
            View::Home
        }
    }
}

/// Computes the state that follows `event`.
pub fn transition(
    bundle: &Bundle,
    state: &SessionState,
    event: Event,
    options: &RouterOptions,
) -> Transition {
    let mut next = state.clone();

    let scroll_to_top = match event {
        Event::Fragment(fragment) => {
            let fragment = fragment.strip_prefix('#').unwrap_or(&fragment).to_string();
            next.history.push(&fragment);
            let view = route_fragment(bundle, &fragment);
            navigate(bundle, &mut next, view)
        }
        Event::OpenDocument(id) => {
            let view = route_fragment(bundle, &id);
            match view.fragment() {
                Some(fragment) if !fragment.is_empty() => {
                    next.history.push(fragment);
                }
                _ => next.history.replace(""),
            }
            navigate(bundle, &mut next, view)
        }
        Event::OpenHome => {
            next.history.replace("");
            navigate(bundle, &mut next, View::Home)
        }
        Event::Back => match next.history.back().map(str::to_string) {
            Some(fragment) => {
                let view = route_fragment(bundle, &fragment);
                navigate(bundle, &mut next, view)
            }
            None => return unchanged(state),
        },
        Event::Forward => match next.history.forward().map(str::to_string) {
            Some(fragment) => {
                let view = route_fragment(bundle, &fragment);
                navigate(bundle, &mut next, view)
            }
            None => return unchanged(state),
        },
        Event::SearchInput(query) => search_input(bundle, &mut next, query, options),
    };

    Transition {
        state: next,
        scroll_to_top,
    }
}

/// Returns a transition that leaves the state as it was.
fn unchanged(state: &SessionState) -> Transition {
    Transition {
        state: state.clone(),
        scroll_to_top: false,
    }
}

/// Navigates away from whatever is shown, abandoning any search.
fn navigate(bundle: &Bundle, state: &mut SessionState, view: View) -> bool {
    state.search_query.clear();
    state.resume = None;
    enter(bundle, state, view)
}

/// Applies a view and its side effects on the navigator. Returns `scroll_to_top`.
///
/// This is the only place `active_leaf` is assigned.
fn enter(bundle: &Bundle, state: &mut SessionState, view: View) -> bool {
    let scroll_to_top = match &view {
        View::Article(id) => {
            navigator::reveal(bundle.nav_tree(), &mut state.expanded_groups, id);
            state.active_leaf = Some(id.clone());
            true
        }
        View::Home | View::Search(_) => {
            state.active_leaf = None;
            false
        }
    };
    state.view = view;
    scroll_to_top
}

/// Handles a change of the search input.
fn search_input(
    bundle: &Bundle,
    state: &mut SessionState,
    query: String,
    options: &RouterOptions,
) -> bool {
    let trimmed = query.trim().to_string();
    let searching = matches!(state.view, View::Search(_));
    state.search_query = query;

    if trimmed.chars().count() >= options.min_query_len {
        if !searching {
            state.resume = Some(state.view.clone());
        }
        return enter(bundle, state, View::Search(trimmed));
    }

    if !searching {
        return false;
    }

    let resume = match state.resume.take() {
        Some(View::Article(id)) if bundle.contains(id.as_str()) => View::Article(id),
        _ => View::Home,
    };
    enter(bundle, state, resume)
}
