//! Interactive runtime for kb.
//!
//! Everything here works on an immutable [`kb_index::Bundle`] and a transient
//! [`SessionState`]:
//! - [`router`]: fragments, history and the view state machine
//! - [`navigator`]: expansion state and visible rows of the navigation tree
//! - [`search`]: scored full-text search with excerpts
//! - [`Session`]: the single owner that applies events in order
//!
//! # Example
//!
//! ```no_run
//! use kb_config::SearchSettings;
//! use kb_index::Bundle;
//! use kb_runtime::{Event, PlainRenderer, Screen, Session};
//!
//! let bundle = Bundle::load(".kb/bundle.json".as_ref()).unwrap();
//! let mut session = Session::new(&bundle, SearchSettings::default());
//! session.dispatch(Event::Fragment("#swe/backend/sql-basics".into()));
//! if let Screen::Article { document, content } = session.screen(&PlainRenderer) {
//!     println!("{}\n{content}", document.title);
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod history;
pub mod navigator;
pub mod router;
pub mod search;
mod session;
mod state;

pub use error::SearchError;
pub use history::History;
pub use navigator::{NavRow, RowKind};
pub use router::{Event, RouterOptions, Transition, route_fragment, transition};
pub use search::{SearchEngine, SearchHit, highlight};
pub use session::{PlainRenderer, Renderer, Screen, Session};
pub use state::{SessionState, View};
