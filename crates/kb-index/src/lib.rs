//! Build-time indexer for kb.
//!
//! This crate compiles a content root into a single [`Bundle`]:
//! - Lazy, deterministic discovery of source files ([`Scanner`])
//! - One-pass construction of the document map and navigation tree ([`TreeBuilder`])
//! - Deterministic JSON serialization with consistency checks on load
//! - Staleness detection and an optional markdown overview of the corpus
//!
//! # Example
//!
//! ```no_run
//! use kb_config::Config;
//! use kb_index::{Indexer, SilentReporter};
//!
//! let config = Config::load(".".as_ref()).unwrap();
//! let indexer = Indexer::new(&config).unwrap();
//! let output = indexer.build(&mut SilentReporter).unwrap();
//! indexer.write(&output).unwrap();
//! ```

#![warn(missing_docs)]

mod builder;
mod bundle;
mod config_hash;
mod discovery;
mod error;
mod index_md;
mod indexer;
mod status;
mod tree;
mod writer;

pub use builder::TreeBuilder;
pub use bundle::Bundle;
pub use config_hash::{
    BUNDLE_FORMAT_VERSION, SourceSet, compute_source_hash, source_hash_path,
};
pub use discovery::{DiscoveredFile, RawDocument, Scanner, discover_files, is_binary_file};
pub use error::IndexError;
pub use index_md::{INDEX_HEADING, render_markdown_index};
pub use indexer::{BuildOutput, BuildStats, Indexer, ProgressReporter, SilentReporter};
pub use status::{BundleStatus, detect_bundle_status};
pub use tree::{NavNode, find_group, leaf_ancestors, leaf_ids, walk};
pub use writer::{read_source_hash, write_atomic, write_bundle, write_source_hash};
