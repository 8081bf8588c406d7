//! Source set hashing for bundle staleness checks.
//!
//! Next to each bundle the build stores a hash of everything that decides which documents
//! exist and what they are called. When the hash changes the bundle is stale even if no
//! file was modified, e.g. after a file was deleted or a pattern was edited.
//!
//! Inputs to the hash:
//! - Bundle format version (internal, bumped when the JSON layout changes)
//! - Content root, include/exclude patterns and index file stems
//! - The sorted list of discovered relative paths

use std::{
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
};

use kb_config::Config;
use siphasher::sip::SipHasher24;

use crate::DiscoveredFile;

/// Current bundle format version. Bump this when the bundle layout changes.
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

/// Everything that determines the set of documents in a bundle.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct SourceSet {
    /// Bundle format version.
    pub format_version: u32,
    /// Content root.
    pub content_root: Option<PathBuf>,
    /// Include patterns.
    pub include: Vec<String>,
    /// Exclude patterns.
    pub exclude: Vec<String>,
    /// Index file stems.
    pub index_files: Vec<String>,
    /// Discovered relative paths, in scan order.
    pub files: Vec<PathBuf>,
}

impl SourceSet {
    /// Collects the source set for a config and its discovered files.
    pub fn new(config: &Config, files: &[DiscoveredFile]) -> Self {
        Self {
            format_version: BUNDLE_FORMAT_VERSION,
            content_root: config.content.root.clone(),
            include: config.content.include.clone(),
            exclude: config.content.exclude.clone(),
            index_files: config.content.index_files.clone(),
            files: files.iter().map(|f| f.rel_path.clone()).collect(),
        }
    }

    /// Computes a hash of the source set.
    pub fn compute_hash(&self) -> u64 {
        let mut hasher = SipHasher24::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Computes a hash and returns it as a hex string.
    pub fn hash_string(&self) -> String {
        format!("{:016x}", self.compute_hash())
    }
}

/// Computes the source hash for a config and its discovered files.
pub fn compute_source_hash(config: &Config, files: &[DiscoveredFile]) -> String {
    SourceSet::new(config, files).hash_string()
}

/// Returns the path of the source hash file stored next to a bundle.
pub fn source_hash_path(bundle_path: &Path) -> PathBuf {
    bundle_path.with_extension("hash")
}

#[cfg(test)]
mod test {
    use std::time::SystemTime;

    use super::*;

    fn file(rel: &str) -> DiscoveredFile {
        DiscoveredFile {
            abs_path: PathBuf::from("/c").join(rel),
            rel_path: PathBuf::from(rel),
            mtime: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn same_inputs_produce_same_hash() {
        let config = Config::default();
        let files = [file("a.md"), file("b/c.md")];
        assert_eq!(
            compute_source_hash(&config, &files),
            compute_source_hash(&config, &files)
        );
    }

    #[test]
    fn removed_file_changes_hash() {
        let config = Config::default();
        let before = compute_source_hash(&config, &[file("a.md"), file("b.md")]);
        let after = compute_source_hash(&config, &[file("a.md")]);
        assert_ne!(before, after);
    }

    #[test]
    fn pattern_change_changes_hash() {
        let config1 = Config::default();
        let mut config2 = Config::default();
        config2.content.index_files = vec!["README".to_string()];

        assert_ne!(
            compute_source_hash(&config1, &[]),
            compute_source_hash(&config2, &[])
        );
    }

    #[test]
    fn hash_is_hex_string() {
        let hash = compute_source_hash(&Config::default(), &[]);
        assert_eq!(hash.len(), 16);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_file_sits_next_to_bundle() {
        assert_eq!(
            source_hash_path(Path::new("/notes/.kb/bundle.json")),
            PathBuf::from("/notes/.kb/bundle.hash")
        );
    }
}
