//! Include/exclude pattern compilation and matching.
//!
//! Compiles the glob patterns of the content settings into matchers that decide
//! which files under the content root become documents.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{ConfigError, ContentSettings};

/// Compiled glob patterns for efficient file matching.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    /// Compiled include patterns.
    include: GlobSet,
    /// Compiled exclude patterns.
    exclude: GlobSet,
}

impl CompiledPatterns {
    /// Compiles include/exclude patterns into matchers.
    pub fn compile(content: &ContentSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            include: build_set(&content.include, "include")?,
            exclude: build_set(&content.exclude, "exclude")?,
        })
    }

    /// Checks whether a path relative to the content root should be scanned.
    ///
    /// A file matches if it matches at least one include pattern and no exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

/// Builds a glob set from a list of patterns.
fn build_set(patterns: &[String], kind: &str) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    builder.build().map_err(|source| ConfigError::InvalidPattern {
        pattern: format!("<combined {kind} patterns>"),
        source,
    })
}

/// Compiles a single glob pattern.
fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
