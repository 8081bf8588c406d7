//! Full build pipeline.
//!
//! The [`Indexer`] runs one synchronous build pass:
//! 1. Scan the content root for source files
//! 2. Parse each file and insert it into the [`TreeBuilder`]
//! 3. Finalize the navigation tree into a [`Bundle`]
//!
//! Unreadable files and files whose path cannot become an id are skipped and recorded in
//! [`BuildStats`]. Duplicate ids abort the build.

use std::path::{Path, PathBuf};

use kb_config::{CompiledPatterns, Config};
use kb_document::TitleSource;
use tracing::{info, warn};

use crate::{
    Bundle, IndexError, Scanner, TreeBuilder, config_hash::compute_source_hash, discover_files,
    index_md::render_markdown_index,
    writer::{write_atomic, write_bundle, write_source_hash},
};

/// Statistics from a build pass.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of documents in the bundle.
    pub documents: usize,
    /// Number of files skipped due to errors.
    pub skipped: usize,
    /// Number of documents whose title was derived from the path.
    pub derived_titles: usize,
    /// Errors encountered (file path, error message).
    pub errors: Vec<(PathBuf, String)>,
}

impl BuildStats {
    /// Returns true if no file was skipped.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Callback for reporting build progress.
pub trait ProgressReporter {
    /// Called when a document was added to the bundle.
    fn on_document(&mut self, path: &Path, title_source: TitleSource);

    /// Called when a file was skipped.
    fn on_error(&mut self, path: &Path, error: &str);

    /// Called when the build pass is complete.
    fn on_complete(&mut self, stats: &BuildStats);
}

/// A no-op progress reporter for silent builds.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_document(&mut self, _path: &Path, _title_source: TitleSource) {}
    fn on_error(&mut self, _path: &Path, _error: &str) {}
    fn on_complete(&mut self, _stats: &BuildStats) {}
}

/// The result of a build pass.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The finished bundle.
    pub bundle: Bundle,
    /// Build statistics.
    pub stats: BuildStats,
    /// Hash of the source set the bundle was built from.
    pub source_hash: String,
}

/// Orchestrates the build pipeline.
pub struct Indexer<'a> {
    /// The loaded configuration.
    config: &'a Config,
    /// Resolved content root.
    content_root: PathBuf,
    /// Compiled include/exclude patterns.
    patterns: CompiledPatterns,
}

impl<'a> Indexer<'a> {
    /// Creates a new indexer for the given configuration.
    ///
    /// Returns an error if no content root is configured, the root does not exist, or the
    /// patterns fail to compile.
    pub fn new(config: &'a Config) -> Result<Self, IndexError> {
        let content_root = config
            .content
            .root
            .clone()
            .ok_or(IndexError::NoContentRoot)?;
        if !content_root.is_dir() {
            return Err(IndexError::ContentRootMissing { path: content_root });
        }

        let patterns = config.compile_patterns()?;

        Ok(Self {
            config,
            content_root,
            patterns,
        })
    }

    /// Returns the content root being indexed.
    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Runs a full build pass.
    pub fn build<R: ProgressReporter>(&self, reporter: &mut R) -> Result<BuildOutput, IndexError> {
        let files = discover_files(&self.content_root, &self.patterns);
        let source_hash = compute_source_hash(self.config, &files);

        let mut builder = TreeBuilder::new(&self.config.content.index_files);
        let mut stats = BuildStats::default();

        for item in Scanner::new(&self.content_root, self.patterns.clone()) {
            let raw = match item {
                Ok(raw) => raw,
                Err(err) => {
                    let path = match &err {
                        IndexError::UnreadableSource { path, .. } => path.clone(),
                        _ => self.content_root.clone(),
                    };
                    record_skip(&mut stats, reporter, path, &err);
                    continue;
                }
            };

            let abs_path = raw.abs_path.clone();
            match builder.insert(raw) {
                Ok(title_source) => {
                    if title_source == TitleSource::Derived {
                        stats.derived_titles += 1;
                    }
                    reporter.on_document(&abs_path, title_source);
                }
                Err(err @ IndexError::DuplicateId { .. }) => return Err(err),
                Err(err) => record_skip(&mut stats, reporter, abs_path, &err),
            }
        }

        let bundle = builder.finish();
        stats.documents = bundle.len();

        info!(
            documents = stats.documents,
            skipped = stats.skipped,
            derived_titles = stats.derived_titles,
            "build complete"
        );
        reporter.on_complete(&stats);

        Ok(BuildOutput {
            bundle,
            stats,
            source_hash,
        })
    }

    /// Writes the bundle and its source hash to the configured bundle path.
    pub fn write(&self, output: &BuildOutput) -> Result<PathBuf, IndexError> {
        let path = self.config.bundle_path().ok_or(IndexError::NoConfigRoot)?;
        write_bundle(&path, &output.bundle)?;
        write_source_hash(&path, &output.source_hash)?;
        Ok(path)
    }

    /// Writes the markdown overview to `INDEX.md` at the content root.
    pub fn write_markdown_index(&self, bundle: &Bundle) -> Result<PathBuf, IndexError> {
        let path = self.content_root.join("INDEX.md");
        write_atomic(&path, &render_markdown_index(bundle))?;
        Ok(path)
    }
}

/// Records a skipped file.
fn record_skip<R: ProgressReporter>(
    stats: &mut BuildStats,
    reporter: &mut R,
    path: PathBuf,
    err: &IndexError,
) {
    let message = err.to_string();
    warn!(path = %path.display(), error = %message, "skipped file");
    reporter.on_error(&path, &message);
    stats.skipped += 1;
    stats.errors.push((path, message));
}
