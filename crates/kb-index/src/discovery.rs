//! Content discovery.
//!
//! Walks the content root to find the files that become documents, applying
//! include/exclude patterns and filtering out hidden entries, symlinks and binaries.
//! Directory entries are visited sorted by file name, depth-first, so the order of
//! discovered files is deterministic.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use kb_config::CompiledPatterns;
use tracing::debug;
use walkdir::{DirEntry, FilterEntry, WalkDir};

use crate::IndexError;

/// A source file and its contents, as produced by the [`Scanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Path relative to the content root.
    pub rel_path: PathBuf,
    /// Absolute path to the file.
    pub abs_path: PathBuf,
    /// Full file contents.
    pub raw_text: String,
}

/// A content file located without reading it.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Absolute path to the file.
    pub abs_path: PathBuf,
    /// Path relative to the content root.
    pub rel_path: PathBuf,
    /// File modification time.
    pub mtime: SystemTime,
}

/// Walker over candidate content files, yielding `(abs_path, rel_path)` pairs.
struct ContentWalker {
    /// Content root all relative paths are computed against.
    root: PathBuf,
    /// Include/exclude patterns.
    patterns: CompiledPatterns,
    /// Sorted directory walk with hidden entries pruned.
    walker: FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
}

impl ContentWalker {
    /// Starts a walk at `root`.
    fn new(root: &Path, patterns: CompiledPatterns) -> Self {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(is_visible as fn(&DirEntry) -> bool);
        Self {
            root: root.to_path_buf(),
            patterns,
            walker,
        }
    }
}

impl Iterator for ContentWalker {
    type Item = Result<(DirEntry, PathBuf), IndexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    return Some(Err(IndexError::UnreadableSource {
                        path,
                        source: err.into(),
                    }));
                }
            };

            // Directories and symlinks (never followed) are not documents.
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(rel_path) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if !self.patterns.matches(rel_path) || is_binary_file(rel_path) {
                continue;
            }

            let rel_path = rel_path.to_path_buf();
            return Some(Ok((entry, rel_path)));
        }
    }
}

/// Lazily reads every content file below a root.
///
/// Each item is either a [`RawDocument`] or an [`IndexError::UnreadableSource`] for a file
/// that could not be read. A failure affects only that item; iteration continues with the
/// next file.
pub struct Scanner {
    /// Underlying filtered walk.
    walker: ContentWalker,
}

impl Scanner {
    /// Creates a scanner over `root`.
    pub fn new(root: &Path, patterns: CompiledPatterns) -> Self {
        Self {
            walker: ContentWalker::new(root, patterns),
        }
    }
}

impl Iterator for Scanner {
    type Item = Result<RawDocument, IndexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (entry, rel_path) = match self.walker.next()? {
            Ok(found) => found,
            Err(err) => return Some(Err(err)),
        };
        let abs_path = entry.into_path();

        Some(match fs::read_to_string(&abs_path) {
            Ok(raw_text) => {
                debug!(path = %rel_path.display(), bytes = raw_text.len(), "scanned document");
                Ok(RawDocument {
                    rel_path,
                    abs_path,
                    raw_text,
                })
            }
            Err(source) => {
                debug!(path = %abs_path.display(), error = %source, "unreadable source");
                Err(IndexError::UnreadableSource {
                    path: abs_path,
                    source,
                })
            }
        })
    }
}

/// Lists content files below `root` with their modification times, without reading them.
///
/// Entries that cannot be walked or stat'ed are skipped.
pub fn discover_files(root: &Path, patterns: &CompiledPatterns) -> Vec<DiscoveredFile> {
    ContentWalker::new(root, patterns.clone())
        .filter_map(Result::ok)
        .filter_map(|(entry, rel_path)| {
            let mtime = entry
                .metadata()
                .ok()?
                .modified()
                .unwrap_or(SystemTime::UNIX_EPOCH);
            Some(DiscoveredFile {
                abs_path: entry.into_path(),
                rel_path,
                mtime,
            })
        })
        .collect()
}

/// Returns false for hidden entries below the walk root.
fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !is_hidden(entry.file_name())
}

/// Checks if a filename represents a hidden file (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

/// Checks if a file is likely binary based on extension.
///
/// Unknown extensions are assumed to be text.
pub fn is_binary_file(path: &Path) -> bool {
    const BINARY_EXTENSIONS: &[&str] = &[
        // Images
        "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "tif", "psd", "heic",
        // Audio and video
        "mp3", "wav", "flac", "ogg", "m4a", "mp4", "avi", "mkv", "mov", "webm",
        // Archives
        "zip", "tar", "gz", "bz2", "xz", "7z", "rar", "iso", "dmg",
        // Executables and objects
        "exe", "dll", "so", "dylib", "bin", "o", "a", "class", "pyc", "wasm",
        // Binary documents
        "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt",
        // Fonts and databases
        "ttf", "otf", "woff", "woff2", "db", "sqlite", "sqlite3",
    ];

    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

#[cfg(test)]
mod test {
    use kb_config::ContentSettings;
    use tempfile::TempDir;

    use super::*;

    fn patterns(include: &[&str], exclude: &[&str]) -> CompiledPatterns {
        CompiledPatterns::compile(&ContentSettings {
            include: include.iter().map(|s| (*s).to_string()).collect(),
            exclude: exclude.iter().map(|s| (*s).to_string()).collect(),
            ..Default::default()
        })
        .unwrap()
    }

    fn default_patterns() -> CompiledPatterns {
        CompiledPatterns::compile(&ContentSettings::default()).unwrap()
    }

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn rel_paths(scanner: Scanner) -> Vec<String> {
        scanner
            .map(|item| item.unwrap().rel_path.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn scans_in_sorted_depth_first_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "swe/foo.md", "# Foo");
        write(temp.path(), "ai/bar.md", "# Bar");
        write(temp.path(), "ai/agents/zeta.md", "z");
        write(temp.path(), "notes.txt", "n");

        let paths = rel_paths(Scanner::new(temp.path(), default_patterns()));
        assert_eq!(
            paths,
            vec!["ai/agents/zeta.md", "ai/bar.md", "notes.txt", "swe/foo.md"]
        );
    }

    #[test]
    fn yields_contents() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "swe/foo.md", "# Foo\n\nbody");

        let docs: Vec<_> = Scanner::new(temp.path(), default_patterns())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].raw_text, "# Foo\n\nbody");
        assert_eq!(docs[0].abs_path, temp.path().join("swe/foo.md"));
    }

    #[test]
    fn skips_hidden_entries_even_under_hidden_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".knowledge");
        write(&root, ".git/HEAD.md", "ref");
        write(&root, ".draft.md", "draft");
        write(&root, "visible.md", "# Visible");

        let paths = rel_paths(Scanner::new(&root, default_patterns()));
        assert_eq!(paths, vec!["visible.md"]);
    }

    #[test]
    fn applies_patterns_and_skips_binaries() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "published.md", "p");
        write(temp.path(), "drafts/draft.md", "d");
        write(temp.path(), "image.png", "fake");
        write(temp.path(), "data.csv", "a,b");

        let paths = rel_paths(Scanner::new(
            temp.path(),
            patterns(&["**/*"], &["drafts/**"]),
        ));
        assert_eq!(paths, vec!["data.csv", "published.md"]);
    }

    #[test]
    fn generated_index_is_excluded_by_default() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "INDEX.md", "# Knowledge Index");
        write(temp.path(), "swe/foo.md", "# Foo");

        let paths = rel_paths(Scanner::new(temp.path(), default_patterns()));
        assert_eq!(paths, vec!["swe/foo.md"]);
    }

    #[test]
    fn invalid_utf8_is_an_item_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.md", "# A");
        fs::write(temp.path().join("b.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        write(temp.path(), "c.md", "# C");

        let items: Vec<_> = Scanner::new(temp.path(), default_patterns()).collect();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok());
        assert!(matches!(
            &items[1],
            Err(IndexError::UnreadableSource { path, .. }) if path.ends_with("b.md")
        ));
        assert!(items[2].is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        write(&outside, "secret.md", "# Secret");
        let root = temp.path().join("content");
        write(&root, "real.md", "# Real");
        symlink(&outside, root.join("linked")).unwrap();
        symlink(root.join("real.md"), root.join("alias.md")).unwrap();

        let paths = rel_paths(Scanner::new(&root, default_patterns()));
        assert_eq!(paths, vec!["real.md"]);
    }

    #[test]
    fn discover_files_lists_without_reading() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "ai/bar.md", "# Bar");
        fs::write(temp.path().join("broken.md"), [0xff, 0xfe]).unwrap();

        let files = discover_files(temp.path(), &default_patterns());
        let rel: Vec<_> = files.iter().map(|f| f.rel_path.clone()).collect();
        assert_eq!(rel, vec![PathBuf::from("ai/bar.md"), PathBuf::from("broken.md")]);
    }

    #[test]
    fn is_binary_file_detects_binary_extensions() {
        assert!(is_binary_file(Path::new("image.png")));
        assert!(is_binary_file(Path::new("archive.ZIP")));
        assert!(is_binary_file(Path::new("doc.pdf")));

        assert!(!is_binary_file(Path::new("readme.md")));
        assert!(!is_binary_file(Path::new("notes.txt")));
        assert!(!is_binary_file(Path::new("no_extension")));
    }
}
