//! Temporary directory trees for kb-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory that is removed on drop.
pub struct TestDir {
    /// Backing directory.
    root: TempDir,
}

impl TestDir {
    /// Creates an empty temporary directory.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Returns the root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory (and its parents) below the root.
    pub fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a file below the root, creating parent directories.
    pub fn create_file(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.path().join(rel_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    /// Writes a `.kb.toml` into `rel_dir` (empty for the root) and returns its path.
    pub fn write_config(&self, rel_dir: &str, contents: &str) -> PathBuf {
        self.create_file(&Path::new(rel_dir).join(CONFIG_FILENAME).to_string_lossy(), contents)
    }
}
