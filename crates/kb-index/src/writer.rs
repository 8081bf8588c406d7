//! Writing build artifacts to disk.
//!
//! Every artifact is written to a temporary sibling file first and then renamed into
//! place, so a reader sees either the old file or the complete new one.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Bundle, IndexError, config_hash::source_hash_path};

/// Writes `contents` to `path` via a temporary sibling and a rename.
///
/// Creates parent directories as needed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), IndexError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_sibling(path);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Writes a bundle as JSON.
pub fn write_bundle(path: &Path, bundle: &Bundle) -> Result<(), IndexError> {
    write_atomic(path, &bundle.to_json()?)
}

/// Stores the source hash next to the bundle at `bundle_path`.
pub fn write_source_hash(bundle_path: &Path, hash: &str) -> Result<(), IndexError> {
    write_atomic(&source_hash_path(bundle_path), hash)
}

/// Reads the source hash stored next to the bundle at `bundle_path`.
///
/// Returns `None` if the hash file doesn't exist or can't be read.
pub fn read_source_hash(bundle_path: &Path) -> Option<String> {
    fs::read_to_string(source_hash_path(bundle_path))
        .ok()
        .map(|s| s.trim().to_string())
}

/// Returns the temporary path used while writing `path`.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
