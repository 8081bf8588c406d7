//! Path formatting for user-facing output.

use std::path::{Component, Path, PathBuf};

use directories::BaseDirs;

/// Formats a path for display.
///
/// Paths below `base` are shown relative to it. Other paths below the home directory are
/// shown with a `~/` prefix. Everything else is shown as-is.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    if let Some(relative) = base.and_then(|base| relative_below(path, base)) {
        return relative.display().to_string();
    }

    if let Some(home) = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return format!("~/{}", rest.display());
    }

    path.display().to_string()
}

/// Returns `path` relative to `base` when it does not need to climb out of `base`.
fn relative_below(path: &Path, base: &Path) -> Option<PathBuf> {
    let relative = pathdiff::diff_paths(path, base)?;
    if relative.components().any(|c| matches!(c, Component::ParentDir)) {
        return None;
    }
    if relative.as_os_str().is_empty() {
        return Some(PathBuf::from("."));
    }
    Some(relative)
}
