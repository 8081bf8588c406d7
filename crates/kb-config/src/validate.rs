//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, fs, path::Path};

use globset::{Glob, GlobMatcher};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No content root is configured.
    NoContentRoot,
    /// The content root does not exist.
    ContentRootMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The content root exists but is not a directory.
    ContentRootNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// An include pattern doesn't match any files.
    IncludePatternMatchesNothing {
        /// Pattern that matched nothing.
        pattern: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoContentRoot => write!(f, "no content root is configured"),
            Self::ContentRootMissing { path } => {
                write!(f, "content root does not exist: {path}")
            }
            Self::ContentRootNotDirectory { path } => {
                write!(f, "content root is not a directory: {path}")
            }
            Self::IncludePatternMatchesNothing { pattern } => {
                write!(f, "include pattern '{pattern}' matches no files")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let Some(root) = config.content.root.as_deref() else {
        return vec![ConfigWarning::NoContentRoot];
    };

    if !root.exists() {
        return vec![ConfigWarning::ContentRootMissing {
            path: root.display().to_string(),
        }];
    }

    if !root.is_dir() {
        return vec![ConfigWarning::ContentRootNotDirectory {
            path: root.display().to_string(),
        }];
    }

    config
        .content
        .include
        .iter()
        .filter(|pattern| !pattern_matches_any_file(root, pattern))
        .map(|pattern| ConfigWarning::IncludePatternMatchesNothing {
            pattern: pattern.clone(),
        })
        .collect()
}

/// Checks if a glob pattern matches any file below a directory.
fn pattern_matches_any_file(root: &Path, pattern: &str) -> bool {
    let Ok(glob) = Glob::new(pattern) else {
        // Invalid patterns surface when the patterns are compiled.
        return false;
    };
    walk_and_match(root, root, &glob.compile_matcher())
}

/// Recursively walks a directory and checks if any file matches the pattern.
fn walk_and_match(root: &Path, current: &Path, matcher: &GlobMatcher) -> bool {
    let Ok(entries) = fs::read_dir(current) else {
        return false;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        if path.is_file() && matcher.is_match(relative) {
            return true;
        }

        if path.is_dir() && walk_and_match(root, &path, matcher) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    /// Builds a config whose content root is `root`.
    fn config_with_root(root: &Path) -> Config {
        let mut config = Config::default();
        config.content.root = Some(root.to_path_buf());
        config
    }

    #[test]
    fn warns_without_content_root() {
        assert_eq!(
            validate_config(&Config::default()),
            vec![ConfigWarning::NoContentRoot]
        );
    }

    #[test]
    fn warns_on_missing_root() {
        let dir = TestDir::new();
        let warnings = validate_config(&config_with_root(&dir.path().join("gone")));
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::ContentRootMissing { .. }]
        ));
    }

    #[test]
    fn warns_on_file_root() {
        let dir = TestDir::new();
        let file = dir.create_file("notes.md", "# Notes");
        let warnings = validate_config(&config_with_root(&file));
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::ContentRootNotDirectory { .. }]
        ));
    }

    #[test]
    fn warns_on_unmatched_include_patterns() {
        let dir = TestDir::new();
        dir.create_file("swe/foo.md", "# Foo");

        let warnings = validate_config(&config_with_root(dir.path()));
        assert_eq!(
            warnings,
            vec![
                ConfigWarning::IncludePatternMatchesNothing {
                    pattern: "**/*.markdown".into()
                },
                ConfigWarning::IncludePatternMatchesNothing {
                    pattern: "**/*.txt".into()
                },
            ]
        );
    }

    #[test]
    fn warning_display() {
        let warning = ConfigWarning::ContentRootMissing {
            path: "/notes".into(),
        };
        assert_eq!(warning.to_string(), "content root does not exist: /notes");
    }
}
