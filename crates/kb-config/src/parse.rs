//! Configuration file parsing.
//!
//! Parses individual `.kb.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Content corpus section.
    pub content: Option<RawContentSettings>,
    /// Bundle build section.
    pub build: Option<RawBuildSettings>,
    /// Search section.
    pub search: Option<RawSearchSettings>,
}

/// Raw content settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawContentSettings {
    /// Path to the content root, relative to the defining config file.
    pub path: Option<String>,
    /// Include pattern(s); a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub include: Option<Vec<String>>,
    /// Exclude pattern(s); a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exclude: Option<Vec<String>>,
    /// Stems of files that stand for their directory.
    pub index_files: Option<Vec<String>>,
}

/// Raw build settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBuildSettings {
    /// Bundle output path, relative to the config root.
    pub output: Option<String>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Minimum query length that enters search.
    pub min_query_len: Option<usize>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Excerpt context before the match.
    pub excerpt_before: Option<usize>,
    /// Excerpt context after the match.
    pub excerpt_after: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.content.is_none());
        assert!(config.build.is_none());
        assert!(config.search.is_none());
    }

    #[test]
    fn test_parse_content_section() {
        let toml = r#"
[content]
path = "./knowledge"
include = ["**/*.md"]
exclude = ["**/drafts/**"]
index_files = ["README"]
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let content = config.content.unwrap();
        assert_eq!(content.path.as_deref(), Some("./knowledge"));
        assert_eq!(content.include, Some(vec!["**/*.md".to_string()]));
        assert_eq!(content.exclude, Some(vec!["**/drafts/**".to_string()]));
        assert_eq!(content.index_files, Some(vec!["README".to_string()]));
    }

    #[test]
    fn test_parse_single_string_patterns() {
        let toml = r#"
[content]
include = "**/*.md"
exclude = "scratch/**"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let content = config.content.unwrap();
        assert_eq!(content.include, Some(vec!["**/*.md".to_string()]));
        assert_eq!(content.exclude, Some(vec!["scratch/**".to_string()]));
    }

    #[test]
    fn test_parse_partial_search_settings() {
        let toml = r#"
[search]
limit = 10
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let search = config.search.unwrap();
        assert_eq!(search.limit, Some(10));
        assert!(search.min_query_len.is_none());
        assert!(search.excerpt_before.is_none());
    }

    #[test]
    fn test_parse_build_and_root() {
        let toml = r#"
root = true

[build]
output = "public/bundle.json"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));
        assert_eq!(
            config.build.unwrap().output.as_deref(),
            Some("public/bundle.json")
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config_str("this is not valid toml [[[", Path::new("test.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_parse_wrong_type() {
        let toml = r#"
[search]
limit = "many"
"#;
        let result = parse_config_str(toml, Path::new("test.toml"));
        assert!(result.is_err());
    }
}
