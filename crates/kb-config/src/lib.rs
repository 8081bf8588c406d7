//! Configuration system for kb.
//!
//! kb uses TOML configuration files named `.kb.toml`. Configuration is resolved by walking up
//! the directory tree from the current working directory, collecting any `.kb.toml` files found,
//! then loading `~/.kb.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod display;
mod error;
mod merge;
mod parse;
mod patterns;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use display::format_path_for_display;
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawBuildSettings, RawConfig, RawContentSettings, RawSearchSettings, parse_config_file,
    parse_config_str,
};
pub use patterns::CompiledPatterns;
pub use resolve::resolve_content_path;
use serde::{Deserialize, Serialize};
pub use templates::local_template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default include patterns when none are specified.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["**/*.md", "**/*.markdown", "**/*.txt"];

/// Default exclude patterns: the generated markdown index at the content root.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["INDEX.md"];

/// Default stems of files that stand for their enclosing directory.
pub const DEFAULT_INDEX_FILES: &[&str] = &["README", "index"];

/// Top-level merged configuration for kb.
///
/// This represents the fully resolved configuration after merging all discovered `.kb.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Content corpus settings.
    pub content: ContentSettings,
    /// Bundle build settings.
    pub build: BuildSettings,
    /// Runtime search settings.
    pub search: SearchSettings,
    /// Directory containing the most specific config file (anchors the bundle location).
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.kb.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Compiles the include/exclude patterns of the content settings.
    pub fn compile_patterns(&self) -> Result<CompiledPatterns, ConfigError> {
        CompiledPatterns::compile(&self.content)
    }

    /// Returns the absolute path the bundle is written to, if a config root is known.
    pub fn bundle_path(&self) -> Option<PathBuf> {
        self.config_root
            .as_ref()
            .map(|root| root.join(&self.build.output))
    }

    /// Returns the path of the generated markdown index, if a content root is configured.
    pub fn markdown_index_path(&self) -> Option<PathBuf> {
        self.content.root.as_ref().map(|root| root.join("INDEX.md"))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The content root is omitted since it is printed separately with its resolved path.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            content: SerializableContentSettings::from(&self.content),
            build: self.build.clone(),
            search: self.search,
        };
        toml::to_string_pretty(&serializable).map_err(ConfigError::Serialize)
    }
}

/// Settings describing the content corpus.
#[derive(Debug, Clone)]
pub struct ContentSettings {
    /// Resolved absolute path to the content root, if configured.
    pub root: Option<PathBuf>,
    /// Include patterns, relative to the content root.
    pub include: Vec<String>,
    /// Exclude patterns, relative to the content root.
    pub exclude: Vec<String>,
    /// File stems (case-insensitive) that stand for their enclosing directory.
    pub index_files: Vec<String>,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            root: None,
            include: to_strings(DEFAULT_INCLUDE_PATTERNS),
            exclude: to_strings(DEFAULT_EXCLUDE_PATTERNS),
            index_files: to_strings(DEFAULT_INDEX_FILES),
        }
    }
}

/// Settings for the bundle build step.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Bundle output path, relative to the config root.
    pub output: PathBuf,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: PathBuf::from(".kb/bundle.json"),
        }
    }
}

/// Settings for the runtime search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Minimum query length (in characters, after trimming) that enters search.
    pub min_query_len: usize,
    /// Maximum number of results returned.
    pub limit: usize,
    /// Characters of context kept before the first body match.
    pub excerpt_before: usize,
    /// Characters of context kept after the end of the first body match.
    pub excerpt_after: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            limit: 40,
            excerpt_before: 70,
            excerpt_after: 120,
        }
    }
}

/// Content settings without the resolved root, for TOML output.
#[derive(Serialize)]
struct SerializableContentSettings {
    /// Include patterns.
    include: Vec<String>,
    /// Exclude patterns.
    exclude: Vec<String>,
    /// Index file stems.
    index_files: Vec<String>,
}

impl From<&ContentSettings> for SerializableContentSettings {
    fn from(content: &ContentSettings) -> Self {
        Self {
            include: content.include.clone(),
            exclude: content.exclude.clone(),
            index_files: content.index_files.clone(),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Content settings.
    content: SerializableContentSettings,
    /// Build settings.
    build: BuildSettings,
    /// Search settings.
    search: SearchSettings,
}

/// Converts a static pattern list to owned strings.
fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_settings_defaults() {
        let search = SearchSettings::default();
        assert_eq!(search.min_query_len, 2);
        assert_eq!(search.limit, 40);
        assert_eq!(search.excerpt_before, 70);
        assert_eq!(search.excerpt_after, 120);
    }

    #[test]
    fn test_content_settings_defaults() {
        let content = ContentSettings::default();
        assert!(content.root.is_none());
        assert_eq!(content.include, vec!["**/*.md", "**/*.markdown", "**/*.txt"]);
        assert_eq!(content.exclude, vec!["INDEX.md"]);
        assert_eq!(content.index_files, vec!["README", "index"]);
    }

    #[test]
    fn test_bundle_path_requires_config_root() {
        let mut config = Config::default();
        assert!(config.bundle_path().is_none());

        config.config_root = Some(PathBuf::from("/notes"));
        assert_eq!(
            config.bundle_path(),
            Some(PathBuf::from("/notes/.kb/bundle.json"))
        );
    }

    #[test]
    fn test_settings_to_toml() {
        let config = Config::default();
        let toml = config.settings_to_toml().unwrap();

        assert!(toml.contains("[content]"));
        assert!(toml.contains("[build]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("limit = 40"));
        assert!(toml.contains("output = \".kb/bundle.json\""));

        let parsed: toml::Value = toml::from_str(&toml).unwrap();
        assert!(parsed.get("search").is_some());
    }
}
