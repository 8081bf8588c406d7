//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    BuildSettings, Config, ConfigError, ContentSettings, SearchSettings,
    parse::{RawBuildSettings, RawConfig, RawContentSettings, RawSearchSettings},
    resolve::resolve_content_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every field the first defined value wins.
/// A relative content path is resolved against the directory of the file that defined it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let Some(closest) = configs.first() else {
        return Ok(Config::default());
    };

    let mut content = ContentSettings::default();
    let mut build = BuildSettings::default();
    let mut search = SearchSettings::default();

    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.content {
            apply_raw_content(&mut content, raw, parsed.dir())?;
        }
        if let Some(ref raw) = parsed.config.build {
            apply_raw_build(&mut build, raw);
        }
        if let Some(ref raw) = parsed.config.search {
            apply_raw_search(&mut search, raw);
        }
    }

    Ok(Config {
        content,
        build,
        search,
        config_root: Some(closest.dir().to_path_buf()),
    })
}

/// Applies raw content settings, resolving the path against `config_dir`.
fn apply_raw_content(
    result: &mut ContentSettings,
    raw: &RawContentSettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref path) = raw.path {
        result.root = Some(resolve_content_path(path, config_dir)?);
    }
    if let Some(ref v) = raw.include {
        result.include = v.clone();
    }
    if let Some(ref v) = raw.exclude {
        result.exclude = v.clone();
    }
    if let Some(ref v) = raw.index_files {
        result.index_files = v.clone();
    }
    Ok(())
}

/// Applies raw build settings.
fn apply_raw_build(result: &mut BuildSettings, raw: &RawBuildSettings) {
    if let Some(ref v) = raw.output {
        result.output = PathBuf::from(v);
    }
}

/// Applies raw search settings.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.min_query_len {
        result.min_query_len = v;
    }
    if let Some(v) = raw.limit {
        result.limit = v;
    }
    if let Some(v) = raw.excerpt_before {
        result.excerpt_before = v;
    }
    if let Some(v) = raw.excerpt_after {
        result.excerpt_after = v;
    }
}
