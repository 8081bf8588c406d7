//! Bundle status detection.
//!
//! Decides whether the bundle on disk still reflects the content root.

use std::{fs, time::SystemTime};

use kb_config::Config;

use crate::{config_hash::compute_source_hash, discover_files, writer::read_source_hash};

/// Status of the bundle relative to the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleStatus {
    /// The bundle exists and reflects the content.
    Current,
    /// The bundle exists but content or content settings changed since it was built.
    Stale,
    /// No bundle exists.
    Missing,
}

impl BundleStatus {
    /// Returns a human-readable description for display.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Stale => "stale",
            Self::Missing => "missing",
        }
    }

    /// Returns true if the bundle should be rebuilt.
    pub fn needs_rebuild(&self) -> bool {
        !matches!(self, Self::Current)
    }
}

/// Determines the current status of the bundle.
///
/// The bundle is stale when the stored source hash differs from the current one (files
/// added, removed or renamed, or content settings changed) or when any content file is
/// newer than the bundle.
pub fn detect_bundle_status(config: &Config) -> BundleStatus {
    let Some(bundle_path) = config.bundle_path() else {
        return BundleStatus::Missing;
    };
    let Ok(bundle_mtime) = fs::metadata(&bundle_path).and_then(|m| m.modified()) else {
        return BundleStatus::Missing;
    };

    let Some(root) = config.content.root.as_deref() else {
        return BundleStatus::Current;
    };
    let Ok(patterns) = config.compile_patterns() else {
        return BundleStatus::Stale;
    };

    let files = discover_files(root, &patterns);
    let current_hash = compute_source_hash(config, &files);
    if read_source_hash(&bundle_path).as_deref() != Some(current_hash.as_str()) {
        return BundleStatus::Stale;
    }

    if files.iter().any(|f| newer_than(f.mtime, bundle_mtime)) {
        return BundleStatus::Stale;
    }

    BundleStatus::Current
}

/// Returns true if `a` is strictly later than `b`.
fn newer_than(a: SystemTime, b: SystemTime) -> bool {
    a.duration_since(b).is_ok_and(|d| !d.is_zero())
}

#[cfg(test)]
mod test {
    use std::{
        fs::File,
        path::Path,
        time::{Duration, SystemTime},
    };

    use tempfile::TempDir;

    use super::*;
    use crate::{Indexer, SilentReporter};

    fn setup(temp: &TempDir) -> Config {
        let content = temp.path().join("knowledge");
        fs::create_dir_all(content.join("swe")).unwrap();
        fs::write(content.join("swe/foo.md"), "# Foo").unwrap();

        let mut config = Config {
            config_root: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        config.content.root = Some(content);
        config
    }

    fn build(config: &Config) {
        let indexer = Indexer::new(config).unwrap();
        let output = indexer.build(&mut SilentReporter).unwrap();
        indexer.write(&output).unwrap();
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn status_description() {
        assert_eq!(BundleStatus::Current.description(), "current");
        assert_eq!(BundleStatus::Stale.description(), "stale");
        assert_eq!(BundleStatus::Missing.description(), "missing");
        assert!(!BundleStatus::Current.needs_rebuild());
        assert!(BundleStatus::Stale.needs_rebuild());
        assert!(BundleStatus::Missing.needs_rebuild());
    }

    #[test]
    fn missing_without_config_root() {
        assert_eq!(detect_bundle_status(&Config::default()), BundleStatus::Missing);
    }

    #[test]
    fn missing_before_first_build() {
        let temp = TempDir::new().unwrap();
        let config = setup(&temp);
        assert_eq!(detect_bundle_status(&config), BundleStatus::Missing);
    }

    #[test]
    fn current_after_build() {
        let temp = TempDir::new().unwrap();
        let config = setup(&temp);
        build(&config);
        assert_eq!(detect_bundle_status(&config), BundleStatus::Current);
    }

    #[test]
    fn stale_when_file_added() {
        let temp = TempDir::new().unwrap();
        let config = setup(&temp);
        build(&config);

        let root = config.content.root.clone().unwrap();
        fs::write(root.join("swe/bar.md"), "# Bar").unwrap();
        assert_eq!(detect_bundle_status(&config), BundleStatus::Stale);
    }

    #[test]
    fn stale_when_file_removed() {
        let temp = TempDir::new().unwrap();
        let config = setup(&temp);
        let root = config.content.root.clone().unwrap();
        fs::write(root.join("swe/bar.md"), "# Bar").unwrap();
        build(&config);

        fs::remove_file(root.join("swe/bar.md")).unwrap();
        assert_eq!(detect_bundle_status(&config), BundleStatus::Stale);
    }

    #[test]
    fn stale_when_file_modified_after_build() {
        let temp = TempDir::new().unwrap();
        let config = setup(&temp);
        build(&config);

        let bundle_path = config.bundle_path().unwrap();
        let file = config.content.root.clone().unwrap().join("swe/foo.md");
        let built = SystemTime::now() - Duration::from_secs(3600);
        set_mtime(&bundle_path, built);
        set_mtime(&file, built - Duration::from_secs(60));
        assert_eq!(detect_bundle_status(&config), BundleStatus::Current);

        set_mtime(&file, built + Duration::from_secs(60));
        assert_eq!(detect_bundle_status(&config), BundleStatus::Stale);
    }

    #[test]
    fn stale_when_settings_change() {
        let temp = TempDir::new().unwrap();
        let mut config = setup(&temp);
        build(&config);

        config.content.index_files = vec!["index".to_string()];
        assert_eq!(detect_bundle_status(&config), BundleStatus::Stale);
    }
}
