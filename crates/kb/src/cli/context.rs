//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use kb_config::Config;
use kb_index::{Bundle, BundleStatus, Indexer, SilentReporter, detect_bundle_status};
use tracing::info;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Bundle loaded or built for this invocation.
    bundle: Option<Bundle>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            bundle: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            bundle: None,
        })
    }

    /// Ensures a content root is configured, printing an init hint if not.
    pub fn require_content_root(&self) -> Result<(), ExitCode> {
        if self.config.content.root.is_none() {
            eprintln!("error: no content root configured");
            eprintln!("Run 'kb init --content DIR' to create a configuration file.");
            return Err(ExitCode::FAILURE);
        }
        Ok(())
    }

    /// Returns the bundle, building it first if it is missing or stale.
    pub fn bundle(&mut self) -> Result<&Bundle, ExitCode> {
        if self.bundle.is_none() {
            let bundle = ensure_bundle_fresh(&self.config)?;
            self.bundle = Some(bundle);
        }
        self.bundle.as_ref().ok_or(ExitCode::FAILURE)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Loads the bundle, rebuilding it when the status check says so.
fn ensure_bundle_fresh(config: &Config) -> Result<Bundle, ExitCode> {
    let status = detect_bundle_status(config);
    if status.needs_rebuild() {
        return rebuild_bundle(config, status);
    }

    let Some(path) = config.bundle_path() else {
        eprintln!("error: no configuration found");
        return Err(ExitCode::FAILURE);
    };
    Bundle::load(&path).map_err(|e| {
        eprintln!("error: failed to load bundle {}: {e}", path.display());
        ExitCode::FAILURE
    })
}

/// Builds and writes a fresh bundle.
fn rebuild_bundle(config: &Config, status: BundleStatus) -> Result<Bundle, ExitCode> {
    if config.content.root.is_none() {
        eprintln!("error: no content root configured");
        eprintln!("Run 'kb init --content DIR' to create a configuration file.");
        return Err(ExitCode::FAILURE);
    }
    if matches!(status, BundleStatus::Missing) {
        eprintln!("Bundle missing, building...");
    }
    info!(status = status.description(), "rebuilding bundle");

    let indexer = Indexer::new(config).map_err(|e| {
        eprintln!("error: failed to initialize indexer: {e}");
        ExitCode::FAILURE
    })?;
    let output = indexer.build(&mut SilentReporter).map_err(|e| {
        eprintln!("error: build failed: {e}");
        ExitCode::FAILURE
    })?;
    indexer.write(&output).map_err(|e| {
        eprintln!("error: failed to write bundle: {e}");
        ExitCode::FAILURE
    })?;
    Ok(output.bundle)
}
