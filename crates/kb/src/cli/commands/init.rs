//! Implementation of `kb init`.

use std::{
    fs,
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use kb_config::{CONFIG_FILENAME, local_template};
use kb_highlight::Highlighter;

use crate::cli::{args::InitCommand, context::CommandContext, output::subheader};

/// Directory holding generated build output, relative to the config root.
const BUILD_DIR_PATTERN: &str = ".kb/";

/// Writes a `.kb.toml` configuration file into the current directory.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let config_path = ctx.cwd.join(CONFIG_FILENAME);

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = local_template(cmd.content.as_deref());
    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", config_path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    print!("{}", Highlighter::new().highlight_toml(&template));
    println!();

    if let Err(e) = update_gitignore(&config_path) {
        eprintln!("warning: could not update .gitignore: {e}");
    }

    ExitCode::SUCCESS
}

/// Adds `.kb/` to `.gitignore` if it exists and doesn't already contain it.
fn update_gitignore(config_path: &Path) -> io::Result<()> {
    let Some(parent) = config_path.parent() else {
        return Ok(());
    };

    let gitignore_path = parent.join(".gitignore");
    if !gitignore_path.exists() {
        return Ok(());
    }

    let contents = fs::read_to_string(&gitignore_path)?;
    let already_ignored = contents.lines().map(str::trim).any(|line| {
        line == BUILD_DIR_PATTERN || line == BUILD_DIR_PATTERN.trim_end_matches('/')
    });
    if already_ignored {
        return Ok(());
    }

    let mut file = fs::OpenOptions::new().append(true).open(&gitignore_path)?;
    if !contents.is_empty() && !contents.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, "{BUILD_DIR_PATTERN}")?;
    println!("Added {BUILD_DIR_PATTERN} to .gitignore");

    Ok(())
}
