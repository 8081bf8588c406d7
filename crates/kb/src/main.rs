//! kb: a browsable, searchable personal knowledge corpus.
//!
//! `kb build` compiles a directory of markdown and text notes into a single JSON bundle.
//! The other commands route, list, search and browse that bundle from the terminal.

mod cli;

use std::{io, process::ExitCode};

use tracing_subscriber::EnvFilter;

use crate::cli::{args::parse_cli, commands, context::CommandContext};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "KB_LOG";

/// Installs the stderr log subscriber, filtered by `KB_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("warning: could not install log subscriber: {e}");
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = parse_cli();

    let ctx = if cli.command.needs_config() {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };
    let mut ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx)
}
