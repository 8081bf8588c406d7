//! Implementation of `kb config`.

use std::process::ExitCode;

use kb_config::format_path_for_display;
use kb_highlight::Highlighter;

use crate::cli::{context::CommandContext, output::dim};

/// Shows the resolved content root and the effective settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    let toml = match config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match &config.content.root {
        Some(root) => println!(
            "{}",
            dim(&format!(
                "# content root: {}",
                format_path_for_display(root, Some(&ctx.cwd))
            ))
        ),
        None => println!("{}", dim("# content root: (none)")),
    }
    print!("{}", Highlighter::new().highlight_toml(&toml));
    ExitCode::SUCCESS
}
