//! Implementation of `kb status`.

use std::process::ExitCode;

use kb_config::{ConfigWarning, discover_config_files, format_path_for_display};
use kb_index::detect_bundle_status;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the content root, bundle status and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = &ctx.cwd;

    let config_files = discover_config_files(cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("kb init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        println!("   {}", format_path_for_display(path, Some(cwd)));
    }
    println!();

    let config = &ctx.config;

    println!("{}", subheader("Content:"));
    match &config.content.root {
        Some(root) => {
            let display_path = format_path_for_display(root, config.config_root.as_deref());
            if root.is_dir() {
                println!("   {display_path}");
            } else {
                println!("   {display_path} {}", warning("[missing]"));
            }
            for pattern in &config.content.include {
                println!("      + {pattern}");
            }
            for pattern in &config.content.exclude {
                println!("      - {pattern}");
            }
        }
        None => println!("   {}", dim("(none configured)")),
    }
    println!();

    let status = detect_bundle_status(config);
    print!("{}\n   {}", subheader("Bundle:"), status.description());
    match config.bundle_path() {
        Some(path) => println!(
            " {}",
            dim(&format!("({})", format_path_for_display(&path, Some(cwd))))
        ),
        None => println!(),
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        let hint = match w {
            ConfigWarning::NoContentRoot => "add a [content] section with a path to .kb.toml",
            ConfigWarning::ContentRootMissing { .. }
            | ConfigWarning::ContentRootNotDirectory { .. } => {
                "point [content] path at an existing directory"
            }
            ConfigWarning::IncludePatternMatchesNothing { .. } => {
                "check the include patterns against the content root"
            }
        };
        println!("{}", dim(&format!("Hint: {hint}")));
    }
}
