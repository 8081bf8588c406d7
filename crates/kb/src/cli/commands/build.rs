//! Implementation of `kb build`.

use std::{path::Path, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use kb_config::format_path_for_display;
use kb_document::TitleSource;
use kb_index::{BuildStats, Indexer, ProgressReporter};

use crate::cli::{
    args::BuildCommand,
    context::CommandContext,
    output::{dim, subheader, success, warning},
};

/// Prints skipped files as they happen and a summary at the end.
struct TerminalReporter<'a> {
    /// Base for relative path display.
    root: &'a Path,
}

impl ProgressReporter for TerminalReporter<'_> {
    fn on_document(&mut self, _path: &Path, _title_source: TitleSource) {}

    fn on_error(&mut self, path: &Path, error: &str) {
        let path = format_path_for_display(path, Some(self.root));
        eprintln!("{} {path}: {error}", warning("skipped"));
    }

    fn on_complete(&mut self, stats: &BuildStats) {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Documents", "Derived titles", "Skipped"]);
        table.add_row(vec![
            Cell::new(stats.documents),
            Cell::new(stats.derived_titles),
            Cell::new(stats.skipped),
        ]);
        println!("{table}");
    }
}

/// Builds the bundle from the content root and writes it to disk.
pub fn run(ctx: &CommandContext, cmd: &BuildCommand) -> ExitCode {
    if let Err(code) = ctx.require_content_root() {
        return code;
    }
    let config = &ctx.config;

    let indexer = match Indexer::new(config) {
        Ok(indexer) => indexer,
        Err(e) => {
            eprintln!("error: failed to initialize indexer: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} {}",
        subheader("Building from"),
        format_path_for_display(indexer.content_root(), Some(&ctx.cwd))
    );

    let mut reporter = TerminalReporter {
        root: indexer.content_root(),
    };
    let output = match indexer.build(&mut reporter) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: build failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let bundle_path = match indexer.write(&output) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("error: failed to write bundle: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "{} {}",
        success("Wrote"),
        format_path_for_display(&bundle_path, Some(&ctx.cwd))
    );

    if cmd.index_md {
        match indexer.write_markdown_index(&output.bundle) {
            Ok(path) => println!(
                "{} {}",
                success("Wrote"),
                format_path_for_display(&path, Some(&ctx.cwd))
            ),
            Err(e) => {
                eprintln!("error: failed to write markdown index: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if !output.stats.is_success() {
        println!(
            "{}",
            dim(&format!(
                "{} file(s) skipped; run with KB_LOG=debug for details",
                output.stats.skipped
            ))
        );
    }

    ExitCode::SUCCESS
}
