//! Implementation of `kb ls`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use kb_index::walk;
use kb_runtime::{SessionState, navigator};

use crate::cli::{
    args::LsCommand,
    context::CommandContext,
    output::{dim, print_nav_rows},
};

/// Prints the navigation tree, or a table of every document with `--long`.
pub fn run(ctx: &mut CommandContext, cmd: &LsCommand) -> ExitCode {
    let bundle = match ctx.bundle() {
        Ok(bundle) => bundle,
        Err(code) => return code,
    };

    if bundle.is_empty() {
        println!("{}", dim("No documents."));
        return ExitCode::SUCCESS;
    }

    if cmd.long {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Id", "Title", "Source"]);
        for doc in bundle.documents().values() {
            table.add_row(vec![
                Cell::new(doc.id.as_str()),
                Cell::new(&doc.title),
                Cell::new(&doc.source),
            ]);
        }
        println!("{table}");
        return ExitCode::SUCCESS;
    }

    let mut state = SessionState::new(bundle);
    if cmd.all {
        state.expanded_groups.extend(
            walk(bundle.nav_tree())
                .filter(|node| !node.is_leaf())
                .map(|node| node.id().to_string()),
        );
    }
    print_nav_rows(&navigator::render(bundle.nav_tree(), &state));

    ExitCode::SUCCESS
}
