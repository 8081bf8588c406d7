//! Implementation of `kb search`.

use std::process::ExitCode;

use kb_runtime::SearchEngine;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{print_hits, print_hits_json},
};

/// Searches the bundle and prints the hits, best first.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let mut settings = ctx.config.search;
    if let Some(limit) = cmd.limit {
        settings.limit = limit;
    }

    let bundle = match ctx.bundle() {
        Ok(bundle) => bundle,
        Err(code) => return code,
    };

    let query = cmd.query.join(" ");
    let hits = match SearchEngine::with_settings(bundle, settings).search(&query) {
        Ok(hits) => hits,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_hits_json(query.trim(), &hits);
    }
    print_hits(query.trim(), &hits);
    ExitCode::SUCCESS
}
