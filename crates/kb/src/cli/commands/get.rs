//! Implementation of `kb get`.

use std::process::ExitCode;

use kb_runtime::{Event, Screen, Session};

use crate::cli::{
    args::GetCommand,
    context::CommandContext,
    output::{TerminalRenderer, print_json, print_screen},
};

/// Routes a fragment the way a link would and prints the resulting view.
///
/// Unknown fragments show Home rather than failing.
pub fn run(ctx: &mut CommandContext, cmd: &GetCommand) -> ExitCode {
    let settings = ctx.config.search;
    let bundle = match ctx.bundle() {
        Ok(bundle) => bundle,
        Err(code) => return code,
    };

    let mut session = Session::new(bundle, settings);
    session.dispatch(Event::Fragment(cmd.fragment.clone()));

    let screen = session.screen(&TerminalRenderer::new(cmd.raw));
    if cmd.json {
        return match &screen {
            Screen::Article { document, .. } => print_json(document),
            Screen::Home | Screen::Search { .. } => print_json(&bundle.nav_tree()),
        };
    }

    print_screen(bundle, &screen);
    ExitCode::SUCCESS
}
