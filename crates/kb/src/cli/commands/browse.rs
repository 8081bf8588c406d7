//! Implementation of `kb browse`.
//!
//! A line-driven session: each input line becomes one event, and the resulting view is
//! printed after it runs.

use std::{
    io::{self, BufRead},
    process::ExitCode,
};

use kb_runtime::{Event, Session};

use crate::cli::{
    args::BrowseCommand,
    context::CommandContext,
    output::{TerminalRenderer, dim, print_nav_rows, print_screen, warning},
};

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// Feed an event to the router.
    Event(Event),
    /// Expand or collapse a navigator group.
    Toggle(String),
    /// Print the navigator.
    Tree,
    /// End the session.
    Quit,
    /// Blank line.
    Nothing,
    /// Anything else.
    Unknown(String),
}

/// Parses an input line.
fn parse_line(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Nothing;
    }
    if line.starts_with('#') {
        return Input::Event(Event::Fragment(line.to_string()));
    }
    if let Some(query) = line.strip_prefix('/') {
        return Input::Event(Event::SearchInput(query.to_string()));
    }

    let (command, arg) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(c, a)| (c, a.trim()));
    match (command, arg) {
        (":q" | ":quit", _) => Input::Quit,
        (":home", _) => Input::Event(Event::OpenHome),
        (":back", _) => Input::Event(Event::Back),
        (":forward", _) => Input::Event(Event::Forward),
        (":tree", _) => Input::Tree,
        (":open", id) if !id.is_empty() => Input::Event(Event::OpenDocument(id.to_string())),
        (":toggle", group) if !group.is_empty() => Input::Toggle(group.to_string()),
        _ => Input::Unknown(line.to_string()),
    }
}

/// Runs an interactive session over stdin.
pub fn run(ctx: &mut CommandContext, cmd: &BrowseCommand) -> ExitCode {
    let settings = ctx.config.search;
    let bundle = match ctx.bundle() {
        Ok(bundle) => bundle,
        Err(code) => return code,
    };

    let renderer = TerminalRenderer::new(false);
    let mut session = Session::new(bundle, settings);
    if let Some(fragment) = &cmd.fragment {
        session.dispatch(Event::Fragment(fragment.clone()));
    }
    print_screen(bundle, &session.screen(&renderer));

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: failed to read input: {e}");
                return ExitCode::FAILURE;
            }
        };

        match parse_line(&line) {
            Input::Quit => break,
            Input::Nothing => {}
            Input::Tree => print_nav_rows(&session.nav_rows()),
            Input::Toggle(group) => {
                if session.toggle(&group) {
                    print_nav_rows(&session.nav_rows());
                } else {
                    println!("{}", warning(&format!("no such group: {group}")));
                }
            }
            Input::Event(event) => {
                let before = session.state().clone();
                session.dispatch(event);
                if *session.state() == before {
                    println!("{}", dim("(nothing to do)"));
                }
                println!();
                print_screen(bundle, &session.screen(&renderer));
            }
            Input::Unknown(text) => {
                println!("{}", warning(&format!("unknown command: {text}")));
            }
        }
    }

    ExitCode::SUCCESS
}
