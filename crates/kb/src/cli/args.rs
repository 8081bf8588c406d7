//! Clap argument definitions for the `kb` CLI.

use std::{env, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "kb")]
#[command(about = "Knowledge base - build, browse and search a corpus of notes")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `kb init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Content directory to point the new configuration at
    #[arg(long)]
    pub content: Option<String>,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `kb build`.
#[derive(Args, Debug, Clone)]
pub struct BuildCommand {
    /// Also write an INDEX.md overview into the content root
    #[arg(long)]
    pub index_md: bool,
}

/// Arguments for `kb ls`.
#[derive(Args, Debug, Clone)]
pub struct LsCommand {
    /// Show every document in a table instead of the navigation tree
    #[arg(short = 'l', long)]
    pub long: bool,

    /// Expand every group instead of only the top level
    #[arg(short = 'a', long)]
    pub all: bool,
}

/// Arguments for `kb search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Literal, case-insensitive search text
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Maximum results to return [default: 40]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `kb get`.
#[derive(Args, Debug, Clone)]
pub struct GetCommand {
    /// Document id, optionally with a leading '#'; empty or unknown shows Home
    #[arg(default_value = "")]
    pub fragment: String,

    /// Print the body without highlighting
    #[arg(long)]
    pub raw: bool,

    /// Output the document as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `kb browse`.
#[derive(Args, Debug, Clone)]
pub struct BrowseCommand {
    /// Fragment to open first
    pub fragment: Option<String>,
}

/// Supported `kb` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize kb configuration in current directory
    Init(InitCommand),

    /// Build the bundle from the content root
    Build(BuildCommand),

    /// Show status and validate configuration
    Status,

    /// Show effective configuration settings
    Config,

    /// Show the navigation tree
    Ls(LsCommand),

    /// Search titles, paths and bodies
    Search(SearchCommand),

    /// Route a fragment and print the resulting view
    Get(GetCommand),

    /// Browse the bundle interactively
    #[command(after_help = "\
COMMANDS (one per line):
  #id               Navigate to a fragment
  /text             Search; '/' alone leaves search
  :open id          Open a document
  :home             Show Home
  :back             Go back in history
  :forward          Go forward in history
  :toggle group     Expand or collapse a group
  :tree             Show the navigator
  :q                Quit")]
    Browse(BrowseCommand),
}

impl Commands {
    /// Returns false for commands that must work even with a broken configuration.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp && env::args().count() <= 2 {
                print_command_help();
                exit(0);
            }
            e.exit();
        }
    }
}

/// Prints the top-level help with one line per subcommand.
fn print_command_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: kb <COMMAND>");
    println!();
    println!("Commands:");
    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }
    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -h, --help  Print help");
    println!();
    println!("Set KB_LOG (e.g. KB_LOG=debug) to see diagnostic logs on stderr.");
}
