//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate.

use clap::Parser;

/// Command-line arguments for the seli launcher.
///
/// Without a file, an interactive browser over the configuration root is
/// opened. With a file, its commands are listed; with a file and a command,
/// that command runs directly.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use seli_cli::cli_args::Args;
///
/// let args = Args::parse_from(["seli", "development.json", "build"]);
/// assert_eq!(args.command.as_deref(), Some("build"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Root directory holding configuration files.
    ///
    /// If not provided, defaults to `~/.seli`.
    #[arg(long, short = 'c')]
    pub config_dir: Option<String>,

    /// Print the directory listing or the commands of a file instead of opening the UI.
    #[arg(long, short = 'l', action)]
    pub list: bool,

    /// Perform a dry run, which just prints out the command but does not execute it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Configuration file to open, relative to the configuration root or absolute.
    pub file: Option<String>,

    /// The command name or 0-based index to run from the file.
    pub command: Option<String>,
}
