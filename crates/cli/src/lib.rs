//! Seli CLI Library
//!
//! This crate provides the command-line front end for seli: an interactive
//! browser over the configuration root, the command list of a file, and
//! direct execution of a command by name or index.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`browser`]: Navigation state for directories and opened files
//! - [`command_selection`]: Terminal UI for picking an item from a list
//!
//! # Examples
//!
//! The CLI binary (`seli`) can be used in several ways:
//!
//! ```bash
//! # Browse ~/.seli interactively
//! seli
//!
//! # Pick a command from one file
//! seli development.json
//!
//! # Run a command by name or 0-based index
//! seli development.json build
//! seli work/docker.toml 0
//!
//! # Print instead of opening the UI
//! seli --list
//! seli --list development.json
//!
//! # Dry run (don't execute, just show what would run)
//! seli --dry-run development.json build
//! ```

pub mod browser;
pub mod cli_args;
pub mod command_selection;
