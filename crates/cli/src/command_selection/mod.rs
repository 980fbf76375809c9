//! Interactive list selection.
//!
//! This module provides the terminal-based picker used for both directory
//! listings and the commands of a configuration file.
//!
//! # User Interface
//!
//! The interface supports:
//! - Up/Down arrows or the mouse wheel to move, wrapping at both ends
//! - Enter to select the highlighted item
//! - '/' to start fuzzy filtering, Esc to stop
//! - Esc or Backspace to go back
//! - 'q' or Ctrl-C to quit

pub mod types;
pub mod ui;

pub use types::{Choice, ListItem};
pub use ui::{prompt_for_choice, TerminalGuard};

/// Character used to quit the selection UI
pub const QUIT_OPTION: char = 'q';
