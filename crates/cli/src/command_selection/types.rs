//! Type definitions for list selection and UI state.
//!
//! This module defines the types shared by the selection interface: user
//! choices, list items, and UI state.

use std::fmt::{Display, Formatter};

use seli_core::browse::DirectoryEntry;
use seli_core::command_definitions::CommandSpec;

/// Represents what the user did in a selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Position of the chosen item in the full (unfiltered) list
    Select(usize),
    Back,
    Quit,
}

/// Direction to cycle through items in the selection UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// One row of a selection list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItem {
    pub title: String,
    pub description: String,
}

impl ListItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl Display for ListItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            f.write_str(&self.title)
        } else {
            write!(f, "{} - {}", self.title, self.description)
        }
    }
}

impl From<&DirectoryEntry> for ListItem {
    fn from(entry: &DirectoryEntry) -> Self {
        Self::new(entry.title(), entry.description())
    }
}

impl From<&CommandSpec> for ListItem {
    fn from(command: &CommandSpec) -> Self {
        Self::new(command.name.clone(), command.display_description())
    }
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the list when there are more items than
/// can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for the selection interface.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Currently selected row among the displayed items
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Whether the user is currently filtering/searching
    pub is_filtering: bool,
    /// Current filter/search text
    pub filter_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use seli_core::browse::EntryKind;

    #[test]
    fn test_list_item_from_command_uses_description_fallback() {
        let command = CommandSpec {
            name: "Status".to_string(),
            command: "git status".to_string(),
            ..Default::default()
        };
        let item = ListItem::from(&command);
        assert_eq!(item.title, "Status");
        assert_eq!(item.description, "git status");
        assert_eq!(format!("{item}"), "Status - git status");
    }

    #[test]
    fn test_list_item_from_directory_entry() {
        let entry = DirectoryEntry {
            name: "work".to_string(),
            kind: EntryKind::Directory,
        };
        assert_eq!(ListItem::from(&entry), ListItem::new("work/", "Directory"));
    }

    #[test]
    fn test_list_item_without_description() {
        assert_eq!(format!("{}", ListItem::new("..", "")), "..");
    }

    #[test]
    fn test_ui_state_equality() {
        let viewport = ViewportState {
            offset: 0,
            height: 10,
            width: 80,
        };

        let ui_state1 = UiState {
            selected_index: 0,
            viewport: viewport.clone(),
            is_filtering: false,
            filter_text: String::new(),
        };

        let mut ui_state2 = ui_state1.clone();
        assert_eq!(ui_state1, ui_state2);

        ui_state2.selected_index = 1;
        assert_ne!(ui_state1, ui_state2);
    }
}
