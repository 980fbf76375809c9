//! Listing the configuration directory tree.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::formats::is_config_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    ConfigFile,
}

/// A sub-directory or configuration file inside a browsed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    #[must_use]
    pub fn title(&self) -> String {
        match self.kind {
            EntryKind::Directory => format!("{}/", self.name),
            EntryKind::ConfigFile => self.name.clone(),
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self.kind {
            EntryKind::Directory => "Directory",
            EntryKind::ConfigFile => "Config file",
        }
    }
}

impl Display for DirectoryEntry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} - {}", self.title(), self.description())
    }
}

/// Lists the directories and configuration files of `dir`.
///
/// Directories come first, then files, each sorted by name. Hidden entries
/// and files with unsupported extensions are left out.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_directory(dir: &Path) -> Result<Vec<DirectoryEntry>> {
    let io_error = |e: std::io::Error| Error::io_error("config directory", dir.display().to_string(), e);

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let name = entry.file_name().to_string_lossy().to_string();

        if name.starts_with('.') {
            continue;
        }

        // Follows symlinks, so a linked directory browses like a real one
        let kind = if entry.path().is_dir() {
            EntryKind::Directory
        } else if is_config_file(&name) {
            EntryKind::ConfigFile
        } else {
            continue;
        };

        entries.push(DirectoryEntry { name, kind });
    }

    entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}

/// The configuration file to open directly, when it is the only entry.
#[must_use]
pub fn single_config_file(entries: &[DirectoryEntry]) -> Option<&DirectoryEntry> {
    match entries {
        [only] if only.kind == EntryKind::ConfigFile => Some(only),
        _ => None,
    }
}
