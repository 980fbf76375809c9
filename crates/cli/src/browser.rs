//! Navigation state for browsing the configuration root.
//!
//! The browser shows either a directory listing or the commands of an opened
//! configuration file. It never touches the terminal, so the interactive loop
//! in `main` only renders [`Browser::items`] and feeds choices back.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use seli_core::browse::{list_directory, single_config_file, DirectoryEntry, EntryKind};
use seli_core::command_definitions::ConfigDocument;
use seli_core::error::{Error, Result};
use seli_core::file_handling::load_config_file;

use crate::command_selection::ListItem;

/// Title of the entry leading to the parent directory
pub const PARENT_ENTRY: &str = "..";

type Loader = Box<dyn Fn(&Path) -> Result<ConfigDocument>>;

/// Result of activating a list item.
#[derive(Debug, PartialEq)]
pub enum Activation {
    /// The browser moved (or reported a problem) and should be redrawn
    Stay,
    /// Run the command at this index of the resolved document
    Run(ConfigDocument, usize),
}

struct OpenedFile {
    path: PathBuf,
    document: ConfigDocument,
}

pub struct Browser {
    root: PathBuf,
    directory: PathBuf,
    entries: Vec<DirectoryEntry>,
    opened: Option<OpenedFile>,
    status: Option<String>,
    loader: Loader,
}

impl Browser {
    /// Opens the browser at `root`, loading files with [`load_config_file`].
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be listed.
    pub fn open(root: &Path) -> Result<Self> {
        Self::with_loader(root, Box::new(load_config_file))
    }

    /// Opens the browser at `root` with a custom file loader.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be listed.
    pub fn with_loader(root: &Path, loader: Loader) -> Result<Self> {
        let entries = list_directory(root)?;
        let mut browser = Self {
            root: root.to_path_buf(),
            directory: root.to_path_buf(),
            entries,
            opened: None,
            status: None,
            loader,
        };
        browser.open_single_file();
        Ok(browser)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn is_at_root(&self) -> bool {
        self.directory == self.root
    }

    /// The opened document, if a file is open.
    pub fn document(&self) -> Option<&ConfigDocument> {
        self.opened.as_ref().map(|opened| &opened.document)
    }

    pub fn title(&self) -> String {
        match &self.opened {
            Some(opened) => format!("{} [{}]", opened.document, opened.path.display()),
            None => self.directory.display().to_string(),
        }
    }

    /// Last problem to report, such as a file that failed to load.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn items(&self) -> Vec<ListItem> {
        if let Some(opened) = &self.opened {
            return opened.document.commands.iter().map(ListItem::from).collect();
        }

        let parent = (!self.is_at_root()).then(|| ListItem::new(PARENT_ENTRY, ""));
        parent
            .into_iter()
            .chain(self.entries.iter().map(ListItem::from))
            .collect()
    }

    /// Acts on the item at `index` of [`Browser::items`].
    ///
    /// # Errors
    ///
    /// Returns an error if the index does not name an item.
    pub fn activate(&mut self, index: usize) -> Result<Activation> {
        if let Some(opened) = &self.opened {
            if index >= opened.document.commands.len() {
                return Err(Error::CommandIndexOutOfRange(index));
            }
            return Ok(Activation::Run(opened.document.clone(), index));
        }

        let entry_index = if self.is_at_root() {
            index
        } else if index == 0 {
            self.go_up();
            return Ok(Activation::Stay);
        } else {
            index - 1
        };

        let entry = self
            .entries
            .get(entry_index)
            .cloned()
            .ok_or(Error::CommandIndexOutOfRange(index))?;
        let path = self.directory.join(&entry.name);

        match entry.kind {
            EntryKind::Directory => {
                if self.change_directory(path) {
                    self.open_single_file();
                }
            }
            EntryKind::ConfigFile => self.open_file(path),
        }

        Ok(Activation::Stay)
    }

    /// Steps back: closes the open file, or goes up one directory.
    ///
    /// Returns false when already at the root with no file open.
    pub fn back(&mut self) -> bool {
        if self.opened.take().is_some() {
            self.status = None;
            return true;
        }

        if self.is_at_root() {
            return false;
        }

        self.go_up();
        true
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.directory.parent() {
            let parent = parent.to_path_buf();
            self.change_directory(parent);
        }
    }

    fn change_directory(&mut self, path: PathBuf) -> bool {
        match list_directory(&path) {
            Ok(entries) => {
                debug!("Browsing `{}`", path.display());
                self.directory = path;
                self.entries = entries;
                self.status = None;
                true
            }
            Err(e) => {
                warn!("{e}");
                self.status = Some(e.to_string());
                false
            }
        }
    }

    /// Opens the directory's only entry when it is a configuration file.
    fn open_single_file(&mut self) {
        if let Some(entry) = single_config_file(&self.entries) {
            let path = self.directory.join(&entry.name);
            self.open_file(path);
        }
    }

    fn open_file(&mut self, path: PathBuf) {
        match (self.loader)(&path) {
            Ok(document) => {
                debug!("Opened `{}`", path.display());
                self.status = None;
                self.opened = Some(OpenedFile { path, document });
            }
            Err(e) => {
                warn!("{e}");
                self.status = Some(e.to_string());
            }
        }
    }
}
