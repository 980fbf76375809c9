//! Reading configuration files from disk.
//!
//! [`load_document`] decodes a file without touching any variables, and
//! [`load_config_file`] runs the full pipeline to a resolved document.

use std::fs;
use std::path::Path;

use log::debug;

use crate::command_definitions::ConfigDocument;
use crate::error::{Error, Result};
use crate::formats::ConfigFormat;
use crate::processor;

fn read_contents(file_description: &str, path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::io_error(file_description, path.display().to_string(), e))
}

/// File name without its extension, used when a document declares no name.
fn default_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Loads and decodes a configuration file without expanding any variables.
///
/// The format is chosen from the file extension. An empty `name` is replaced
/// by the file's base name.
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not a supported format
/// - The file cannot be read
/// - The contents are malformed for the detected format
pub fn load_document(path: &Path) -> Result<ConfigDocument> {
    let format = ConfigFormat::from_path(path)?;
    debug!("Loading `{}` as {}", path.display(), format);

    let contents = read_contents("config", path)?;
    let mut document = format.decode(&contents, &path.display().to_string())?;

    if document.name.is_empty() {
        document.name = default_name(path);
    }

    Ok(document)
}

/// Loads a configuration file and resolves it, ready for display and execution.
///
/// # Errors
///
/// Any failure while loading, resolving the home directory, or reading a
/// `.env` file aborts the whole load.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use seli_core::file_handling::load_config_file;
///
/// let document = load_config_file(Path::new("/home/me/.seli/development.json"))?;
/// println!("Loaded {} commands", document.commands.len());
/// # Ok::<(), seli_core::error::Error>(())
/// ```
pub fn load_config_file(path: &Path) -> Result<ConfigDocument> {
    let document = load_document(path)?;
    processor::process_document(&document, path)
}

/// Same as [`load_config_file`] with an explicit home directory.
///
/// # Errors
///
/// See [`load_config_file`].
pub fn load_config_file_within(path: &Path, home: &Path) -> Result<ConfigDocument> {
    let document = load_document(path)?;
    processor::process_document_within(&document, path, home)
}
