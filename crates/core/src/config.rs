//! Configuration path utilities for seli.
//!
//! This module resolves the configuration root directory and expands `~`
//! in paths.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};

/// Default root directory holding configuration files
const DEFAULT_CONFIG_DIR: &str = "~/.seli";

/// Resolves the configuration root directory.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// `~/.seli`. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use seli_core::config::get_config_dir;
///
/// let default_dir = get_config_dir(None);
/// let custom_dir = get_config_dir(Some("/path/to/configs"));
/// ```
pub fn get_config_dir(config_dir_arg: Option<&str>) -> PathBuf {
    let config_dir = config_dir_arg.unwrap_or(DEFAULT_CONFIG_DIR);
    PathBuf::from(shellexpand::tilde(config_dir).to_string())
}

/// Creates the configuration root (and its parents) if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if config_dir.is_dir() {
        return Ok(());
    }

    info!("Creating config directory `{}`", config_dir.display());
    fs::create_dir_all(config_dir)
        .map_err(|e| Error::io_error("config directory", config_dir.display().to_string(), e))
}

/// Expands `~` in a working directory.
///
/// Returns None if no working directory is provided.
///
/// # Examples
///
/// ```
/// use seli_core::config::expand_working_directory;
///
/// let expanded = expand_working_directory(Some("~/projects"));
/// assert!(expanded.is_some());
///
/// assert!(expand_working_directory(None).is_none());
/// ```
pub fn expand_working_directory(working_directory: Option<&str>) -> Option<String> {
    working_directory
        .filter(|dir| !dir.is_empty())
        .map(|dir| shellexpand::tilde(dir).to_string())
}

/// Resolves a user-supplied configuration file path against the configuration root.
///
/// Absolute paths (after `~` expansion) are used as they are.
pub fn resolve_config_file(config_dir: &Path, file: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(file).to_string());
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}
