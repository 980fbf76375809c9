//! Turns a freshly decoded [`ConfigDocument`] into a resolved one.
//!
//! The global variable set is the layered `.env` files of the document's
//! directory, with the process environment filling in names they leave
//! unset. Every command is then resolved on its own:
//!
//! 1. its `env` values are expanded against the global variables only,
//! 2. those expanded entries are laid over the globals (command entries win),
//! 3. `command`, `args` and `workDir` are expanded against that overlay,
//! 4. the command keeps the step 1 values as its `env`.
//!
//! The input document is never modified.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use log::debug;

use crate::command_definitions::{CommandSpec, ConfigDocument};
use crate::dotenv;
use crate::error::{Error, Result};
use crate::interpolation::expand;

/// Adds `pairs` to `variables` as the lowest precedence layer.
pub fn layer_environment<I>(variables: &mut HashMap<String, String>, pairs: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in pairs {
        variables.entry(key).or_insert(value);
    }
}

/// Builds the global variable set for a configuration file's directory.
///
/// # Errors
///
/// Propagates home resolution and `.env` read failures.
pub fn global_variables_within(config_dir: &Path, home: &Path) -> Result<HashMap<String, String>> {
    let mut variables = dotenv::load_layered_env_within(config_dir, home)?;
    // Non-unicode entries are skipped
    layer_environment(
        &mut variables,
        env::vars_os().filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
    );
    Ok(variables)
}

/// Resolves `document`, loaded from `path`.
///
/// # Errors
///
/// Fails as a whole when the home directory cannot be determined or a
/// present `.env` file cannot be read.
pub fn process_document(document: &ConfigDocument, path: &Path) -> Result<ConfigDocument> {
    process_document_with_home(document, path, dirs::home_dir())
}

fn process_document_with_home(
    document: &ConfigDocument,
    path: &Path,
    home: Option<PathBuf>,
) -> Result<ConfigDocument> {
    let home = dotenv::require_home(home)?;
    process_document_within(document, path, &home)
}

/// Same as [`process_document`] with an explicit home directory.
///
/// # Errors
///
/// Fails as a whole when a present `.env` file cannot be read.
pub fn process_document_within(
    document: &ConfigDocument,
    path: &Path,
    home: &Path,
) -> Result<ConfigDocument> {
    let config_dir = containing_directory(path)?;
    let globals = global_variables_within(&config_dir, home)?;
    debug!(
        "Resolving `{}` with {} global variable(s)",
        path.display(),
        globals.len()
    );

    Ok(resolve_document(document, &globals))
}

/// Resolves every command of `document` against `globals`.
pub fn resolve_document(document: &ConfigDocument, globals: &HashMap<String, String>) -> ConfigDocument {
    ConfigDocument {
        name: document.name.clone(),
        description: document.description.clone(),
        show_by_default: document.show_by_default,
        commands: document
            .commands
            .iter()
            .map(|command| resolve_command(command, globals))
            .collect(),
    }
}

/// Resolves one command against `globals`.
pub fn resolve_command(command: &CommandSpec, globals: &HashMap<String, String>) -> CommandSpec {
    let env: HashMap<String, String> = command
        .env
        .iter()
        .map(|(key, value)| (key.clone(), expand(value, globals)))
        .collect();

    let mut scoped = globals.clone();
    scoped.extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));

    CommandSpec {
        name: command.name.clone(),
        description: command.description.clone(),
        command: expand(&command.command, &scoped),
        args: command.args.iter().map(|arg| expand(arg, &scoped)).collect(),
        env,
        work_dir: command.work_dir.as_ref().map(|dir| expand(dir, &scoped)),
        show: command.show,
    }
}

fn containing_directory(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .map_err(|e| Error::io_error("config", path.display().to_string(), e))?;

    Ok(absolute
        .parent()
        .map_or_else(|| absolute.clone(), Path::to_path_buf))
}
