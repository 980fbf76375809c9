//! Structured-data formats a configuration file may be written in.
//!
//! Each format has its own decode function. All of them land on the same
//! private wire representation, which is then normalised into a
//! [`ConfigDocument`].

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::Deserialize;

use crate::command_definitions::{CommandSpec, ConfigDocument};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Maps a (case-insensitive) file extension to its format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Detects the format of `path` from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] naming the extension when it is
    /// missing or not one of the recognised ones.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::from_extension(&extension).ok_or(Error::UnsupportedFormat(extension))
    }

    /// Decodes `contents` into a document. `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] with the parser diagnostic on failure.
    pub fn decode(self, contents: &str, path: &str) -> Result<ConfigDocument> {
        let raw = match self {
            Self::Json => decode_json(contents, path)?,
            Self::Yaml => decode_yaml(contents, path)?,
            Self::Toml => decode_toml(contents, path)?,
        };

        Ok(raw.into())
    }
}

impl Display for ConfigFormat {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        })
    }
}

/// Returns true if a file name has a supported configuration extension.
pub fn is_config_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ConfigFormat::from_extension)
        .is_some()
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct RawCommand {
    name: Option<String>,
    description: Option<String>,
    command: Option<String>,
    args: Option<Vec<String>>,
    env: Option<HashMap<String, String>>,
    #[serde(rename = "workDir")]
    work_dir: Option<String>,
    show: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct RawDocument {
    name: Option<String>,
    description: Option<String>,
    show: Option<bool>,
    commands: Option<Vec<RawCommand>>,
}

fn decode_json(contents: &str, path: &str) -> Result<RawDocument> {
    serde_json::from_str(contents).map_err(|e| Error::malformed(path.to_string(), e))
}

fn decode_yaml(contents: &str, path: &str) -> Result<RawDocument> {
    // An empty YAML document decodes to null rather than to an empty mapping
    if contents.trim().is_empty() {
        return Ok(RawDocument::default());
    }

    serde_yaml::from_str(contents).map_err(|e| Error::malformed(path.to_string(), e))
}

fn decode_toml(contents: &str, path: &str) -> Result<RawDocument> {
    toml::from_str(contents).map_err(|e| Error::malformed(path.to_string(), e))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<RawCommand> for CommandSpec {
    fn from(raw: RawCommand) -> Self {
        Self {
            name: raw.name.unwrap_or_default(),
            description: non_empty(raw.description),
            command: raw.command.unwrap_or_default(),
            args: raw.args.unwrap_or_default(),
            env: raw.env.unwrap_or_default(),
            work_dir: non_empty(raw.work_dir),
            show: raw.show,
        }
    }
}

impl From<RawDocument> for ConfigDocument {
    fn from(raw: RawDocument) -> Self {
        Self {
            name: raw.name.unwrap_or_default(),
            description: non_empty(raw.description),
            show_by_default: raw.show,
            commands: raw
                .commands
                .unwrap_or_default()
                .into_iter()
                .map(CommandSpec::from)
                .collect(),
        }
    }
}
