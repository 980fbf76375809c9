//! Layered `.env` file resolution.
//!
//! Variables are read from `<dir>/.env` and then from the `.env` of every
//! parent directory up to, but not including, the user's home directory.
//! The closest file wins: a name already set by a more specific directory is
//! never overwritten by a parent.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

pub const ENV_FILE_NAME: &str = ".env";

/// Parses the contents of a dotenv file.
///
/// Blank lines, `#` comments and lines without `=` are skipped. The first
/// `=` separates key and value, both trimmed. A value wrapped in a matching
/// pair of double or single quotes has that pair removed. Later duplicates
/// overwrite earlier ones.
pub fn parse_env_contents(contents: &str) -> HashMap<String, String> {
    let mut variables = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        variables.insert(key.trim().to_string(), strip_quotes(value.trim()).to_string());
    }

    variables
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }

    value
}

/// Reads and parses a single dotenv file.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file exists but cannot be read.
pub fn read_env_file(path: &Path) -> Result<Option<HashMap<String, String>>> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!("Read environment file `{}`", path.display());
            // Invalid UTF-8 is replaced, not rejected
            Ok(Some(parse_env_contents(&String::from_utf8_lossy(&bytes))))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io_error(
            "environment",
            path.display().to_string(),
            e,
        )),
    }
}

/// Resolves the user's home directory.
///
/// # Errors
///
/// Returns [`Error::HomeResolution`] when it cannot be determined.
pub fn home_directory() -> Result<PathBuf> {
    require_home(dirs::home_dir())
}

/// Turns a home directory lookup result into an error when it came back empty.
///
/// # Errors
///
/// Returns [`Error::HomeResolution`] for `None`.
pub fn require_home(home: Option<PathBuf>) -> Result<PathBuf> {
    home.ok_or(Error::HomeResolution)
}

/// Merges the layered `.env` files for `start_dir`, stopping below the home directory.
///
/// # Errors
///
/// Fails with [`Error::HomeResolution`] when the home directory is unknown,
/// or with [`Error::Io`] when a present `.env` file cannot be read.
pub fn load_layered_env(start_dir: &Path) -> Result<HashMap<String, String>> {
    let home = home_directory()?;
    load_layered_env_within(start_dir, &home)
}

/// Same as [`load_layered_env`] with an explicit home directory.
///
/// `<start_dir>/.env` is always read. The upward walk then reads every parent
/// until it reaches `home` (which is not read) or the filesystem root. When
/// `start_dir` is `home` itself there is no walk.
///
/// # Errors
///
/// Returns [`Error::Io`] when a present `.env` file cannot be read.
pub fn load_layered_env_within(start_dir: &Path, home: &Path) -> Result<HashMap<String, String>> {
    let mut variables = HashMap::new();

    merge_missing(&mut variables, read_env_file(&start_dir.join(ENV_FILE_NAME))?);

    let mut current = if start_dir == home {
        None
    } else {
        start_dir.parent()
    };
    while let Some(dir) = current {
        if dir == home {
            break;
        }

        merge_missing(&mut variables, read_env_file(&dir.join(ENV_FILE_NAME))?);
        current = dir.parent();
    }

    debug!(
        "Resolved {} variable(s) from environment files for `{}`",
        variables.len(),
        start_dir.display()
    );

    Ok(variables)
}

fn merge_missing(variables: &mut HashMap<String, String>, layer: Option<HashMap<String, String>>) {
    let Some(layer) = layer else {
        return;
    };

    for (key, value) in layer {
        variables.entry(key).or_insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_env(dir: &Path, contents: &str) {
        fs::write(dir.join(ENV_FILE_NAME), contents).unwrap();
    }

    #[test]
    fn test_require_home() {
        assert!(matches!(require_home(None), Err(Error::HomeResolution)));
        assert_eq!(
            require_home(Some(PathBuf::from("/home/me"))).unwrap(),
            PathBuf::from("/home/me")
        );
    }

    #[test]
    fn test_non_utf8_env_file_is_tolerated() {
        let home = TempDir::new().unwrap();
        let dir = home.path().join("proj");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(ENV_FILE_NAME), b"# caf\xE9\nKEY=value\n").unwrap();

        let variables = load_layered_env_within(&dir, home.path()).unwrap();
        assert_eq!(variables.len(), 1);
        assert_eq!(variables.get("KEY"), Some(&"value".to_string()));
    }

    #[test]
    fn test_parse_basic_pairs() {
        let variables = parse_env_contents("BASIC_VAR=basic_value\n  SPACED = padded  \n");
        assert_eq!(variables.get("BASIC_VAR"), Some(&"basic_value".to_string()));
        assert_eq!(variables.get("SPACED"), Some(&"padded".to_string()));
    }

    #[test]
    fn test_parse_strips_matching_quotes() {
        let variables = parse_env_contents(
            "COMPLEX_VAR=\"value with spaces\"\nQUOTED_VAR='single quoted'\nMIXED=\"half'\n",
        );
        assert_eq!(variables.get("COMPLEX_VAR"), Some(&"value with spaces".to_string()));
        assert_eq!(variables.get("QUOTED_VAR"), Some(&"single quoted".to_string()));
        assert_eq!(variables.get("MIXED"), Some(&"\"half'".to_string()));
    }

    #[test]
    fn test_parse_single_quote_character_is_kept() {
        let variables = parse_env_contents("LONE=\"\n");
        assert_eq!(variables.get("LONE"), Some(&"\"".to_string()));
    }

    #[test]
    fn test_parse_skips_comments_blank_and_invalid_lines() {
        let variables = parse_env_contents("# comment\n\n   \nNOT A PAIR\nKEY=value\n");
        assert_eq!(variables.len(), 1);
        assert_eq!(variables.get("KEY"), Some(&"value".to_string()));
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let variables = parse_env_contents("URL=postgres://host/db?sslmode=require\nEMPTY=\n");
        assert_eq!(
            variables.get("URL"),
            Some(&"postgres://host/db?sslmode=require".to_string())
        );
        assert_eq!(variables.get("EMPTY"), Some(&String::new()));
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let variables = parse_env_contents("KEY=first\nKEY=second\n");
        assert_eq!(variables.get("KEY"), Some(&"second".to_string()));
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let result = read_env_file(&dir.path().join(ENV_FILE_NAME)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_unreadable_env_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        // A directory named `.env` exists but cannot be read as a file
        fs::create_dir(dir.path().join(ENV_FILE_NAME)).unwrap();

        let result = load_layered_env_within(dir.path(), dir.path());
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_closest_directory_wins() {
        let home = TempDir::new().unwrap();
        let parent = home.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();

        write_env(&parent, "K=parent\nPARENT_ONLY=from_parent\n");
        write_env(&child, "K=child\n");

        let variables = load_layered_env_within(&child, home.path()).unwrap();
        assert_eq!(variables.get("K"), Some(&"child".to_string()));
        assert_eq!(variables.get("PARENT_ONLY"), Some(&"from_parent".to_string()));
    }

    #[test]
    fn test_home_env_file_is_not_read() {
        let home = TempDir::new().unwrap();
        let config_dir = home.path().join(".seli");
        fs::create_dir_all(&config_dir).unwrap();

        write_env(home.path(), "HOME_ONLY=leaked\nK=home\n");
        write_env(&config_dir, "K=config\n");

        let variables = load_layered_env_within(&config_dir, home.path()).unwrap();
        assert_eq!(variables.get("K"), Some(&"config".to_string()));
        assert!(!variables.contains_key("HOME_ONLY"));
    }

    #[test]
    fn test_no_walk_from_home_itself() {
        let root = TempDir::new().unwrap();
        let home = root.path().join("home");
        fs::create_dir_all(&home).unwrap();

        write_env(root.path(), "ABOVE_HOME=leaked\n");
        write_env(&home, "AT_HOME=yes\n");

        let variables = load_layered_env_within(&home, &home).unwrap();
        assert_eq!(variables.get("AT_HOME"), Some(&"yes".to_string()));
        assert!(!variables.contains_key("ABOVE_HOME"));
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let home = TempDir::new().unwrap();
        let deep = home.path().join("a").join("b").join("c");
        fs::create_dir_all(&deep).unwrap();
        write_env(&home.path().join("a"), "FROM_A=yes\n");

        let variables = load_layered_env_within(&deep, home.path()).unwrap();
        assert_eq!(variables.len(), 1);
        assert_eq!(variables.get("FROM_A"), Some(&"yes".to_string()));
    }
}
