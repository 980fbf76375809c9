//! Integration tests for seli-core
//!
//! These tests verify that loading, `.env` resolution, expansion and
//! execution planning work together end-to-end.

use std::fs;
use std::path::{Path, PathBuf};

use seli_core::browse::{list_directory, single_config_file, EntryKind};
use seli_core::error::Error;
use seli_core::execution::ExecutionPlan;
use seli_core::file_handling::{load_config_file, load_config_file_within};
use tempfile::TempDir;

const JSON_CONFIG: &str = r#"{
  "name": "Development",
  "description": "Everyday tools",
  "show": true,
  "commands": [
    {
      "name": "Build",
      "description": "Build the project",
      "command": "cargo",
      "args": ["build", "--target-dir", "${SELI_IT_TARGET}"],
      "env": {"LOCAL_VAR": "${SELI_IT_BASIC}_local"},
      "workDir": "${SELI_IT_PROJECT}",
      "show": false
    },
    {
      "name": "Status",
      "command": "git status ${SELI_IT_FLAGS}"
    }
  ]
}"#;

const YAML_CONFIG: &str = r#"
name: Development
description: Everyday tools
show: true
commands:
  - name: Build
    description: Build the project
    command: cargo
    args: ["build", "--target-dir", "${SELI_IT_TARGET}"]
    env:
      LOCAL_VAR: "${SELI_IT_BASIC}_local"
    workDir: "${SELI_IT_PROJECT}"
    show: false
  - name: Status
    command: "git status ${SELI_IT_FLAGS}"
"#;

const TOML_CONFIG: &str = r#"
name = "Development"
description = "Everyday tools"
show = true

[[commands]]
name = "Build"
description = "Build the project"
command = "cargo"
args = ["build", "--target-dir", "${SELI_IT_TARGET}"]
workDir = "${SELI_IT_PROJECT}"
show = false

[commands.env]
LOCAL_VAR = "${SELI_IT_BASIC}_local"

[[commands]]
name = "Status"
command = "git status ${SELI_IT_FLAGS}"
"#;

struct Fixture {
    home: TempDir,
    config_dir: PathBuf,
}

impl Fixture {
    /// A fake home with `<home>/.seli/team` as the config directory.
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let config_dir = home.path().join(".seli").join("team");
        fs::create_dir_all(&config_dir).unwrap();

        Self { home, config_dir }
    }

    fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.home.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn write_config(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.config_dir.join(file_name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn home(&self) -> &Path {
        self.home.path()
    }
}

#[test]
fn test_formats_resolve_identically() {
    let fixture = Fixture::new();
    fixture.write(
        ".seli/team/.env",
        "SELI_IT_BASIC=basic_value\nSELI_IT_TARGET=\"target dir\"\n",
    );
    fixture.write(
        ".seli/.env",
        "SELI_IT_PROJECT='/srv/project'\nSELI_IT_BASIC=parent_value\nSELI_IT_FLAGS=--short\n",
    );

    let json = load_config_file_within(&fixture.write_config("dev.json", JSON_CONFIG), fixture.home())
        .unwrap();
    let yaml = load_config_file_within(&fixture.write_config("dev.yaml", YAML_CONFIG), fixture.home())
        .unwrap();
    let toml = load_config_file_within(&fixture.write_config("dev.toml", TOML_CONFIG), fixture.home())
        .unwrap();

    assert_eq!(json, yaml);
    assert_eq!(json, toml);

    let build = &json.commands[0];
    assert_eq!(build.args, vec!["build", "--target-dir", "target dir"]);
    assert_eq!(build.env.get("LOCAL_VAR"), Some(&"basic_value_local".to_string()));
    assert_eq!(build.work_dir, Some("/srv/project".to_string()));

    let status = &json.commands[1];
    assert_eq!(status.command, "git status --short");
    assert!(status.env.is_empty());
}

#[test]
fn test_name_defaults_to_file_stem() {
    let fixture = Fixture::new();
    let path = fixture.write_config(
        "development.json",
        r#"{"commands": [{"name": "ls", "command": "ls -la"}]}"#,
    );

    let document = load_config_file_within(&path, fixture.home()).unwrap();
    assert_eq!(document.name, "development");
}

#[test]
fn test_show_resolution_from_file() {
    let fixture = Fixture::new();
    let path = fixture.write_config("dev.yaml", YAML_CONFIG);

    let document = load_config_file_within(&path, fixture.home()).unwrap();
    // Build sets show: false, Status inherits the file-level show: true
    assert!(!document.should_show(&document.commands[0]));
    assert!(document.should_show(&document.commands[1]));

    let unset = fixture.write_config(
        "plain.toml",
        "[[commands]]\nname = \"a\"\ncommand = \"ls\"\n",
    );
    let document = load_config_file_within(&unset, fixture.home()).unwrap();
    assert!(!document.should_show(&document.commands[0]));
}

#[test]
fn test_env_file_in_home_is_ignored() {
    let fixture = Fixture::new();
    fixture.write(".env", "SELI_IT_FROM_HOME=visible\n");
    let path = fixture.write_config(
        "home.json",
        r#"{"commands": [{"name": "echo", "command": "echo [${SELI_IT_FROM_HOME}]"}]}"#,
    );

    let document = load_config_file_within(&path, fixture.home()).unwrap();
    assert_eq!(document.commands[0].command, "echo []");
}

#[test]
fn test_escapes_survive_the_pipeline() {
    let fixture = Fixture::new();
    fixture.write(".seli/team/.env", "NOT_A_VAR=expanded\n");
    let path = fixture.write_config(
        "escapes.yaml",
        r#"
commands:
  - name: price
    command: echo
    args: ['Price: \$100', 'Literal: \${NOT_A_VAR}']
"#,
    );

    let document = load_config_file_within(&path, fixture.home()).unwrap();
    assert_eq!(
        document.commands[0].args,
        vec!["Price: $100", "Literal: ${NOT_A_VAR}"]
    );
}

#[test]
fn test_unreadable_env_file_aborts_load() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.config_dir.join(".env")).unwrap();
    let path = fixture.write_config("dev.json", JSON_CONFIG);

    let result = load_config_file_within(&path, fixture.home());
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn test_unsupported_and_missing_files() {
    let fixture = Fixture::new();
    let text = fixture.write_config("config.txt", "test");

    assert!(matches!(
        load_config_file(&text),
        Err(Error::UnsupportedFormat(_))
    ));
    assert!(matches!(
        load_config_file_within(&fixture.config_dir.join("nonexistent.json"), fixture.home()),
        Err(Error::Io { .. })
    ));
}

#[test]
fn test_browse_then_plan() {
    let fixture = Fixture::new();
    fixture.write(".seli/team/.env", "SELI_IT_GREETING=hello\n");
    fixture.write_config(
        "greet.toml",
        "[[commands]]\nname = \"greet\"\ncommand = \"echo ${SELI_IT_GREETING} world\"\n",
    );

    let root_entries = list_directory(&fixture.home().join(".seli")).unwrap();
    assert_eq!(root_entries.len(), 1);
    assert_eq!(root_entries[0].kind, EntryKind::Directory);

    let team_entries = list_directory(&fixture.config_dir).unwrap();
    let only = single_config_file(&team_entries).unwrap();

    let document =
        load_config_file_within(&fixture.config_dir.join(&only.name), fixture.home()).unwrap();
    let command = document.find_command("greet").unwrap();
    let plan = ExecutionPlan::from_command(command).unwrap();

    assert_eq!(plan.program, "echo");
    assert_eq!(plan.args, vec!["hello", "world"]);
}
