use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// One runnable entry of a configuration file.
///
/// When `args` is non-empty, `command` names the executable and every
/// argument is passed verbatim. Otherwise `command` is a full command line
/// that gets split on whitespace before execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub description: Option<String>,
    pub command: String,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub work_dir: Option<String>,
    pub show: Option<bool>,
}

impl CommandSpec {
    /// Description shown in lists, falling back to the command text.
    #[must_use]
    pub fn display_description(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => description,
            _ => &self.command,
        }
    }

    /// Whether invocation details are echoed before running.
    ///
    /// The command's own `show` wins, then the file-level default, then `false`.
    #[must_use]
    pub fn resolve_show(&self, show_by_default: Option<bool>) -> bool {
        self.show.or(show_by_default).unwrap_or(false)
    }

    #[must_use]
    pub fn is_structured(&self) -> bool {
        !self.args.is_empty()
    }
}

impl Display for CommandSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            formatter.write_str(self.display_description())
        } else {
            write!(formatter, "{} ({})", self.name, self.display_description())
        }
    }
}

/// Root of one configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    pub name: String,
    pub description: Option<String>,
    pub show_by_default: Option<bool>,
    pub commands: Vec<CommandSpec>,
}

impl ConfigDocument {
    #[must_use]
    pub fn should_show(&self, command: &CommandSpec) -> bool {
        command.resolve_show(self.show_by_default)
    }

    /// Finds a command by exact name, or by 0-based index when the selector is numeric.
    #[must_use]
    pub fn find_command(&self, selector: &str) -> Option<&CommandSpec> {
        if let Some(command) = self.commands.iter().find(|c| c.name == selector) {
            return Some(command);
        }

        selector
            .parse::<usize>()
            .ok()
            .and_then(|index| self.commands.get(index))
    }
}

impl Display for ConfigDocument {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) if !description.is_empty() => {
                write!(formatter, "{} ({})", self.name, description)
            }
            _ => formatter.write_str(&self.name),
        }
    }
}
