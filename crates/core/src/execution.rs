use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::process::{Command, Stdio};

use itertools::Itertools;
use log::info;

use crate::command_definitions::CommandSpec;
use crate::config::expand_working_directory;
use crate::error::{Error, Result};

/// Everything needed to spawn a resolved command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub program: String,
    pub args: Vec<String>,
    pub working_directory: Option<String>,
    pub environment: HashMap<String, String>,
}

impl ExecutionPlan {
    /// Builds the plan for a resolved command.
    ///
    /// With `args`, `command` is the program and the arguments are passed
    /// verbatim. Without, `command` is split on whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCommand`] if a command line splits to nothing.
    pub fn from_command(command: &CommandSpec) -> Result<Self> {
        let (program, args) = if command.is_structured() {
            (command.command.clone(), command.args.clone())
        } else {
            let mut parts = command.command.split_whitespace().map(str::to_string);
            let program = parts
                .next()
                .ok_or_else(|| Error::EmptyCommand(command.name.clone()))?;
            (program, parts.collect())
        };

        Ok(Self {
            program,
            args,
            working_directory: expand_working_directory(command.work_dir.as_deref()),
            environment: command.env.clone(),
        })
    }

    /// Human readable details printed before running a command.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut description = format!("Executing command:\n{self}");

        if let Some(working_directory) = &self.working_directory {
            description.push_str(&format!("\nIn directory:\n\t{working_directory}"));
        }

        if !self.environment.is_empty() {
            description.push_str("\nWith environment:");
            for (key, value) in self.environment.iter().sorted() {
                description.push_str(&format!("\n\t\"{key}\": \"{value}\""));
            }
        }

        description
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);

        if let Some(working_directory) = &self.working_directory {
            command.current_dir(working_directory);
        }

        // Added on top of the inherited process environment
        command.envs(&self.environment);
        command
    }
}

impl Display for ExecutionPlan {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.program)?;
        for arg in &self.args {
            write!(formatter, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes a plan attached to the current terminal and waits for it.
///
/// # Errors
///
/// Returns an error if the program cannot be spawned or exits with a
/// non-zero status.
pub fn execute_plan(plan: &ExecutionPlan) -> Result<()> {
    let mut command = plan.to_command();
    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    info!("Executing `{}`", plan);
    if !plan.environment.is_empty() {
        info!("Executing with environment variables: {:?}", plan.environment);
    }

    let status = command.spawn()?.wait()?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::SubProcessExit(status.code()))
    }
}
