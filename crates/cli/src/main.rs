use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use log::{debug, info};
use seli_core::browse::list_directory;
use seli_core::command_definitions::{CommandSpec, ConfigDocument};
use seli_core::error::{Error, Result};
use seli_core::execution::{execute_plan, ExecutionPlan};
use seli_core::{config, file_handling};

use seli_cli::browser::{Activation, Browser};
use seli_cli::cli_args::Args;
use seli_cli::command_selection::{prompt_for_choice, Choice, ListItem, TerminalGuard};

fn execute() -> Result<()> {
    let args = Args::parse();

    let config_dir = config::get_config_dir(args.config_dir.as_deref());
    debug!("Config directory: `{}`", config_dir.display());
    config::ensure_config_dir(&config_dir)?;

    let Some(file) = &args.file else {
        return if args.list {
            print_directory(&config_dir)
        } else {
            browse(&config_dir, args.dry_run)
        };
    };

    let path = config::resolve_config_file(&config_dir, file);
    let document = file_handling::load_config_file(&path)?;

    if args.list {
        print_commands(&document);
        return Ok(());
    }

    match &args.command {
        Some(selector) => {
            let command = document
                .find_command(selector)
                .ok_or_else(|| Error::CommandNotFound(selector.clone()))?;
            run_command(&document, command, args.dry_run)
        }
        None => pick_command(&document, args.dry_run),
    }
}

/// Runs the interactive browser until a command is chosen or the user quits.
fn browse(config_dir: &Path, dry_run: bool) -> Result<()> {
    let mut browser = Browser::open(config_dir)?;

    let Some((document, index)) = select_from_browser(&mut browser)? else {
        return Ok(());
    };

    let command = document
        .commands
        .get(index)
        .ok_or(Error::CommandIndexOutOfRange(index))?;
    run_command(&document, command, dry_run)
}

fn select_from_browser(browser: &mut Browser) -> Result<Option<(ConfigDocument, usize)>> {
    // Restores the terminal on every return path
    let _guard = TerminalGuard::enter()?;

    loop {
        let items = browser.items();
        match prompt_for_choice(&browser.title(), browser.status(), &items)? {
            Choice::Quit => return Ok(None),
            Choice::Back => {
                if !browser.back() {
                    return Ok(None);
                }
            }
            Choice::Select(index) => match browser.activate(index)? {
                Activation::Stay => {}
                Activation::Run(document, index) => return Ok(Some((document, index))),
            },
        }
    }
}

fn pick_command(document: &ConfigDocument, dry_run: bool) -> Result<()> {
    let items: Vec<ListItem> = document.commands.iter().map(ListItem::from).collect();

    let choice = {
        let _guard = TerminalGuard::enter()?;
        prompt_for_choice(&document.to_string(), None, &items)?
    };

    match choice {
        Choice::Select(index) => {
            let command = document
                .commands
                .get(index)
                .ok_or(Error::CommandIndexOutOfRange(index))?;
            run_command(document, command, dry_run)
        }
        Choice::Back | Choice::Quit => Ok(()),
    }
}

fn run_command(document: &ConfigDocument, command: &CommandSpec, dry_run: bool) -> Result<()> {
    let plan = ExecutionPlan::from_command(command)?;

    if dry_run || document.should_show(command) {
        println!("{}", plan.describe());
    }

    if dry_run {
        println!("Dry run is specified, exiting without executing.");
        return Ok(());
    }

    info!("Running `{}` from `{}`", command.name, document.name);
    execute_plan(&plan)
}

fn print_directory(config_dir: &Path) -> Result<()> {
    let entries = list_directory(config_dir)?;

    if entries.is_empty() {
        println!("No configuration files in `{}`", config_dir.display());
    } else {
        println!("{}", entries.iter().join("\n"));
    }

    Ok(())
}

fn print_commands(document: &ConfigDocument) {
    println!("{document}");
    println!(
        "{}",
        document
            .commands
            .iter()
            .enumerate()
            .map(|(index, command)| format!("\t{index}: {command}"))
            .join("\n")
    );
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
