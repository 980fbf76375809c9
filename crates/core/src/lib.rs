//! Seli Core Library
//!
//! This crate provides the core functionality for seli, a terminal launcher
//! that browses a directory tree of configuration files, lists the commands
//! each file defines, and runs a chosen command with `${NAME}` variables
//! expanded from layered `.env` files and the process environment.
//!
//! # Key Features
//!
//! - **Configuration Formats**: JSON, YAML and TOML files share one schema
//! - **Layered `.env` Files**: Closest directory wins, walking up to the home directory
//! - **Variable Expansion**: `${NAME}` placeholders with `\$` escaping
//! - **Resolved Documents**: Loading produces a new, fully expanded document
//! - **Execution**: Structured or whitespace-split command lines with their environment
//!
//! # Examples
//!
//! Loading a configuration file:
//!
//! ```no_run
//! use std::path::Path;
//! use seli_core::file_handling::load_config_file;
//!
//! let document = load_config_file(Path::new("/home/me/.seli/development.json"))?;
//! for command in &document.commands {
//!     println!("Command: {}", command);
//! }
//! # Ok::<(), seli_core::error::Error>(())
//! ```

pub mod browse;
pub mod command_definitions;
pub mod config;
pub mod dotenv;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod formats;
pub mod interpolation;
pub mod processor;
