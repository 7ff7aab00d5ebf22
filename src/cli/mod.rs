//! Command-line interface for sst-elements.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, ElementArgs, InstallArgs, ListArgs, RegisteredArgs,
    UninstallArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
