//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::engine::Engine;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Dispatch and execute a command.
    ///
    /// Settings are resolved from the environment unless the command needs
    /// none (shell completions).
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Commands::Completions(args) = &cli.command {
            return super::completions::CompletionsCommand::new(args.clone()).execute(ui);
        }

        let settings = Settings::from_env()?;
        tracing::debug!(
            "Catalog {}, source root {}",
            settings.catalog_location,
            settings.source_root.display()
        );
        let engine = Engine::from_settings(settings)?;
        self.dispatch_with(&engine, &cli.command, ui)
    }

    /// Execute a command against an existing engine.
    pub fn dispatch_with(
        &self,
        engine: &Engine,
        command: &Commands,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match command {
            Commands::Install(args) => {
                super::install::InstallCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::Uninstall(args) => {
                super::uninstall::UninstallCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::List(args) => super::list::ListCommand::new(engine, args.clone()).execute(ui),
            Commands::Registered(args) => {
                super::registered::RegisteredCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::Info(args) => {
                super::info::InfoCommand::new(engine, args.element.clone()).execute(ui)
            }
            Commands::Deps(args) => {
                super::deps::DepsCommand::new(engine, args.element.clone()).execute(ui)
            }
            Commands::Tests(args) => {
                super::list_tests::ListTestsCommand::new(engine, args.element.clone()).execute(ui)
            }
            Commands::CoreVersion => super::core_version::CoreVersionCommand::new(engine).execute(ui),
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}
