//! Registered command implementation.

use crate::cli::args::RegisteredArgs;
use crate::engine::Engine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The registered command implementation.
pub struct RegisteredCommand<'e> {
    engine: &'e Engine,
    args: RegisteredArgs,
}

impl<'e> RegisteredCommand<'e> {
    /// Create a new registered command.
    pub fn new(engine: &'e Engine, args: RegisteredArgs) -> Self {
        Self { engine, args }
    }
}

impl Command for RegisteredCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.element {
            Some(element) => {
                if self.engine.is_registered(element)? {
                    ui.message(&format!("{} is registered", element));
                    Ok(CommandResult::success())
                } else {
                    ui.message(&format!("{} is not registered", element));
                    Ok(CommandResult::failure(1))
                }
            }
            None => {
                for element in self.engine.list_registered_elements()? {
                    ui.message(&element);
                }
                Ok(CommandResult::success())
            }
        }
    }
}
