//! Core-version command implementation.

use crate::engine::Engine;
use crate::error::Result;
use crate::info::InfoService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The core-version command implementation.
pub struct CoreVersionCommand<'e> {
    engine: &'e Engine,
}

impl<'e> CoreVersionCommand<'e> {
    /// Create a new core-version command.
    pub fn new(engine: &'e Engine) -> Self {
        Self { engine }
    }
}

impl Command for CoreVersionCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let version = InfoService::new(self.engine)?.core_version()?;
        ui.message(&version);
        Ok(CommandResult::success())
    }
}
