//! Info command implementation.

use crate::engine::Engine;
use crate::error::Result;
use crate::info::InfoService;
use crate::ui::{Tag, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The info command implementation.
pub struct InfoCommand<'e> {
    engine: &'e Engine,
    element: String,
}

impl<'e> InfoCommand<'e> {
    /// Create a new info command.
    pub fn new(engine: &'e Engine, element: String) -> Self {
        Self { engine, element }
    }
}

impl Command for InfoCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let info = InfoService::new(self.engine)?.get_info(&self.element)?;
        ui.status(Tag::Request, &format!("README from {}", info.source));
        ui.message(info.content.trim_end());
        Ok(CommandResult::success())
    }
}
