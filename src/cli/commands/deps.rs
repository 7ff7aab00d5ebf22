//! Deps command implementation.

use crate::engine::Engine;
use crate::error::Result;
use crate::ui::{Tag, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The deps command implementation.
pub struct DepsCommand<'e> {
    engine: &'e Engine,
    element: String,
}

impl<'e> DepsCommand<'e> {
    /// Create a new deps command.
    pub fn new(engine: &'e Engine, element: String) -> Self {
        Self { engine, element }
    }
}

impl Command for DepsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let dependencies = self.engine.get_dependencies(&self.element)?;
        if dependencies.is_empty() {
            ui.status(
                Tag::Depend,
                &format!("No dependencies found for {}", self.element),
            );
        }
        for dependency in &dependencies {
            ui.message(dependency);
        }
        Ok(CommandResult::success())
    }
}
