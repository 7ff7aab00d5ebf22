//! List command implementation.
//!
//! The `sst-elements list` command prints every element in the catalog.

use crate::cli::args::ListArgs;
use crate::engine::Engine;
use crate::error::Result;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand<'e> {
    engine: &'e Engine,
    args: ListArgs,
}

impl<'e> ListCommand<'e> {
    /// Create a new list command.
    pub fn new(engine: &'e Engine, args: ListArgs) -> Self {
        Self { engine, args }
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let elements = self.engine.list_all_elements()?;

        if !self.args.status {
            for element in &elements {
                ui.message(element);
            }
            return Ok(CommandResult::success());
        }

        let registered = self.engine.list_registered_elements()?;
        let mut table = Table::new(vec!["Element", "Registered"]);
        for element in &elements {
            let mark = if registered.contains(element) { "✓" } else { "" };
            table.add_row(vec![element.as_str(), mark]);
        }
        ui.message(&table.render());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fakes::World;
    use crate::ui::MockUI;

    #[test]
    fn prints_catalog_names() {
        let world = World::scenario();
        let engine = world.engine();
        let mut ui = MockUI::new();

        ListCommand::new(&engine, ListArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(ui.messages(), ["hermes", "miranda", "thornhill"]);
    }

    #[test]
    fn status_table_marks_registered() {
        let world = World::scenario();
        world.preinstall("miranda");
        let engine = world.engine();
        let mut ui = MockUI::new();

        ListCommand::new(&engine, ListArgs { status: true })
            .execute(&mut ui)
            .unwrap();

        let rendered = &ui.messages()[0];
        insta::assert_snapshot!(rendered, @r"
        ┌───────────┬────────────┐
        │ Element   │ Registered │
        ├───────────┼────────────┤
        │ hermes    │            │
        │ miranda   │ ✓          │
        │ thornhill │            │
        └───────────┴────────────┘
        ");
    }
}
