//! Uninstall command implementation.

use crate::cli::args::UninstallArgs;
use crate::engine::{Engine, FailurePolicy, UninstallOptions};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The uninstall command implementation.
pub struct UninstallCommand<'e> {
    engine: &'e Engine,
    args: UninstallArgs,
}

impl<'e> UninstallCommand<'e> {
    /// Create a new uninstall command.
    pub fn new(engine: &'e Engine, args: UninstallArgs) -> Self {
        Self { engine, args }
    }
}

impl Command for UninstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = UninstallOptions {
            clean: self.args.clean,
            policy: if self.args.keep_going {
                FailurePolicy::BestEffort
            } else {
                FailurePolicy::FailFast
            },
        };

        let report = self.engine.uninstall(&self.args.element, &options, ui)?;
        if !report.removed.is_empty() {
            ui.success(&format!("Uninstalled {}", report.removed.join(", ")));
        }
        report.into_result()?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fakes::World;
    use crate::error::ElementsError;
    use crate::ui::MockUI;

    fn args(element: &str, clean: bool) -> UninstallArgs {
        UninstallArgs {
            element: element.to_string(),
            clean,
            keep_going: false,
        }
    }

    #[test]
    fn clean_uninstall_reports_everything_removed() {
        let world = World::scenario();
        for element in ["miranda", "thornhill", "hermes"] {
            world.preinstall(element);
        }
        let engine = world.engine();
        let mut ui = MockUI::new();

        let result = UninstallCommand::new(&engine, args("thornhill", true))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("Uninstalled thornhill, hermes"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let world = World::scenario();
        let engine = world.engine();

        let err = UninstallCommand::new(&engine, args("hermes", false))
            .execute(&mut MockUI::new())
            .unwrap_err();

        assert!(matches!(err, ElementsError::DirectoryMissing { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
