//! Install command implementation.
//!
//! The `sst-elements install` command clones, builds and registers an
//! element together with its dependencies.

use crate::cli::args::InstallArgs;
use crate::engine::{Engine, FailurePolicy, InstallOptions, InstallOutcome};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand<'e> {
    engine: &'e Engine,
    args: InstallArgs,
}

impl<'e> InstallCommand<'e> {
    /// Create a new install command.
    pub fn new(engine: &'e Engine, args: InstallArgs) -> Self {
        Self { engine, args }
    }

    fn options(&self) -> InstallOptions {
        InstallOptions {
            force: self.args.force,
            branch: self.args.branch.clone(),
            commit: self.args.commit.clone(),
            generator: self.args.generator,
            jobs: usize::from(self.args.jobs),
            capture_logs: self.args.logs,
            policy: if self.args.fail_fast {
                FailurePolicy::FailFast
            } else {
                FailurePolicy::BestEffort
            },
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.engine.install(&self.args.element, &self.options(), ui)?;

        if report.outcome == InstallOutcome::AlreadyInstalled {
            ui.message(&format!(
                "{} (use --force to reinstall)",
                report.summary()
            ));
            return Ok(CommandResult::success());
        }

        for failure in &report.failures {
            ui.error(&failure.message);
        }
        if report.is_complete() {
            ui.success(&report.summary());
            Ok(CommandResult::success())
        } else {
            if !report.installed.is_empty() {
                ui.warning(&report.summary());
            }
            let failed: Vec<&str> = report.failures.iter().map(|f| f.element.as_str()).collect();
            ui.error(&format!("Failed to install {}", failed.join(", ")));
            Ok(CommandResult::failure(1))
        }
    }
}
