//! Installing an element and everything it depends on.

use std::fmt;
use std::path::PathBuf;

use super::{Engine, FailurePolicy, UninstallOptions};
use crate::build::{BuildGenerator, BuildJob};
use crate::catalog::CatalogEntry;
use crate::error::{ElementsError, Result};
use crate::resolver::{ElementFetcher, Fetched, InstallPlan, PlanEntry, Resolver};
use crate::shell::OutputRouting;
use crate::ui::{OutputMode, Tag, UserInterface};

/// Knobs for one install.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Re-clone elements that already have a checkout.
    pub force: bool,
    /// Branch for the requested element; its catalog branch or the
    /// configured default otherwise.
    pub branch: Option<String>,
    /// Commit the requested element is reset to after cloning.
    pub commit: Option<String>,
    pub generator: BuildGenerator,
    /// Parallel build jobs.
    pub jobs: usize,
    /// Write subprocess output to `element-logs/<element>.out|.err`.
    pub capture_logs: bool,
    pub policy: FailurePolicy,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            force: false,
            branch: None,
            commit: None,
            generator: BuildGenerator::default(),
            jobs: 1,
            capture_logs: false,
            policy: FailurePolicy::BestEffort,
        }
    }
}

/// How an install ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The plan was executed.
    Installed,
    /// A checkout already existed and `force` was off.
    AlreadyInstalled,
}

/// A plan entry that failed to build or register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallFailure {
    pub element: String,
    pub message: String,
}

/// Result of [`Engine::install`].
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub element: String,
    pub outcome: InstallOutcome,
    pub plan: InstallPlan,
    /// Elements built and registered, in build order.
    pub installed: Vec<String>,
    pub failures: Vec<InstallFailure>,
}

impl InstallReport {
    fn already_installed(element: &str) -> Self {
        Self {
            element: element.to_string(),
            outcome: InstallOutcome::AlreadyInstalled,
            plan: InstallPlan::default(),
            installed: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Whether every planned element was installed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line description, e.g. `Installed miranda, thornhill, hermes`.
    pub fn summary(&self) -> String {
        match self.outcome {
            InstallOutcome::AlreadyInstalled => format!("{} already installed", self.element),
            InstallOutcome::Installed if self.installed.is_empty() => {
                format!("Nothing installed for {}", self.element)
            }
            InstallOutcome::Installed => format!("Installed {}", self.installed.join(", ")),
        }
    }
}

impl fmt::Display for InstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl Engine {
    /// Install `element` and its dependencies.
    ///
    /// Clone failures abort the install. Build and registration failures
    /// follow `options.policy`.
    pub fn install(
        &self,
        element: &str,
        options: &InstallOptions,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallReport> {
        let dir = self.checkout_dir(element)?;
        let catalog = self.catalog.get()?;
        let entry = catalog
            .get(element)
            .ok_or_else(|| ElementsError::ElementNotFound {
                element: element.to_string(),
            })?;

        if dir.exists() {
            if !options.force {
                return Ok(InstallReport::already_installed(element));
            }
            self.remove_for_reinstall(element, ui)?;
        }

        let output = self.output_routing(element, options, ui.output_mode());
        let branch = options
            .branch
            .clone()
            .or_else(|| entry.branch.clone())
            .unwrap_or_else(|| self.settings.default_branch.clone());
        self.clone_element(entry, &branch, options.commit.is_none(), &output, ui)?;

        if let Some(commit) = &options.commit {
            ui.status(Tag::Request, &format!("Resetting {} to {}...", element, commit));
            if let Err(e) = self.vcs.reset_to(&dir, commit, &output) {
                self.discard_checkouts(std::slice::from_ref(&dir));
                return Err(ElementsError::CommitResetFailed {
                    element: element.to_string(),
                    commit: commit.clone(),
                    message: format!("{:#}", e),
                });
            }
        }

        ui.status(
            Tag::Depend,
            &format!("Gathering dependencies for {}...", element),
        );
        let resolver = Resolver::new(catalog, &self.settings.source_root);
        let mut fetcher = PlanFetcher {
            engine: self,
            force: options.force,
            output: &output,
            ui: &mut *ui,
            cloned: vec![dir],
        };
        let plan = match resolver.resolve(element, &mut fetcher) {
            Ok(plan) => plan,
            Err(e) => {
                // Unbuilt checkouts would make the next install a no-op.
                self.discard_checkouts(&fetcher.cloned);
                return Err(e);
            }
        };
        tracing::debug!("Install plan for {}:\n{}", element, plan);

        ui.status(
            Tag::Install,
            &format!("Using {} to build...", options.generator.title()),
        );
        let mut report = InstallReport {
            element: element.to_string(),
            outcome: InstallOutcome::Installed,
            plan: InstallPlan::default(),
            installed: Vec::new(),
            failures: Vec::new(),
        };

        for entry in &plan {
            let mut spinner =
                ui.start_spinner(Tag::Install, &format!("Installing {}...", entry.element));
            match self.build_and_register(entry, options, &output) {
                Ok(()) => {
                    spinner.finish_success(&format!("{} installed", entry.element));
                    report.installed.push(entry.element.clone());
                }
                Err(e) => {
                    spinner.finish_error(&format!("Installing {} failed", entry.element));
                    if options.policy == FailurePolicy::FailFast {
                        return Err(e);
                    }
                    tracing::warn!("{}", e);
                    report.failures.push(InstallFailure {
                        element: entry.element.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        report.plan = plan;
        Ok(report)
    }

    fn output_routing(
        &self,
        element: &str,
        options: &InstallOptions,
        mode: OutputMode,
    ) -> OutputRouting {
        if options.capture_logs {
            OutputRouting::log_files(&self.settings.log_dir(), element)
        } else if mode.shows_command_output() {
            OutputRouting::inherit()
        } else {
            OutputRouting::default()
        }
    }

    fn remove_for_reinstall(&self, element: &str, ui: &mut dyn UserInterface) -> Result<()> {
        self.uninstall(element, &UninstallOptions::default(), ui)?
            .into_result()?;
        Ok(())
    }

    fn clone_element(
        &self,
        entry: &CatalogEntry,
        branch: &str,
        shallow: bool,
        output: &OutputRouting,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        ui.status(Tag::Request, &format!("Cloning {}...", entry.name));
        let dest = self.checkout_dir(&entry.name)?;
        self.vcs
            .clone_branch(&entry.url, branch, &dest, shallow, output)
            .map_err(|e| ElementsError::CloneFailed {
                element: entry.name.clone(),
                message: format!("{:#}", e),
            })
    }

    fn build_and_register(
        &self,
        entry: &PlanEntry,
        options: &InstallOptions,
        output: &OutputRouting,
    ) -> Result<()> {
        let source_dir = self.settings.element_dir(&entry.element);
        let job = BuildJob {
            element: &entry.element,
            source_dir: source_dir.clone(),
            build_vars: &entry.build_vars,
            generator: options.generator,
            jobs: options.jobs,
            output: output.clone(),
        };
        self.builder
            .build(&job)
            .map_err(|e| ElementsError::BuildFailed {
                element: entry.element.clone(),
                message: format!("{:#}", e),
            })?;

        self.registry.register(
            &entry.element,
            &source_dir,
            &entry.build_vars.to_env(),
            output,
        )
    }
}

/// Fetches dependencies discovered while resolving an install.
struct PlanFetcher<'e, 'u> {
    engine: &'e Engine,
    force: bool,
    output: &'e OutputRouting,
    ui: &'u mut dyn UserInterface,
    /// Checkouts created by this install, the requested element first.
    cloned: Vec<PathBuf>,
}

impl ElementFetcher for PlanFetcher<'_, '_> {
    fn fetch(&mut self, element: &str) -> Result<Fetched> {
        let engine = self.engine;
        let entry = engine.catalog.entry(element)?;
        let dir = engine.checkout_dir(element)?;

        if dir.exists() {
            if !self.force {
                self.ui
                    .status(Tag::Install, &format!("{} already installed", element));
                return Ok(Fetched::AlreadyPresent);
            }
            engine.remove_for_reinstall(element, &mut *self.ui)?;
        }

        let branch = entry
            .branch
            .clone()
            .unwrap_or_else(|| engine.settings.default_branch.clone());
        let cloned = engine.clone_element(entry, &branch, true, self.output, &mut *self.ui);
        self.cloned.push(dir);
        cloned?;
        Ok(Fetched::Cloned)
    }

    fn dependencies_found(&mut self, element: &str, dependencies: &[String]) {
        if dependencies.is_empty() {
            self.ui
                .status(Tag::Depend, &format!("No dependencies found for {}", element));
        } else {
            self.ui.status(
                Tag::Depend,
                &format!(
                    "Found dependencies: {} (from {})",
                    dependencies.join(", "),
                    element
                ),
            );
        }
    }
}
