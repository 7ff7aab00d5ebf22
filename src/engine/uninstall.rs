//! Removing elements and, optionally, what depends on them.

use std::fs;
use std::path::PathBuf;

use super::{Engine, FailurePolicy};
use crate::error::{ElementsError, Result};
use crate::ui::{Tag, UserInterface};

/// Knobs for one uninstall.
#[derive(Debug, Clone, Copy)]
pub struct UninstallOptions {
    /// Also remove registered elements that declare this one as a
    /// dependency.
    pub clean: bool,
    pub policy: FailurePolicy,
}

impl Default for UninstallOptions {
    fn default() -> Self {
        Self {
            clean: false,
            policy: FailurePolicy::FailFast,
        }
    }
}

/// Result of [`Engine::uninstall`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    pub removed: Vec<String>,
    /// Elements whose directory was not there to remove.
    pub missing: Vec<(String, PathBuf)>,
}

impl UninstallReport {
    /// Turn the first missing directory into an error.
    pub fn into_result(self) -> Result<Self> {
        match self.missing.first() {
            Some((element, dir)) => Err(ElementsError::DirectoryMissing {
                element: element.clone(),
                dir: dir.clone(),
            }),
            None => Ok(self),
        }
    }
}

impl Engine {
    /// Remove `element`, plus its direct dependents when `options.clean`.
    pub fn uninstall(
        &self,
        element: &str,
        options: &UninstallOptions,
        ui: &mut dyn UserInterface,
    ) -> Result<UninstallReport> {
        self.checkout_dir(element)?;
        let mut targets = vec![element.to_string()];
        if options.clean && self.registry.is_registered(element)? {
            let dependents = self.dependents_of(element)?;
            if !dependents.is_empty() {
                ui.status(
                    Tag::Remove,
                    &format!("Also removing dependents: {}", dependents.join(", ")),
                );
            }
            targets.extend(dependents);
        }

        let mut report = UninstallReport::default();
        for name in targets {
            let dir = self.checkout_dir(&name)?;
            if !dir.is_dir() {
                tracing::warn!("{} has no directory at {}", name, dir.display());
                report.missing.push((name, dir));
                if options.policy == FailurePolicy::FailFast {
                    break;
                }
                continue;
            }

            ui.status(Tag::Remove, &format!("Uninstalling {}...", name));
            fs::remove_dir_all(&dir)?;
            if let Err(e) = self.registry.unregister(&name) {
                tracing::warn!("{}", e);
                ui.warning(&format!("{} removed but not unregistered: {}", name, e));
            }
            ui.status(Tag::Remove, &format!("{} uninstalled", name));
            report.removed.push(name);
        }

        Ok(report)
    }

    /// Registered catalog elements that list `element` as a dependency.
    fn dependents_of(&self, element: &str) -> Result<Vec<String>> {
        let catalog = self.catalog.get()?;
        let mut dependents = Vec::new();
        for name in self.registry.list_registered()? {
            if name == element || !catalog.contains(&name) {
                continue;
            }
            if self.get_dependencies(&name)?.iter().any(|d| d == element) {
                dependents.push(name);
            }
        }
        Ok(dependents)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fakes::World;
    use super::super::InstallOptions;
    use super::*;
    use crate::ui::MockUI;

    fn installed_scenario() -> World {
        let world = World::scenario();
        world
            .engine()
            .install("hermes", &InstallOptions::default(), &mut MockUI::new())
            .unwrap();
        world
    }

    fn clean() -> UninstallOptions {
        UninstallOptions {
            clean: true,
            ..Default::default()
        }
    }

    #[test]
    fn removes_directory_and_registration() {
        let world = installed_scenario();
        let engine = world.engine();

        let report = engine
            .uninstall("hermes", &UninstallOptions::default(), &mut MockUI::new())
            .unwrap();

        assert_eq!(report.removed, vec!["hermes"]);
        assert!(!world.dir("hermes").exists());
        assert!(!engine.is_registered("hermes").unwrap());
        assert!(engine.is_registered("thornhill").unwrap());
    }

    #[test]
    fn clean_removes_direct_dependents() {
        let world = installed_scenario();
        let mut ui = MockUI::new();

        let report = world
            .engine()
            .uninstall("thornhill", &clean(), &mut ui)
            .unwrap();

        assert_eq!(report.removed, vec!["thornhill", "hermes"]);
        assert!(world.dir("miranda").exists());
        assert_eq!(world.state.borrow().registered, vec!["miranda"]);
        assert!(ui.has_status(Tag::Remove, "Also removing dependents: hermes"));
    }

    #[test]
    fn clean_is_not_transitive() {
        let world = installed_scenario();

        let report = world
            .engine()
            .uninstall("miranda", &clean(), &mut MockUI::new())
            .unwrap();

        assert_eq!(report.removed, vec!["miranda", "thornhill"]);
        assert!(world.dir("hermes").exists());
    }

    #[test]
    fn clean_skips_dependents_of_unregistered_element() {
        let world = installed_scenario();
        world.state.borrow_mut().registered.retain(|n| n != "thornhill");

        let report = world
            .engine()
            .uninstall("thornhill", &clean(), &mut MockUI::new())
            .unwrap();

        assert_eq!(report.removed, vec!["thornhill"]);
        assert!(world.dir("hermes").exists());
    }

    #[test]
    fn missing_directory_stops_the_batch() {
        let world = installed_scenario();
        fs::remove_dir_all(world.dir("thornhill")).unwrap();

        let report = world
            .engine()
            .uninstall("thornhill", &clean(), &mut MockUI::new())
            .unwrap();

        assert!(report.removed.is_empty());
        assert_eq!(report.missing[0].0, "thornhill");
        assert!(world.dir("hermes").exists());

        let err = report.into_result().unwrap_err();
        assert!(matches!(err, ElementsError::DirectoryMissing { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn best_effort_keeps_going_past_missing_directory() {
        let world = installed_scenario();
        fs::remove_dir_all(world.dir("thornhill")).unwrap();
        let options = UninstallOptions {
            clean: true,
            policy: FailurePolicy::BestEffort,
        };

        let report = world
            .engine()
            .uninstall("thornhill", &options, &mut MockUI::new())
            .unwrap();

        assert_eq!(report.removed, vec!["hermes"]);
        assert_eq!(report.missing.len(), 1);
    }

    #[test]
    fn unregister_failure_is_only_a_warning() {
        let world = installed_scenario();
        world.state.borrow_mut().failing_unregister = true;
        let mut ui = MockUI::new();

        let report = world
            .engine()
            .uninstall("hermes", &UninstallOptions::default(), &mut ui)
            .unwrap();

        assert_eq!(report.removed, vec!["hermes"]);
        assert!(!world.dir("hermes").exists());
        assert!(ui.has_warning("hermes removed but not unregistered"));
    }

    #[test]
    fn names_outside_the_source_root_are_refused() {
        let world = installed_scenario();
        let outside = tempfile::TempDir::new().unwrap();
        let absolute = outside.path().display().to_string();

        for name in [absolute.as_str(), "..", ".", "hermes/../thornhill"] {
            let err = world
                .engine()
                .uninstall(name, &UninstallOptions::default(), &mut MockUI::new())
                .unwrap_err();
            assert!(
                matches!(err, ElementsError::ElementNotFound { .. }),
                "{} was not refused",
                name
            );
        }

        assert!(outside.path().is_dir());
        assert!(world.root().is_dir());
        for element in ["hermes", "thornhill", "miranda"] {
            assert!(world.dir(element).is_dir());
        }
        assert!(world.state.borrow().unregistered.is_empty());
    }

    #[test]
    fn unknown_element_without_directory_is_missing() {
        let world = World::scenario();

        let err = world
            .engine()
            .uninstall("ghost", &UninstallOptions::default(), &mut MockUI::new())
            .unwrap()
            .into_result()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("ghost not found in {}", world.dir("ghost").display())
        );
    }
}
