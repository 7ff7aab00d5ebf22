//! Install and uninstall orchestration.
//!
//! The [`Engine`] ties the catalog, the registry, version control and the
//! builder together:
//!
//! - install: fetch, resolve, build, register
//! - uninstall: locate, find dependents, remove, unregister
//!
//! Collaborators sit behind traits so tests can run the full flow without
//! git, CMake or `sst-register` installed.

mod install;
mod uninstall;

#[cfg(test)]
pub(crate) mod fakes;

pub use install::{InstallFailure, InstallOptions, InstallOutcome, InstallReport};
pub use uninstall::{UninstallOptions, UninstallReport};

use std::path::PathBuf;

use crate::build::{Builder, CmakeBuilder};
use crate::catalog::{is_valid_name, CatalogClient};
use crate::config::Settings;
use crate::error::{ElementsError, Result};
use crate::fetch::{GitFetcher, SourceControl};
use crate::registry::RegistryClient;
use crate::resolver::Resolver;

/// How an operation reacts when one element in a batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and carry on with the rest of the batch.
    BestEffort,
    /// Stop at the first failure.
    FailFast,
}

/// Runs element operations against one source root.
pub struct Engine {
    settings: Settings,
    catalog: CatalogClient,
    registry: RegistryClient,
    vcs: Box<dyn SourceControl>,
    builder: Box<dyn Builder>,
}

impl Engine {
    pub fn new(
        settings: Settings,
        catalog: CatalogClient,
        registry: RegistryClient,
        vcs: Box<dyn SourceControl>,
        builder: Box<dyn Builder>,
    ) -> Self {
        Self {
            settings,
            catalog,
            registry,
            vcs,
            builder,
        }
    }

    /// Engine driving the real tools named in `settings`.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let catalog = CatalogClient::from_settings(&settings)?;
        let registry = RegistryClient::from_settings(&settings);
        let vcs = Box::new(GitFetcher::new(settings.tools.git.clone()));
        let builder = Box::new(CmakeBuilder::new(settings.tools.clone()));
        Ok(Self::new(settings, catalog, registry, vcs, builder))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn registry(&self) -> &RegistryClient {
        &self.registry
    }

    /// Checkout directory of `element` under the source root.
    ///
    /// Names that are not a single directory name never resolve to a path.
    fn checkout_dir(&self, element: &str) -> Result<PathBuf> {
        if !is_valid_name(element) {
            return Err(ElementsError::ElementNotFound {
                element: element.to_string(),
            });
        }
        Ok(self.settings.element_dir(element))
    }

    /// Best-effort removal of checkouts left by an aborted install.
    fn discard_checkouts(&self, dirs: &[PathBuf]) {
        for dir in dirs {
            if !dir.exists() {
                continue;
            }
            tracing::debug!("Removing {}", dir.display());
            if let Err(e) = std::fs::remove_dir_all(dir) {
                tracing::warn!("Could not remove {}: {}", dir.display(), e);
            }
        }
    }

    /// Every installable element, sorted by name.
    pub fn list_all_elements(&self) -> Result<Vec<String>> {
        Ok(self.catalog.get()?.names().map(String::from).collect())
    }

    /// Registered elements in the order the registry lists them.
    pub fn list_registered_elements(&self) -> Result<Vec<String>> {
        self.registry.list_registered()
    }

    pub fn is_registered(&self, element: &str) -> Result<bool> {
        self.registry.is_registered(element)
    }

    /// Declared dependencies of a catalog element.
    pub fn get_dependencies(&self, element: &str) -> Result<Vec<String>> {
        let catalog = self.catalog.get()?;
        Resolver::new(catalog, &self.settings.source_root).dependencies_of(element)
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::World;
    use super::*;
    use crate::error::ElementsError;

    #[test]
    fn lists_catalog_sorted() {
        let world = World::scenario();
        let engine = world.engine();

        assert_eq!(
            engine.list_all_elements().unwrap(),
            vec!["hermes", "miranda", "thornhill"]
        );
    }

    #[test]
    fn dependencies_come_from_catalog() {
        let world = World::scenario();
        let engine = world.engine();

        assert_eq!(engine.get_dependencies("hermes").unwrap(), vec!["thornhill"]);
        assert!(engine.get_dependencies("miranda").unwrap().is_empty());
    }

    #[test]
    fn dependencies_of_unknown_element() {
        let world = World::scenario();
        let err = world.engine().get_dependencies("invalid_element").unwrap_err();
        assert!(matches!(err, ElementsError::ElementNotFound { .. }));
    }

    #[test]
    fn registry_queries_pass_through() {
        let world = World::scenario();
        world.state.borrow_mut().registered.push("miranda".into());
        let engine = world.engine();

        assert_eq!(engine.list_registered_elements().unwrap(), vec!["miranda"]);
        assert!(engine.is_registered("miranda").unwrap());
        assert!(!engine.is_registered("hermes").unwrap());
    }
}
