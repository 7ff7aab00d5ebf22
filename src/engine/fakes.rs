//! In-memory stand-ins for git, the builder and `sst-register`.

use anyhow::bail;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

use super::Engine;
use crate::build::{BuildJob, Builder};
use crate::catalog::{Catalog, CatalogClient, CatalogEntry};
use crate::config::Settings;
use crate::error::Result;
use crate::fetch::SourceControl;
use crate::registry::{RegistryClient, RegistryTool, ValidityMarkerParser};
use crate::resolver::MANIFEST_FILE;
use crate::shell::OutputRouting;

/// One recorded clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneCall {
    pub element: String,
    pub branch: String,
    pub shallow: bool,
}

/// Everything the fakes observed, plus knobs for making them fail.
#[derive(Debug, Default)]
pub struct State {
    /// `dependencies.txt` contents written into fresh clones.
    pub manifests: HashMap<String, String>,
    pub registered: Vec<String>,
    pub clones: Vec<CloneCall>,
    pub resets: Vec<(String, String)>,
    /// `(element, build vars)` per build.
    pub builds: Vec<(String, String)>,
    /// `(element, environment)` per registration.
    pub registrations: Vec<(String, BTreeMap<String, String>)>,
    pub unregistered: Vec<String>,
    pub failing_clones: HashSet<String>,
    pub failing_builds: HashSet<String>,
    pub failing_reset: bool,
    pub failing_unregister: bool,
}

impl State {
    pub fn cloned(&self) -> Vec<&str> {
        self.clones.iter().map(|c| c.element.as_str()).collect()
    }

    pub fn built(&self) -> Vec<&str> {
        self.builds.iter().map(|(e, _)| e.as_str()).collect()
    }
}

/// A source root in a temp dir with fake collaborators sharing one [`State`].
pub struct World {
    pub temp: TempDir,
    pub catalog: Catalog,
    pub state: Rc<RefCell<State>>,
}

impl World {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            temp: TempDir::new().unwrap(),
            catalog,
            state: Rc::new(RefCell::new(State::default())),
        }
    }

    /// hermes → thornhill → miranda, dependencies declared in the catalog.
    pub fn scenario() -> Self {
        Self::new(Catalog::from_entries([
            CatalogEntry::new("hermes", "https://github.com/sst/hermes")
                .with_dependencies(["thornhill"]),
            CatalogEntry::new("thornhill", "https://github.com/sst/thornhill")
                .with_dependencies(["miranda"]),
            CatalogEntry::new("miranda", "https://github.com/sst/miranda")
                .with_dependencies(Vec::<String>::new()),
        ]))
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn dir(&self, element: &str) -> PathBuf {
        self.root().join(element)
    }

    pub fn engine(&self) -> Engine {
        let settings = Settings::new("memory", self.root());
        let registry = RegistryClient::new(
            Box::new(FakeRegistry {
                state: Rc::clone(&self.state),
            }),
            Box::new(ValidityMarkerParser),
        );
        Engine::new(
            settings,
            CatalogClient::preloaded(self.catalog.clone()),
            registry,
            Box::new(FakeGit {
                state: Rc::clone(&self.state),
            }),
            Box::new(FakeBuilder {
                state: Rc::clone(&self.state),
            }),
        )
    }

    /// Lay down a checkout and registration as if installed earlier.
    pub fn preinstall(&self, element: &str) {
        fs::create_dir_all(self.dir(element)).unwrap();
        self.state.borrow_mut().registered.push(element.to_string());
    }
}

struct FakeGit {
    state: Rc<RefCell<State>>,
}

impl SourceControl for FakeGit {
    fn clone_branch(
        &self,
        _url: &str,
        branch: &str,
        dest: &Path,
        shallow: bool,
        _output: &OutputRouting,
    ) -> anyhow::Result<()> {
        let element = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut state = self.state.borrow_mut();
        state.clones.push(CloneCall {
            element: element.clone(),
            branch: branch.to_string(),
            shallow,
        });
        if state.failing_clones.contains(&element) {
            bail!("git clone failed: exit status 128");
        }

        fs::create_dir_all(dest)?;
        fs::write(dest.join("README.md"), format!("# {}\n", element))?;
        if let Some(manifest) = state.manifests.get(&element) {
            fs::write(dest.join(MANIFEST_FILE), manifest)?;
        }
        Ok(())
    }

    fn reset_to(&self, repo: &Path, commit: &str, _output: &OutputRouting) -> anyhow::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.failing_reset {
            bail!("git reset failed: unknown revision {}", commit);
        }
        state
            .resets
            .push((repo.display().to_string(), commit.to_string()));
        Ok(())
    }
}

struct FakeBuilder {
    state: Rc<RefCell<State>>,
}

impl Builder for FakeBuilder {
    fn build(&self, job: &BuildJob<'_>) -> anyhow::Result<()> {
        let mut state = self.state.borrow_mut();
        state
            .builds
            .push((job.element.to_string(), job.build_vars.to_string()));
        if state.failing_builds.contains(job.element) {
            bail!("make -j{} failed: exit status 2", job.jobs);
        }
        fs::create_dir_all(job.build_dir())?;
        Ok(())
    }
}

struct FakeRegistry {
    state: Rc<RefCell<State>>,
}

impl RegistryTool for FakeRegistry {
    fn list(&self) -> Result<String> {
        Ok(self
            .state
            .borrow()
            .registered
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}. {}    VALID\n", i + 1, name))
            .collect())
    }

    fn register(
        &self,
        element: &str,
        _lib_dir: &Path,
        env: &BTreeMap<String, String>,
        _output: &OutputRouting,
    ) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state
            .registrations
            .push((element.to_string(), env.clone()));
        if !state.registered.iter().any(|n| n == element) {
            state.registered.push(element.to_string());
        }
        Ok(())
    }

    fn unregister(&self, element: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.unregistered.push(element.to_string());
        if state.failing_unregister {
            return Err(crate::error::ElementsError::RegistryCommandFailed {
                action: "unregister".to_string(),
                message: "database locked".to_string(),
            });
        }
        state.registered.retain(|n| n != element);
        Ok(())
    }
}
