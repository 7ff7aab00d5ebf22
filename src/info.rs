//! Element documentation, tests, and the simulator version.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::engine::Engine;
use crate::error::{ElementsError, Result};
use crate::fetch::HttpFetcher;
use crate::shell::{display_command, execute_quiet};

/// README file names, in lookup order.
pub const README_NAMES: [&str; 2] = ["README.md", "README"];

/// Where a README was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoSource {
    /// A file in the element's checkout.
    Local(PathBuf),
    /// The element's repository, read through its raw-content host.
    Remote(String),
}

impl fmt::Display for InfoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// README text of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    pub content: String,
    pub source: InfoSource,
}

/// Raw-content base URL for a repository URL.
///
/// `https://github.com/sst/hermes.git` becomes
/// `https://raw.githubusercontent.com/sst/hermes`.
pub fn raw_base(repo_url: &str) -> String {
    let url = repo_url.trim_end_matches('/');
    let url = url.strip_suffix(".git").unwrap_or(url);
    url.replacen("github.com", "raw.githubusercontent.com", 1)
}

/// Read-only lookups about elements.
pub struct InfoService<'e> {
    engine: &'e Engine,
    http: HttpFetcher,
}

impl<'e> InfoService<'e> {
    pub fn new(engine: &'e Engine) -> Result<Self> {
        let http = HttpFetcher::with_timeout(engine.settings().http_timeout)?;
        Ok(Self { engine, http })
    }

    /// README of `element`.
    ///
    /// A registered element's checkout is tried first. Catalog elements
    /// are then looked up in their repository, skipping names the server
    /// does not have.
    pub fn get_info(&self, element: &str) -> Result<ElementInfo> {
        if self.engine.is_registered(element)? {
            let dir = self.engine.settings().element_dir(element);
            for name in README_NAMES {
                let path = dir.join(name);
                if path.is_file() {
                    return Ok(ElementInfo {
                        content: fs::read_to_string(&path)?,
                        source: InfoSource::Local(path),
                    });
                }
            }
            tracing::debug!("{} is registered but has no local README", element);
        }

        let catalog = self.engine.catalog().get()?;
        if let Some(entry) = catalog.get(element) {
            let branch = entry
                .branch
                .as_deref()
                .unwrap_or(&self.engine.settings().default_branch);
            let base = raw_base(&entry.url);
            for name in README_NAMES {
                let url = format!("{}/{}/{}", base, branch, name);
                if let Some(content) = self.http.fetch_optional(&url)? {
                    return Ok(ElementInfo {
                        content,
                        source: InfoSource::Remote(entry.url.clone()),
                    });
                }
            }
        }

        Err(ElementsError::ElementInfoNotFound {
            element: element.to_string(),
        })
    }

    /// Python test files in a registered element's `tests` directory.
    pub fn list_tests(&self, element: &str) -> Result<Vec<PathBuf>> {
        if !self.engine.is_registered(element)? {
            return Err(ElementsError::TestsNotFound {
                element: element.to_string(),
            });
        }

        let tests_dir = self.engine.settings().element_dir(element).join("tests");
        if !tests_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut tests = Vec::new();
        for entry in fs::read_dir(&tests_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "py") {
                tests.push(path);
            }
        }
        tests.sort();
        Ok(tests)
    }

    /// Version banner printed by the simulator core.
    pub fn core_version(&self) -> Result<String> {
        let program = &self.engine.settings().tools.core;
        let args = vec!["-V".to_string()];
        let result = execute_quiet(program, &args, None)?;
        if !result.success {
            return Err(ElementsError::CommandFailed {
                command: display_command(program, &args),
                code: result.exit_code,
            });
        }
        Ok(result.stdout.trim().to_string())
    }
}
