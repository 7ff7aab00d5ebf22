//! Git repository fetching.
//!
//! Elements are cloned shallow and single-branch straight into the source
//! root. When a specific commit is wanted the clone keeps full history so
//! the working tree can be reset to it.

use anyhow::{bail, Result};
use std::path::Path;

use crate::shell::{execute, OutputRouting, OutputTarget};

/// Version-control operations the installer needs.
pub trait SourceControl {
    /// Clone `branch` of `url` into `dest`.
    ///
    /// `shallow` limits history to the branch tip.
    fn clone_branch(
        &self,
        url: &str,
        branch: &str,
        dest: &Path,
        shallow: bool,
        output: &OutputRouting,
    ) -> Result<()>;

    /// Hard-reset the working tree at `repo` to `commit`.
    fn reset_to(&self, repo: &Path, commit: &str, output: &OutputRouting) -> Result<()>;
}

/// [`SourceControl`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
}

impl GitFetcher {
    /// Create a fetcher that runs the given git executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The git executable in use.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the argument list for a clone.
    pub fn clone_args(url: &str, branch: &str, dest: &Path, shallow: bool) -> Vec<String> {
        let mut args = vec!["clone".to_string(), "-q".to_string()];
        if shallow {
            args.extend(["--depth".to_string(), "1".to_string()]);
        }
        args.extend([
            "-b".to_string(),
            branch.to_string(),
            "--single-branch".to_string(),
            url.to_string(),
            dest.to_string_lossy().into_owned(),
        ]);
        args
    }

    fn run(&self, args: &[String], cwd: Option<&Path>, output: &OutputRouting) -> Result<()> {
        let mut options = output.options();
        options.cwd = cwd.map(Path::to_path_buf);
        // Keep stderr for the error message unless it is headed for a log.
        if options.stderr == OutputTarget::Discard {
            options.stderr = OutputTarget::Capture;
        }

        let result = execute(&self.program, args, &options)?;
        if !result.success {
            bail!("git {} failed: {}", args[0], result.failure_message());
        }
        Ok(())
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new("git")
    }
}

impl SourceControl for GitFetcher {
    fn clone_branch(
        &self,
        url: &str,
        branch: &str,
        dest: &Path,
        shallow: bool,
        output: &OutputRouting,
    ) -> Result<()> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.run(&Self::clone_args(url, branch, dest, shallow), None, output)
    }

    fn reset_to(&self, repo: &Path, commit: &str, output: &OutputRouting) -> Result<()> {
        let args: Vec<String> = vec!["reset".into(), "-q".into(), "--hard".into(), commit.into()];
        self.run(&args, Some(repo), output)
    }
}
