//! Building element checkouts.
//!
//! Each element is configured with CMake in `<element>/build` and then
//! compiled with the driver matching the chosen generator.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::config::Tools;
use crate::resolver::BuildVars;
use crate::shell::{display_command, execute, OutputRouting, OutputTarget};

/// Name of the out-of-tree build directory inside each element.
pub const BUILD_DIR: &str = "build";

/// Build-file generator passed to CMake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BuildGenerator {
    /// Unix Makefiles driven by `make`.
    #[default]
    Makefile,
    /// Ninja files driven by `ninja`.
    Ninja,
}

impl BuildGenerator {
    /// Name shown in status messages.
    pub fn title(self) -> &'static str {
        match self {
            Self::Makefile => "Makefile",
            Self::Ninja => "Ninja",
        }
    }

    /// Arguments for the configure step, run from the build directory.
    pub fn configure_args(self, build_vars: &BuildVars) -> Vec<String> {
        let mut args = Vec::new();
        if self == Self::Ninja {
            args.extend(["-G".to_string(), "Ninja".to_string()]);
        }
        args.extend(build_vars.cmake_defines());
        args.push("..".to_string());
        args
    }

    /// The build driver for this generator.
    pub fn driver(self, tools: &Tools) -> &str {
        match self {
            Self::Makefile => &tools.make,
            Self::Ninja => &tools.ninja,
        }
    }
}

/// Everything needed to build one plan entry.
#[derive(Debug, Clone)]
pub struct BuildJob<'a> {
    pub element: &'a str,
    /// The element's checkout.
    pub source_dir: PathBuf,
    pub build_vars: &'a BuildVars,
    pub generator: BuildGenerator,
    /// Parallel jobs for the driver.
    pub jobs: usize,
    pub output: OutputRouting,
}

impl BuildJob<'_> {
    pub fn build_dir(&self) -> PathBuf {
        self.source_dir.join(BUILD_DIR)
    }
}

/// Configures and compiles an element.
pub trait Builder {
    fn build(&self, job: &BuildJob<'_>) -> Result<()>;
}

/// [`Builder`] running CMake and then `make` or `ninja`.
#[derive(Debug, Clone, Default)]
pub struct CmakeBuilder {
    tools: Tools,
}

impl CmakeBuilder {
    pub fn new(tools: Tools) -> Self {
        Self { tools }
    }

    fn run(&self, program: &str, args: &[String], dir: &Path, job: &BuildJob<'_>) -> Result<()> {
        let mut options = job.output.options().in_dir(dir);
        options.env = job.build_vars.to_env();
        if options.stderr == OutputTarget::Discard {
            options.stderr = OutputTarget::Capture;
        }

        let result = execute(program, args, &options)?;
        if !result.success {
            bail!(
                "{} failed: {}",
                display_command(program, args),
                result.failure_message()
            );
        }
        Ok(())
    }
}

impl Builder for CmakeBuilder {
    fn build(&self, job: &BuildJob<'_>) -> Result<()> {
        let build_dir = job.build_dir();
        std::fs::create_dir_all(&build_dir)?;

        let configure = job.generator.configure_args(job.build_vars);
        self.run(&self.tools.cmake, &configure, &build_dir, job)?;

        let drive = vec![format!("-j{}", job.jobs.max(1))];
        self.run(job.generator.driver(&self.tools), &drive, &build_dir, job)
    }
}
