//! The external registration tool.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ElementsError, Result};
use crate::shell::{display_command, execute, execute_quiet, OutputRouting, OutputTarget};

/// Mutations and queries against the local registration database.
pub trait RegistryTool {
    /// Raw output of the list command.
    fn list(&self) -> Result<String>;

    /// Record `element` as installed with its library directory.
    ///
    /// `env` carries the dependency bindings the element was built with.
    fn register(
        &self,
        element: &str,
        lib_dir: &Path,
        env: &BTreeMap<String, String>,
        output: &OutputRouting,
    ) -> Result<()>;

    /// Remove `element` from the database.
    fn unregister(&self, element: &str) -> Result<()>;
}

/// [`RegistryTool`] backed by `sst-register`.
#[derive(Debug, Clone)]
pub struct SstRegisterTool {
    program: String,
}

impl SstRegisterTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments registering `element` with its `<element>_LIBDIR` binding.
    pub fn register_args(element: &str, lib_dir: &Path) -> Vec<String> {
        vec![
            element.to_string(),
            format!("{}_LIBDIR={}", element, lib_dir.display()),
        ]
    }

    fn failed(&self, action: &str, args: &[String], message: String) -> ElementsError {
        tracing::debug!("{} failed: {}", display_command(&self.program, args), message);
        ElementsError::RegistryCommandFailed {
            action: action.to_string(),
            message,
        }
    }
}

impl Default for SstRegisterTool {
    fn default() -> Self {
        Self::new("sst-register")
    }
}

impl RegistryTool for SstRegisterTool {
    fn list(&self) -> Result<String> {
        let args = vec!["-l".to_string()];
        let result = execute_quiet(&self.program, &args, None)
            .map_err(|e| self.failed("list", &args, e.to_string()))?;
        if !result.success {
            return Err(self.failed("list", &args, result.failure_message()));
        }
        Ok(result.stdout)
    }

    fn register(
        &self,
        element: &str,
        lib_dir: &Path,
        env: &BTreeMap<String, String>,
        output: &OutputRouting,
    ) -> Result<()> {
        let args = Self::register_args(element, lib_dir);
        let mut options = output.options();
        options.env = env.clone();
        if options.stderr == OutputTarget::Discard {
            options.stderr = OutputTarget::Capture;
        }

        let result = execute(&self.program, &args, &options)
            .map_err(|e| self.failed("register", &args, e.to_string()))?;
        if !result.success {
            return Err(self.failed("register", &args, result.failure_message()));
        }
        Ok(())
    }

    fn unregister(&self, element: &str) -> Result<()> {
        let args = vec!["-u".to_string(), element.to_string()];
        let result = execute_quiet(&self.program, &args, None)
            .map_err(|e| self.failed("unregister", &args, e.to_string()))?;
        if !result.success {
            return Err(self.failed("unregister", &args, result.failure_message()));
        }
        Ok(())
    }
}
