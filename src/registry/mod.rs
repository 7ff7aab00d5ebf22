//! Local registration state.
//!
//! Which elements are installed is owned by the simulator's registration
//! tool. Every query re-runs the tool; nothing is cached, since installs and
//! uninstalls change the answer immediately.

pub mod parser;
pub mod tool;

pub use parser::{RegistryListParser, ValidityMarkerParser};
pub use tool::{RegistryTool, SstRegisterTool};

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Settings;
use crate::error::Result;
use crate::shell::OutputRouting;

/// Queries and mutates the registration database.
pub struct RegistryClient {
    tool: Box<dyn RegistryTool>,
    parser: Box<dyn RegistryListParser>,
}

impl RegistryClient {
    pub fn new(tool: Box<dyn RegistryTool>, parser: Box<dyn RegistryListParser>) -> Self {
        Self { tool, parser }
    }

    /// Client driving the configured `sst-register`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Box::new(SstRegisterTool::new(settings.tools.register.clone())),
            Box::new(ValidityMarkerParser),
        )
    }

    /// Registered element names in listed order.
    pub fn list_registered(&self) -> Result<Vec<String>> {
        let output = self.tool.list()?;
        Ok(self.parser.parse(&output))
    }

    pub fn is_registered(&self, element: &str) -> Result<bool> {
        Ok(self.list_registered()?.iter().any(|name| name == element))
    }

    pub fn register(
        &self,
        element: &str,
        lib_dir: &Path,
        env: &BTreeMap<String, String>,
        output: &OutputRouting,
    ) -> Result<()> {
        tracing::debug!("Registering {} ({})", element, lib_dir.display());
        self.tool.register(element, lib_dir, env, output)
    }

    pub fn unregister(&self, element: &str) -> Result<()> {
        tracing::debug!("Unregistering {}", element);
        self.tool.unregister(element)
    }
}
