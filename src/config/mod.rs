//! Settings for the element installer.
//!
//! Settings resolve in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Settings file (`$SST_ELEMENTS_CONFIG`, or `<source root>/.sst-elements.yml`)
//! 3. Environment variables (`ELEMENT_LIST_URL`, `ELEMENT_SRC_DIR`, ...)
//!
//! # Example
//!
//! ```
//! use sst_elements::config::Settings;
//! use std::collections::HashMap;
//!
//! let mut vars = HashMap::new();
//! vars.insert("ELEMENT_LIST_URL".to_string(), "https://example.com/elements.json".to_string());
//! vars.insert("ELEMENT_SRC_DIR".to_string(), "/opt/sst/elements".to_string());
//!
//! let settings = Settings::from_vars(&vars).unwrap();
//! assert_eq!(settings.default_branch, "master");
//! assert_eq!(settings.tools.register, "sst-register");
//! ```

pub mod settings;

pub use settings::{
    Settings, SettingsFile, Tools, ToolsFile, ENV_BRANCH, ENV_CATALOG, ENV_CMAKE, ENV_CONFIG_FILE,
    ENV_CORE, ENV_GIT, ENV_MAKE, ENV_NINJA, ENV_REGISTER, ENV_REPO_URL, ENV_SOURCE_ROOT,
    ENV_TIMEOUT, SETTINGS_FILE_NAME,
};
