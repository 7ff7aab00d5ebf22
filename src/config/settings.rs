//! Process-wide settings.
//!
//! Settings are layered: built-in defaults, then an optional YAML file,
//! then environment variables. The catalog location and the element source
//! root are mandatory; nothing runs without them.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ElementsError, Result};

/// Location of the element catalog (URL or local path).
pub const ENV_CATALOG: &str = "ELEMENT_LIST_URL";
/// Directory that holds every cloned element.
pub const ENV_SOURCE_ROOT: &str = "ELEMENT_SRC_DIR";
/// Repository URL template for name-only catalogs.
pub const ENV_REPO_URL: &str = "ELEMENT_REPO_URL";
/// Branch cloned when none is requested.
pub const ENV_BRANCH: &str = "ELEMENT_BRANCH";
/// Explicit settings file.
pub const ENV_CONFIG_FILE: &str = "SST_ELEMENTS_CONFIG";
pub const ENV_GIT: &str = "SST_ELEMENTS_GIT";
pub const ENV_CMAKE: &str = "SST_ELEMENTS_CMAKE";
pub const ENV_MAKE: &str = "SST_ELEMENTS_MAKE";
pub const ENV_NINJA: &str = "SST_ELEMENTS_NINJA";
pub const ENV_REGISTER: &str = "SST_ELEMENTS_REGISTER";
pub const ENV_CORE: &str = "SST_ELEMENTS_CORE";
pub const ENV_TIMEOUT: &str = "SST_ELEMENTS_TIMEOUT";

/// Settings file looked up inside the source root.
pub const SETTINGS_FILE_NAME: &str = ".sst-elements.yml";

const DEFAULT_BRANCH: &str = "master";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// External programs the installer drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    pub git: String,
    pub cmake: String,
    pub make: String,
    pub ninja: String,
    /// Element registration tool (`sst-register`).
    pub register: String,
    /// Simulator core binary (`sst`).
    pub core: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            cmake: "cmake".to_string(),
            make: "make".to_string(),
            ninja: "ninja".to_string(),
            register: "sst-register".to_string(),
            core: "sst".to_string(),
        }
    }
}

/// Resolved settings for one process run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where the catalog is fetched from.
    pub catalog_location: String,
    /// Directory elements are cloned into and built in.
    pub source_root: PathBuf,
    /// `{element}` template used when the catalog only lists names.
    pub repo_url_template: Option<String>,
    /// Branch cloned when the caller does not ask for one.
    pub default_branch: String,
    /// Timeout for catalog and README requests.
    pub http_timeout: Duration,
    pub tools: Tools,
}

/// On-disk form of the settings file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub catalog_url: Option<String>,
    pub source_root: Option<PathBuf>,
    pub repo_url_template: Option<String>,
    pub default_branch: Option<String>,
    pub http_timeout: Option<u64>,
    #[serde(default)]
    pub tools: ToolsFile,
}

/// `tools:` section of the settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsFile {
    pub git: Option<String>,
    pub cmake: Option<String>,
    pub make: Option<String>,
    pub ninja: Option<String>,
    pub register: Option<String>,
    pub core: Option<String>,
}

impl SettingsFile {
    /// Parse a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| ElementsError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl Settings {
    /// Settings with defaults for everything but the mandatory values.
    pub fn new(catalog_location: impl Into<String>, source_root: impl Into<PathBuf>) -> Self {
        Self {
            catalog_location: catalog_location.into(),
            source_root: source_root.into(),
            repo_url_template: None,
            default_branch: DEFAULT_BRANCH.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            tools: Tools::default(),
        }
    }

    /// Resolve settings from the process environment.
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Resolve settings from an explicit variable map.
    ///
    /// Empty values count as unset.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let var = |key: &str| vars.get(key).filter(|v| !v.trim().is_empty()).cloned();

        let file_path = var(ENV_CONFIG_FILE).map(PathBuf::from).or_else(|| {
            var(ENV_SOURCE_ROOT)
                .map(|root| PathBuf::from(root).join(SETTINGS_FILE_NAME))
                .filter(|p| p.is_file())
        });

        let file = match file_path {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                SettingsFile::load(&path)?
            }
            None => SettingsFile::default(),
        };

        let catalog_location =
            var(ENV_CATALOG)
                .or(file.catalog_url)
                .ok_or_else(|| ElementsError::ConfigMissing {
                    key: ENV_CATALOG.to_string(),
                })?;
        let source_root = var(ENV_SOURCE_ROOT)
            .map(PathBuf::from)
            .or(file.source_root)
            .ok_or_else(|| ElementsError::ConfigMissing {
                key: ENV_SOURCE_ROOT.to_string(),
            })?;

        let mut settings = Self::new(catalog_location, source_root);
        settings.repo_url_template = var(ENV_REPO_URL).or(file.repo_url_template);
        if let Some(branch) = var(ENV_BRANCH).or(file.default_branch) {
            settings.default_branch = branch;
        }

        let timeout = match var(ENV_TIMEOUT) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                ElementsError::ConfigParseError {
                    path: PathBuf::from(ENV_TIMEOUT),
                    message: format!("expected a number of seconds, got '{}'", raw),
                }
            })?),
            None => file.http_timeout,
        };
        if let Some(secs) = timeout {
            settings.http_timeout = Duration::from_secs(secs);
        }

        let tools = &mut settings.tools;
        let overlays = [
            (&mut tools.git, ENV_GIT, file.tools.git),
            (&mut tools.cmake, ENV_CMAKE, file.tools.cmake),
            (&mut tools.make, ENV_MAKE, file.tools.make),
            (&mut tools.ninja, ENV_NINJA, file.tools.ninja),
            (&mut tools.register, ENV_REGISTER, file.tools.register),
            (&mut tools.core, ENV_CORE, file.tools.core),
        ];
        for (slot, key, from_file) in overlays {
            if let Some(value) = var(key).or(from_file) {
                *slot = value;
            }
        }

        Ok(settings)
    }

    /// Directory an element is cloned into.
    pub fn element_dir(&self, element: &str) -> PathBuf {
        self.source_root.join(element)
    }

    /// Directory captured build logs are written to.
    pub fn log_dir(&self) -> PathBuf {
        self.source_root.join("element-logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn mandatory_values_from_env() {
        let settings = Settings::from_vars(&vars(&[
            (ENV_CATALOG, "https://example.com/elements.json"),
            (ENV_SOURCE_ROOT, "/opt/elements"),
        ]))
        .unwrap();

        assert_eq!(settings.catalog_location, "https://example.com/elements.json");
        assert_eq!(settings.source_root, PathBuf::from("/opt/elements"));
        assert_eq!(settings.default_branch, "master");
        assert_eq!(settings.http_timeout, Duration::from_secs(30));
        assert_eq!(settings.tools, Tools::default());
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let err = Settings::from_vars(&vars(&[(ENV_SOURCE_ROOT, "/opt/elements")])).unwrap_err();
        assert!(matches!(err, ElementsError::ConfigMissing { ref key } if key == ENV_CATALOG));
    }

    #[test]
    fn missing_source_root_is_an_error() {
        let err = Settings::from_vars(&vars(&[(ENV_CATALOG, "elements.json")])).unwrap_err();
        assert!(matches!(err, ElementsError::ConfigMissing { ref key } if key == ENV_SOURCE_ROOT));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = Settings::from_vars(&vars(&[(ENV_CATALOG, ""), (ENV_SOURCE_ROOT, "/opt")]))
            .unwrap_err();
        assert!(matches!(err, ElementsError::ConfigMissing { .. }));
    }

    #[test]
    fn tool_overrides_from_env() {
        let settings = Settings::from_vars(&vars(&[
            (ENV_CATALOG, "elements.json"),
            (ENV_SOURCE_ROOT, "/opt/elements"),
            (ENV_REGISTER, "/usr/local/bin/sst-register"),
            (ENV_BRANCH, "devel"),
            (ENV_TIMEOUT, "5"),
        ]))
        .unwrap();

        assert_eq!(settings.tools.register, "/usr/local/bin/sst-register");
        assert_eq!(settings.tools.git, "git");
        assert_eq!(settings.default_branch, "devel");
        assert_eq!(settings.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_timeout_is_a_parse_error() {
        let err = Settings::from_vars(&vars(&[
            (ENV_CATALOG, "elements.json"),
            (ENV_SOURCE_ROOT, "/opt/elements"),
            (ENV_TIMEOUT, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ElementsError::ConfigParseError { .. }));
    }

    #[test]
    fn settings_file_in_source_root_is_picked_up() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILE_NAME),
            "catalog_url: https://example.com/elements.json\ndefault_branch: main\ntools:\n  ninja: ninja-build\n",
        )
        .unwrap();

        let settings = Settings::from_vars(&vars(&[(
            ENV_SOURCE_ROOT,
            temp.path().to_str().unwrap(),
        )]))
        .unwrap();

        assert_eq!(settings.catalog_location, "https://example.com/elements.json");
        assert_eq!(settings.default_branch, "main");
        assert_eq!(settings.tools.ninja, "ninja-build");
    }

    #[test]
    fn env_overrides_settings_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("custom.yml");
        fs::write(
            &file,
            "catalog_url: from-file.json\nsource_root: /from/file\ntools:\n  git: file-git\n",
        )
        .unwrap();

        let settings = Settings::from_vars(&vars(&[
            (ENV_CONFIG_FILE, file.to_str().unwrap()),
            (ENV_CATALOG, "from-env.json"),
            (ENV_GIT, "env-git"),
        ]))
        .unwrap();

        assert_eq!(settings.catalog_location, "from-env.json");
        assert_eq!(settings.source_root, PathBuf::from("/from/file"));
        assert_eq!(settings.tools.git, "env-git");
    }

    #[test]
    fn unknown_keys_in_settings_file_are_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("bad.yml");
        fs::write(&file, "catalog: nope\n").unwrap();

        let err = Settings::from_vars(&vars(&[(ENV_CONFIG_FILE, file.to_str().unwrap())]))
            .unwrap_err();
        assert!(matches!(err, ElementsError::ConfigParseError { .. }));
    }

    #[test]
    fn element_and_log_dirs_live_under_source_root() {
        let settings = Settings::new("elements.json", "/opt/elements");
        assert_eq!(
            settings.element_dir("hermes"),
            PathBuf::from("/opt/elements/hermes")
        );
        assert_eq!(
            settings.log_dir(),
            PathBuf::from("/opt/elements/element-logs")
        );
    }
}
