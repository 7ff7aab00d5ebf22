//! The element catalog.
//!
//! The catalog is the authoritative list of installable elements. Three
//! payload shapes are accepted:
//!
//! - a JSON object mapping names to `{"url": ..., "dep": [...], "branch": ...}`
//! - a JSON object mapping names to a repository URL
//! - whitespace-delimited names, with URLs built from a repository template
//!
//! # Example
//!
//! ```
//! use sst_elements::catalog::Catalog;
//!
//! let catalog = Catalog::parse(
//!     r#"{"hermes": {"url": "https://github.com/sst/hermes", "dep": ["thornhill"]}}"#,
//!     None,
//! )
//! .unwrap();
//!
//! let hermes = catalog.get("hermes").unwrap();
//! assert_eq!(hermes.dependencies.as_deref(), Some(&["thornhill".to_string()][..]));
//! ```

pub mod client;
pub mod source;

pub use client::CatalogClient;
pub use source::{source_for, CatalogSource, FileCatalogSource, HttpCatalogSource};

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{ElementsError, Result};

/// Placeholder substituted with the element name in repository templates.
pub const ELEMENT_PLACEHOLDER: &str = "{element}";

/// One installable element as described by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    /// Repository URL to clone.
    pub url: String,
    /// Declared dependencies, when the catalog carries them.
    ///
    /// `None` means the element's own `dependencies.txt` is authoritative.
    pub dependencies: Option<Vec<String>>,
    /// Branch to prefer over the configured default.
    pub branch: Option<String>,
}

impl CatalogEntry {
    /// Entry with only a URL.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            dependencies: None,
            branch: None,
        }
    }

    /// Set the declared dependencies.
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = Some(deps.into_iter().map(Into::into).collect());
        self
    }

    /// Set the preferred branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Url(String),
    Detailed {
        url: String,
        #[serde(default, alias = "dependencies")]
        dep: Option<Vec<String>>,
        #[serde(default)]
        branch: Option<String>,
    },
}

/// Immutable name → entry mapping for one process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from entries; later duplicates replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.name.clone(), entry))
                .collect(),
        }
    }

    /// Parse a catalog payload.
    ///
    /// `repo_url_template` is only consulted for name-only payloads.
    pub fn parse(content: &str, repo_url_template: Option<&str>) -> Result<Self> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('{') {
            Self::parse_json(trimmed)
        } else {
            Self::parse_names(content, repo_url_template)
        }
    }

    fn parse_json(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawEntry> =
            serde_json::from_str(content).map_err(|e| ElementsError::CatalogMalformed {
                message: e.to_string(),
            })?;

        if let Some(bad) = raw.keys().find(|name| !is_valid_name(name)) {
            return Err(ElementsError::CatalogMalformed {
                message: format!("'{}' is not a valid element name", bad),
            });
        }

        let entries = raw.into_iter().map(|(name, raw)| match raw {
            RawEntry::Url(url) => CatalogEntry::new(name, url),
            RawEntry::Detailed { url, dep, branch } => CatalogEntry {
                name,
                url,
                dependencies: dep,
                branch,
            },
        });
        Ok(Self::from_entries(entries))
    }

    fn parse_names(content: &str, repo_url_template: Option<&str>) -> Result<Self> {
        let names: Vec<&str> = content.split_whitespace().collect();
        if let Some(bad) = names.iter().find(|name| !is_valid_name(name)) {
            return Err(ElementsError::CatalogMalformed {
                message: format!("'{}' is not a valid element name", bad),
            });
        }
        if names.is_empty() {
            return Ok(Self::default());
        }

        let template = repo_url_template.ok_or_else(|| ElementsError::CatalogMalformed {
            message: "name-only catalog needs a repository URL template (ELEMENT_REPO_URL)"
                .to_string(),
        })?;

        Ok(Self::from_entries(names.into_iter().map(|name| {
            CatalogEntry::new(name, expand_template(template, name))
        })))
    }

    /// Look up an element.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Whether the element is installable.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Element names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in sorted name order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Element names are repository directory names: one path component
/// made of ASCII alphanumerics, `_`, `-` and `.`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Expand a repository template for one element.
///
/// Templates without a placeholder are treated as a base URL.
pub fn expand_template(template: &str, element: &str) -> String {
    if template.contains(ELEMENT_PLACEHOLDER) {
        template.replace(ELEMENT_PLACEHOLDER, element)
    } else {
        format!("{}/{}", template.trim_end_matches('/'), element)
    }
}
