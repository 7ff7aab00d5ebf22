//! Lazy, fetch-once access to the catalog.

use std::cell::OnceCell;

use super::source::{source_for, CatalogSource};
use super::{Catalog, CatalogEntry};
use crate::config::Settings;
use crate::error::{ElementsError, Result};

/// Loads the catalog on first use and serves every later lookup from memory.
pub struct CatalogClient {
    source: Option<Box<dyn CatalogSource>>,
    repo_url_template: Option<String>,
    catalog: OnceCell<Catalog>,
}

impl CatalogClient {
    /// Client reading from an explicit source.
    pub fn new(source: Box<dyn CatalogSource>, repo_url_template: Option<String>) -> Self {
        Self {
            source: Some(source),
            repo_url_template,
            catalog: OnceCell::new(),
        }
    }

    /// Client for the location in `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let source = source_for(&settings.catalog_location, settings.http_timeout)?;
        Ok(Self::new(source, settings.repo_url_template.clone()))
    }

    /// Client over an already-parsed catalog.
    pub fn preloaded(catalog: Catalog) -> Self {
        Self {
            source: None,
            repo_url_template: None,
            catalog: OnceCell::from(catalog),
        }
    }

    /// The catalog, fetching and parsing it on first call.
    pub fn get(&self) -> Result<&Catalog> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog);
        }

        let source = self.source.as_ref().ok_or_else(|| {
            ElementsError::Other(anyhow::anyhow!("catalog client has no source"))
        })?;
        tracing::debug!("Loading element catalog from {}", source.location());
        let catalog = Catalog::parse(&source.load()?, self.repo_url_template.as_deref())?;
        tracing::debug!("Catalog lists {} elements", catalog.len());

        Ok(self.catalog.get_or_init(|| catalog))
    }

    /// Look up an element, failing with [`ElementsError::ElementNotFound`].
    pub fn entry(&self, element: &str) -> Result<&CatalogEntry> {
        self.get()?
            .get(element)
            .ok_or_else(|| ElementsError::ElementNotFound {
                element: element.to_string(),
            })
    }

    /// Whether the catalog lists `element`.
    pub fn contains(&self, element: &str) -> Result<bool> {
        Ok(self.get()?.contains(element))
    }
}
