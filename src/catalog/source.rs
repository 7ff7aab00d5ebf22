//! Where catalog payloads come from.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ElementsError, Result};
use crate::fetch::HttpFetcher;

/// A location that yields the raw catalog payload.
pub trait CatalogSource {
    /// Human-readable location, used in error messages.
    fn location(&self) -> String;

    /// Read the payload.
    fn load(&self) -> Result<String>;
}

/// Catalog served over HTTP(S).
pub struct HttpCatalogSource {
    url: String,
    fetcher: HttpFetcher,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            fetcher: HttpFetcher::with_timeout(timeout)?,
        })
    }
}

impl CatalogSource for HttpCatalogSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn load(&self) -> Result<String> {
        let response =
            self.fetcher
                .get(&self.url)
                .map_err(|e| ElementsError::CatalogUnavailable {
                    location: self.url.clone(),
                    message: format!("{:#}", e),
                })?;

        if response.is_not_found() {
            return Err(ElementsError::CatalogMissing {
                location: self.url.clone(),
            });
        }
        if !response.is_success() {
            return Err(ElementsError::CatalogUnavailable {
                location: self.url.clone(),
                message: format!("HTTP {}", response.status),
            });
        }
        Ok(response.content)
    }
}

/// Catalog stored on the local filesystem.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ElementsError::CatalogMissing {
                    location: self.location(),
                }
            } else {
                ElementsError::CatalogUnavailable {
                    location: self.location(),
                    message: e.to_string(),
                }
            }
        })
    }
}

/// Pick a source for a configured catalog location.
///
/// `http://` and `https://` locations are fetched remotely; anything else
/// is a local path, with an optional `file://` prefix.
pub fn source_for(location: &str, timeout: Duration) -> Result<Box<dyn CatalogSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpCatalogSource::new(location, timeout)?))
    } else {
        let path = location.strip_prefix("file://").unwrap_or(location);
        Ok(Box::new(FileCatalogSource::new(path)))
    }
}
