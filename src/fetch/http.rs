//! HTTP fetching.
//!
//! A thin blocking client used for the element catalog and for README
//! files served from a repository's raw-content host.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Fetches documents over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

/// Response to a GET request.
#[derive(Debug)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub content: String,
}

impl FetchResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sst-elements/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue a GET and return whatever the server answered.
    ///
    /// Only transport failures are errors; the caller interprets the status.
    pub fn get(&self, url: &str) -> Result<FetchResponse> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status().as_u16();
        let content = response
            .text()
            .with_context(|| format!("Failed to read response from {}", url))?;

        Ok(FetchResponse { status, content })
    }

    /// Fetch a document, failing on any non-2xx status.
    pub fn fetch(&self, url: &str) -> Result<String> {
        let response = self.get(url)?;
        if !response.is_success() {
            bail!("HTTP {} fetching {}", response.status, url);
        }
        Ok(response.content)
    }

    /// Fetch a document that may legitimately be absent.
    ///
    /// Returns `None` on 404, fails on any other non-2xx status.
    pub fn fetch_optional(&self, url: &str) -> Result<Option<String>> {
        let response = self.get(url)?;
        if response.is_not_found() {
            return Ok(None);
        }
        if !response.is_success() {
            bail!("HTTP {} fetching {}", response.status, url);
        }
        Ok(Some(response.content))
    }
}
