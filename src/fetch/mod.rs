//! Fetching from remote sources.
//!
//! This module provides the HTTP client used for the catalog and remote
//! READMEs, and the git-backed [`SourceControl`] used to clone elements.

pub mod git;
pub mod http;

pub use git::{GitFetcher, SourceControl};
pub use http::{FetchResponse, HttpFetcher};
